use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    write(
        root,
        "src/lib.rs",
        "/* @TODO refactor\n   this function later */\npub fn f() {}\n// @TODO fix bug\n",
    );
    write(root, "scripts/build.py", "# @TODO cache results\nprint('hi')\n");
    write(root, "node_modules/pkg/index.js", "// @TODO vendored\n");
    write(root, "debug.log", "# @TODO noise\n");
    write(root, ".gitignore", "node_modules/\n*.log\n");

    dir
}

fn summoner() -> Command {
    let mut cmd = Command::cargo_bin("issue-summoner").unwrap();
    // Keep the user's ~/.summonerrc out of the picture
    cmd.env("HOME", "/nonexistent");
    cmd
}

#[test]
fn test_scan_json_respects_gitignore() {
    let dir = fixture();

    let output = summoner()
        .args(["scan", "--format", "json"])
        .arg(dir.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["total_count"], 3);

    let titles: Vec<&str> = report["tags"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["cache results", "refactor", "fix bug"]);
    assert_eq!(report["tags"][1]["description"], "this function later");
}

#[test]
fn test_scan_with_custom_tag() {
    let dir = fixture();
    write(dir.path(), "src/main.rs", "// @FIXME broken on windows\n");

    summoner()
        .args(["scan", "-t", "@FIXME", "-f", "markdown"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("**Total Tags**: 1"))
        .stdout(predicate::str::contains("broken on windows"));
}

#[test]
fn test_scan_with_explicit_ignore_file() {
    let dir = fixture();
    let ignore = dir.path().join("custom.ignore");
    fs::write(&ignore, "scripts/\nnode_modules/\n*.log\n").unwrap();

    summoner()
        .args(["scan", "-f", "issues", "-g"])
        .arg(&ignore)
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("refactor"))
        .stdout(predicate::str::contains("cache results").not());
}

#[test]
fn test_missing_ignore_file_fails() {
    let dir = fixture();

    summoner()
        .args(["scan", "-g"])
        .arg(dir.path().join("missing.ignore"))
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to compile ignore patterns"));
}

#[test]
fn test_verbose_lists_patterns() {
    let dir = fixture();

    summoner()
        .args(["scan", "-v"])
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Ignore pattern: node_modules/"))
        .stdout(predicate::str::contains("Issue Summoner - Tag Report"));
}

#[test]
fn test_output_file() {
    let dir = fixture();
    let out = dir.path().join("tags.json");

    summoner()
        .args(["scan", "-f", "json", "-o"])
        .arg(&out)
        .arg(dir.path())
        .assert()
        .success();

    let written = fs::read_to_string(&out).unwrap();
    assert!(written.contains("\"total_count\": 3"));
}

#[test]
fn test_malformed_local_config_fails() {
    let dir = fixture();
    write(dir.path(), ".summonerrc", "annotation = \n");

    summoner()
        .current_dir(dir.path())
        .args(["scan", "."])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"))
        .stderr(predicate::str::contains(".summonerrc"));
}
