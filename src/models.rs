use crate::remote::RepoRef;
use crate::syntax::CommentSyntax;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// A single actionable comment found in source code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Annotation token that introduced the comment (e.g. `@TODO`)
    pub annotation: String,

    /// Text following the annotation on its own line
    pub title: String,

    /// Continuation lines of the comment block, newline-joined
    pub description: String,

    /// Path to the file containing the tag
    pub file_path: PathBuf,

    /// Line number of the annotation (1-indexed)
    pub line_number: usize,
}

impl Tag {
    pub fn new(annotation: &str, title: String, file_path: PathBuf, line_number: usize) -> Self {
        Self {
            annotation: annotation.to_string(),
            title,
            description: String::new(),
            file_path,
            line_number,
        }
    }

    /// Add one continuation line to the description
    pub fn push_description(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        if !self.description.is_empty() {
            self.description.push('\n');
        }
        self.description.push_str(line);
    }

    /// A tag without a title carries nothing worth reporting
    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

/// Complete report of the tags found in a codebase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagReport {
    /// All tags found, in traversal order
    pub tags: Vec<Tag>,

    /// Total number of tags
    pub total_count: usize,

    /// Count of tags by file
    pub by_file: HashMap<PathBuf, usize>,

    /// Annotation token that was searched for
    pub annotation: String,

    /// Path that was scanned
    pub scan_path: PathBuf,

    /// Origin remote of the scanned repository, when known
    pub repository: Option<RepoRef>,

    /// When the scan was performed
    pub scan_time: DateTime<Utc>,
}

impl TagReport {
    /// Create a new report from a collection of tags
    pub fn new(tags: Vec<Tag>, annotation: &str, scan_path: PathBuf) -> Self {
        let total_count = tags.len();

        let mut by_file: HashMap<PathBuf, usize> = HashMap::new();
        for tag in &tags {
            *by_file.entry(tag.file_path.clone()).or_insert(0) += 1;
        }

        Self {
            tags,
            total_count,
            by_file,
            annotation: annotation.to_string(),
            scan_path,
            repository: None,
            scan_time: Utc::now(),
        }
    }

    pub fn with_repository(mut self, repository: Option<RepoRef>) -> Self {
        self.repository = repository;
        self
    }

    /// Files sorted by tag count, busiest first, ties by path
    pub fn busiest_files(&self, limit: usize) -> Vec<(&PathBuf, usize)> {
        let mut files: Vec<(&PathBuf, usize)> =
            self.by_file.iter().map(|(path, count)| (path, *count)).collect();
        files.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        files.truncate(limit);
        files
    }
}

/// Configuration for the scanner
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Annotation token to search for
    #[serde(default = "default_annotation")]
    pub annotation: String,

    /// Ignore file to compile; `<root>/.gitignore` when unset
    #[serde(default)]
    pub ignore_file: Option<PathBuf>,

    /// Extra ignore patterns evaluated after the ignore file's
    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    /// Comment syntax overrides keyed by file extension
    #[serde(default)]
    pub languages: HashMap<String, CommentSyntax>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            annotation: default_annotation(),
            ignore_file: None,
            ignore_patterns: Vec::new(),
            languages: HashMap::new(),
        }
    }
}

fn default_annotation() -> String {
    "@TODO".to_string()
}
