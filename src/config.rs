use crate::models::Config;
use crate::patterns::IgnoreSet;
use crate::syntax::SyntaxRegistry;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = ".summonerrc";

/// Load configuration from file or use defaults
///
/// Search order:
/// 1. Custom path if provided via --config
/// 2. .summonerrc in current directory
/// 3. ~/.summonerrc in home directory
/// 4. Built-in defaults
///
/// The first config file found is used; if it cannot be read or parsed the
/// load fails rather than falling through to the next one.
pub fn load_config(custom_path: Option<&Path>) -> Result<Config> {
    let mut candidates = vec![PathBuf::from(CONFIG_FILE)];
    candidates.extend(get_home_config_path());
    load_config_from(custom_path, &candidates)
}

fn load_config_from(custom_path: Option<&Path>, candidates: &[PathBuf]) -> Result<Config> {
    // If custom path provided, use it exclusively
    if let Some(path) = custom_path {
        return load_config_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }

    match candidates.iter().find(|path| path.exists()) {
        Some(path) => load_config_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(Config::default()),
    }
}

/// Load config from a specific file
fn load_config_from_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(config)
}

/// Get path to home directory config file
fn get_home_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_FILE))
}

/// Save a config to a file (useful for creating example configs)
pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    let toml_string = toml::to_string_pretty(config).context("Failed to serialize config")?;

    fs::write(path, toml_string)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    Ok(())
}

/// Comment syntax registry with the config's language overrides applied
pub fn build_registry(config: &Config) -> SyntaxRegistry {
    SyntaxRegistry::with_overrides(&config.languages)
}

/// Compile the ignore patterns for a scan of `root`
///
/// `ignore_file` (from the command line) takes precedence over the config's
/// `ignore_file`; the config's inline `ignore_patterns` always come last.
/// An empty path counts as not given.
pub fn build_ignore_set(
    config: &Config,
    root: &Path,
    ignore_file: Option<&Path>,
) -> Result<IgnoreSet> {
    let explicit = ignore_file.or(config.ignore_file.as_deref());
    let mut set = IgnoreSet::load(explicit, root)?;

    set.extend(config.ignore_patterns.iter().map(String::as_str))
        .context("Invalid ignore pattern in config")?;

    Ok(set)
}
