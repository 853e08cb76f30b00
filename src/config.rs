//! # Configuration Module
//!
//! Optional settings for a checked tree, read from a `.boilersuite.toml` file
//! in the target directory or from the path in the `BOILERSUITE_CONFIG`
//! environment variable. Command-line flags always win over the file.
//!
//! ```toml
//! author = "example"
//! skip = ["hack/tools", "testdata"]
//! patch = true
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".boilersuite.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "BOILERSUITE_CONFIG";

/// Author substituted into templates when none is configured.
pub const DEFAULT_AUTHOR: &str = "boilersuite";

/// Directory names that are never checked.
pub const DEFAULT_SKIPPED_DIRS: &[&str] = &[".git", "_bin", "bin", "node_modules", "vendor", "third_party", "staging"];

/// Contents of a `.boilersuite.toml` file.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
  /// Expected author, substituted for the author marker in templates
  #[serde(default)]
  pub author: Option<String>,

  /// Extra directory names or relative path prefixes to skip
  #[serde(default)]
  pub skip: Vec<String>,

  /// Whether to print a patch for failed files
  #[serde(default)]
  pub patch: Option<bool>,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// A skip entry can never match.
  #[error("Invalid skip entry '{entry}': {message}")]
  InvalidSkip { entry: String, message: String },
}

impl Config {
  /// Load configuration from a file.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    config.validate()?;

    Ok(config)
  }

  /// Checks that every skip entry is a non-empty relative path.
  fn validate(&self) -> Result<(), ConfigError> {
    for entry in &self.skip {
      let trimmed = entry.trim();
      if trimmed.is_empty() {
        return Err(ConfigError::InvalidSkip {
          entry: entry.clone(),
          message: "entry cannot be empty".to_string(),
        });
      }

      if Path::new(trimmed).is_absolute() {
        return Err(ConfigError::InvalidSkip {
          entry: entry.clone(),
          message: "entry must be relative to the checked directory".to_string(),
        });
      }
    }

    Ok(())
  }
}

/// Values given on the command line.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
  pub author: Option<String>,
  pub skip: Vec<String>,
  pub patch: bool,
}

/// Effective settings for a run, after merging defaults, the config file and
/// the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
  pub author: String,
  pub skip: Vec<String>,
  pub patch: bool,
}

impl Settings {
  /// Merges the config file (if any) with the command line. Scalars from the
  /// command line win; skip lists are combined with the built-in defaults.
  pub fn resolve(config: Option<Config>, cli: CliOverrides) -> Self {
    let config = config.unwrap_or_default();

    let author = cli
      .author
      .or(config.author)
      .unwrap_or_else(|| DEFAULT_AUTHOR.to_string());

    let mut skip: Vec<String> = DEFAULT_SKIPPED_DIRS.iter().map(|s| s.to_string()).collect();
    for entry in config.skip.into_iter().chain(cli.skip) {
      let entry = normalize_skip_entry(&entry);
      if !entry.is_empty() && !skip.contains(&entry) {
        skip.push(entry);
      }
    }

    Self {
      author,
      skip,
      patch: cli.patch || config.patch.unwrap_or(false),
    }
  }
}

/// Trims a skip entry to the form the collector matches against: no
/// surrounding whitespace, no leading `./` and no trailing `/`.
fn normalize_skip_entry(entry: &str) -> String {
  let mut entry = entry.trim();
  while let Some(rest) = entry.strip_prefix("./") {
    entry = rest.trim_start_matches('/');
  }
  entry.trim_end_matches('/').to_string()
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `BOILERSUITE_CONFIG` environment variable
/// 3. `.boilersuite.toml` in the checked directory
pub fn discover_config_path(explicit_path: Option<&Path>, base_dir: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    if path.exists() {
      verbose_log!("Using explicit config path: {}", path.display());
      return Some(path.to_path_buf());
    }
    verbose_log!("Explicit config path does not exist: {}", path.display());
    return None;
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  let local_config = base_dir.join(DEFAULT_CONFIG_FILENAME);
  if local_config.exists() {
    verbose_log!("Using config: {}", local_config.display());
    return Some(local_config);
  }

  verbose_log!("No config file found");
  None
}

/// Load configuration from the discovered path, if there is one.
///
/// # Arguments
///
/// * `explicit_path` - Optional explicit path from CLI flag
/// * `base_dir` - The checked directory
/// * `no_config` - If true, skip config file discovery
pub fn load_config(explicit_path: Option<&Path>, base_dir: &Path, no_config: bool) -> Result<Option<Config>> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(None);
  }

  match discover_config_path(explicit_path, base_dir) {
    Some(path) => {
      let config = Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))?;
      Ok(Some(config))
    }
    None => Ok(None),
  }
}
