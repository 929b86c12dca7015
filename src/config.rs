//! # Configuration Module
//!
//! This module provides configuration support for licsync: the project name,
//! the fixed copyright holder, path whitelist/blacklist rules, the
//! recognized file-type table, and commit ids to ignore while deriving
//! years.
//!
//! Configuration is read from a `.licsync.toml` file in the repository root,
//! from the path in the `LICSYNC_CONFIG` environment variable, or from
//! `--config`. The loaded value is immutable after startup and passed by
//! reference into each component.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

use crate::comment::FileKind;
use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".licsync.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "LICSYNC_CONFIG";

/// Main configuration struct for licsync.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  /// Project name substituted into the banner and license text.
  pub project: String,

  /// The fixed copyright-attribution identity for years derived from git
  /// history.
  pub holder: String,

  /// Anchored regular expressions; a candidate path must match one of them.
  /// Defaults to everything.
  #[serde(default = "default_whitelist")]
  pub whitelist: Vec<String>,

  /// Anchored regular expressions; a candidate path must match none of them.
  #[serde(default)]
  pub blacklist: Vec<String>,

  /// Full commit ids excluded from year extraction (administrative commits
  /// such as mass reformatting).
  #[serde(default, rename = "ignored-commits")]
  pub ignored_commits: HashSet<String>,

  /// Extension-to-file-type table. Keys are extensions without the leading
  /// dot; values are file-type tags (`cpp`, `py`, `sh`, `cmake`).
  #[serde(default = "default_file_types", rename = "file-types")]
  pub file_types: HashMap<String, String>,

  /// Optional custom license template file; the built-in GPLv3 notice is
  /// used when absent.
  #[serde(default, rename = "license-template")]
  pub license_template: Option<PathBuf>,
}

fn default_whitelist() -> Vec<String> {
  vec![".*".to_string()]
}

fn default_file_types() -> HashMap<String, String> {
  [
    ("cpp", "cpp"),
    ("h", "cpp"),
    ("py", "py"),
    ("sh", "sh"),
    ("cmake", "cmake"),
  ]
  .into_iter()
  .map(|(k, v)| (k.to_string(), v.to_string()))
  .collect()
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

  /// A whitelist or blacklist pattern is not a valid regular expression.
  #[error("Invalid path pattern '{pattern}': {source}")]
  InvalidPattern { pattern: String, source: regex::Error },

  /// A file-type table entry names an unrecognized tag.
  #[error("Invalid file type tag '{tag}' for extension '{extension}'")]
  InvalidFileType { extension: String, tag: String },

  /// A required field is missing or empty.
  #[error("Invalid config: {0}")]
  Invalid(String),
}

impl Config {
  /// Creates a configuration from the required identity fields, with default
  /// rules and type table.
  pub fn with_identity(project: impl Into<String>, holder: impl Into<String>) -> Self {
    Self {
      project: project.into(),
      holder: holder.into(),
      whitelist: default_whitelist(),
      blacklist: Vec::new(),
      ignored_commits: HashSet::new(),
      file_types: default_file_types(),
      license_template: None,
    }
  }

  /// Load configuration from a file.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or parsed, or if the parsed
  /// configuration fails validation.
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

    verbose_log!(
      "Loaded config: {} whitelist rule(s), {} blacklist rule(s), {} ignored commit(s)",
      config.whitelist.len(),
      config.blacklist.len(),
      config.ignored_commits.len()
    );

    Ok(config)
  }

  /// Validate the configuration.
  ///
  /// Checks that:
  /// - `project` and `holder` are non-empty
  /// - all whitelist/blacklist patterns compile as regular expressions
  /// - every file-type tag resolves to a recognized kind
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.project.trim().is_empty() {
      return Err(ConfigError::Invalid("project must not be empty".to_string()));
    }
    if self.holder.trim().is_empty() {
      return Err(ConfigError::Invalid("holder must not be empty".to_string()));
    }

    for pattern in self.whitelist.iter().chain(&self.blacklist) {
      regex::Regex::new(&format!("^{pattern}$")).map_err(|e| ConfigError::InvalidPattern {
        pattern: pattern.clone(),
        source: e,
      })?;
    }

    for (extension, tag) in &self.file_types {
      if FileKind::from_tag(tag).is_err() {
        return Err(ConfigError::InvalidFileType {
          extension: extension.clone(),
          tag: tag.clone(),
        });
      }
    }

    Ok(())
  }
}

/// Determines the config file path to use based on CLI args, environment,
/// and the repository root.
///
/// Priority order:
/// 1. Explicit `--config` path (error if it doesn't exist)
/// 2. `LICSYNC_CONFIG` environment variable (error if it doesn't exist)
/// 3. `.licsync.toml` in the repository root (no error if missing)
///
/// Returns `None` if no config file is found or `no_config` is set.
pub fn load_config(cli_path: Option<&Path>, repo_root: &Path, no_config: bool) -> Result<Option<Config>> {
  if no_config {
    verbose_log!("Config loading disabled via --no-config");
    return Ok(None);
  }

  if let Some(path) = cli_path {
    let config = Config::load(path)?;
    return Ok(Some(config));
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(env_path);
    let config = Config::load(&path)?;
    return Ok(Some(config));
  }

  let default_path = repo_root.join(DEFAULT_CONFIG_FILENAME);
  if default_path.exists() {
    let config = Config::load(&default_path)?;
    return Ok(Some(config));
  }

  verbose_log!("No config file found");
  Ok(None)
}
