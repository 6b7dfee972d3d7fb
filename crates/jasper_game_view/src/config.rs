//! Sync configuration for a game view.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// How a game view saves and re-merges its comment.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Save attempts before giving up on repeated version conflicts.
    #[serde(default = "default_max_merge_attempts")]
    max_merge_attempts: u32,

    /// Separator used when joining log lines into a comment.
    #[serde(default = "default_line_separator")]
    line_separator: String,
}

#[instrument]
fn default_max_merge_attempts() -> u32 {
    3
}

#[instrument]
fn default_line_separator() -> String {
    jasper_backgammon::LINE_SEPARATOR.to_string()
}

impl SyncConfig {
    /// Creates a configuration with explicit values.
    #[instrument]
    pub fn new(max_merge_attempts: u32, line_separator: String) -> Self {
        Self {
            max_merge_attempts,
            line_separator,
        }
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(max_merge_attempts = config.max_merge_attempts, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        if config.max_merge_attempts == 0 {
            return Err(ConfigError::new(
                "max_merge_attempts must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::new(default_max_merge_attempts(), default_line_separator())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
