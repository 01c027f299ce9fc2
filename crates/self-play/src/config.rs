//! Configuration file loading for self-play.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use validator_core::PositionRecord;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Self-play settings. Command-line flags take precedence over these.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct SelfPlayConfig {
    /// Record the game starts from. Defaults to the initial position.
    #[serde(default = "default_start")]
    pub start: String,
    /// Stop after this many plies even without a result.
    #[serde(default = "default_max_plies")]
    pub max_plies: u32,
    /// RNG seed; a fresh seed is drawn from the OS when absent.
    #[serde(default = "default_seed")]
    pub seed: Option<u64>,
}

fn default_start() -> String {
    PositionRecord::STARTPOS.to_string()
}

fn default_max_plies() -> u32 {
    500
}

fn default_seed() -> Option<u64> {
    None
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            start: default_start(),
            max_plies: default_max_plies(),
            seed: default_seed(),
        }
    }
}

impl SelfPlayConfig {
    /// Loads the configuration at `path`, or the defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// `self-play.toml` in the current working directory.
    pub fn default_path() -> PathBuf {
        PathBuf::from("self-play.toml")
    }
}
