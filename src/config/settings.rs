//! TOML-based configuration.
//!
//! Example configuration:
//! ```toml
//! [search]
//! max_candidates = 10
//! min_confidence = 0.3
//!
//! [execute]
//! timeout_secs = 30
//! max_retries = 2
//! backoff_ms = 100
//! ```
//!
//! Every field has a default, so an empty document is a valid config.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub search: SearchSettings,
    pub execute: ExecuteSettings,
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }

    /// Parse settings from a TOML document.
    pub fn from_toml(raw: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(raw)?)
    }
}

/// Resolver tuning.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Maximum candidates returned per search.
    pub max_candidates: usize,
    /// Candidates scoring below this are dropped.
    pub min_confidence: f64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            max_candidates: 10,
            min_confidence: 0.3,
        }
    }
}

/// Executor tuning.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExecuteSettings {
    /// Per-call deadline handed to the datasource connector.
    pub timeout_secs: u64,
    /// Retry budget for transient connectivity failures.
    pub max_retries: u32,
    /// Initial backoff between retries; doubles per attempt.
    pub backoff_ms: u64,
}

impl ExecuteSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ExecuteSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_retries: 2,
            backoff_ms: 100,
        }
    }
}
