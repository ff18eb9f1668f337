//! Error types for lettergate-core.
//!
//! The page layer itself never fails loudly: malformed dates, unknown
//! templates and missing elements are all normal outcomes. The errors below
//! cover configuration files and letter manifests, which do have a failure
//! mode.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown dotted configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Letter manifest errors.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// Manifest could not be parsed
    #[error("Failed to parse manifest: {0}")]
    ParseFailed(String),

    /// A letter has no template reference
    #[error("Letter #{index} has an empty template reference")]
    EmptyTemplate { index: usize },

    /// Two letters point at the same template
    #[error("Template '{0}' is referenced by more than one letter")]
    DuplicateTemplate(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ScheduleError {
    fn from(err: toml::de::Error) -> Self {
        ScheduleError::ParseFailed(err.to_string())
    }
}
