//! Unified Error Type System
//!
//! Centralized error type for configuration assembly and export parsing.
//!
//! ## Failure Surface
//!
//! - Environment file loading never fails: problems are reported through
//!   [`EnvFileStatus`](crate::config::EnvFileStatus) and logged, not returned
//! - Settings extraction, export parsing and CLI file I/O use [`ConfigError`]

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    /// Layered settings could not be extracted
    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Parse error in {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Unknown plugin: {0}")]
    UnknownPlugin(String),

    #[error("Invalid plugin entry: {0}")]
    InvalidPlugin(String),

    #[error("Unsupported format: {0} (expected json or yaml)")]
    UnsupportedFormat(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::Settings(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Attach file context to parse failures
pub trait ResultExt<T> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|err| match err {
            ConfigError::Json(e) => ConfigError::Parse {
                path: path.as_ref().display().to_string(),
                message: e.to_string(),
            },
            ConfigError::Yaml(e) => ConfigError::Parse {
                path: path.as_ref().display().to_string(),
                message: e.to_string(),
            },
            other => other,
        })
    }
}
