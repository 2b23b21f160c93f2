//! Structured error types for config loading and lookups.

use crate::config::FileFormat;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    IoError,
    ParseError,
    SchemaError,
    TypeError,
}

/// Errors raised while ingesting config sources or reading typed values.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be opened or read.
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid in its declared format.
    #[error("invalid {format} in {origin}: {source}")]
    Parse {
        origin: String,
        format: FileFormat,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The document decoded, but its root is not an object.
    #[error("top-level {format} value in {origin} must be an object, found {found}")]
    Schema {
        origin: String,
        format: FileFormat,
        found: &'static str,
    },

    /// A typed accessor found a missing or differently-typed value.
    #[error("expected {expected} config value for '{key}', found {found}")]
    Type {
        key: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl ConfigError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ConfigError::Io { .. } => ErrorCode::IoError,
            ConfigError::Parse { .. } => ErrorCode::ParseError,
            ConfigError::Schema { .. } => ErrorCode::SchemaError,
            ConfigError::Type { .. } => ErrorCode::TypeError,
        }
    }

    pub(crate) fn type_mismatch(key: &str, expected: &'static str, found: &'static str) -> Self {
        ConfigError::Type {
            key: key.to_string(),
            expected,
            found,
        }
    }
}

/// Serializable form of a [`ConfigError`] for machine-readable output.
#[derive(Debug, Serialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
}

impl From<&ConfigError> for ErrorReport {
    fn from(err: &ConfigError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

/// Result type for config operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
