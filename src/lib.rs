//! Flat Config Library
//!
//! Loads settings from JSON/YAML files and environment variables into a
//! single dot-keyed table with typed accessors.

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;

pub use config::{EnvSource, FileFormat, FlatConfig, ProcessEnv, StaticEnv};
pub use error::{ConfigError, ConfigResult, ErrorCode, ErrorReport};
