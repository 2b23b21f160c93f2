//! Ingestion of config files and environment variables into a [`FlatConfig`].

use super::env::{EnvSource, ProcessEnv, collect_prefixed};
use super::merge::value_kind;
use super::store::FlatConfig;
use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Origin label used in errors for text that did not come from a file.
const INLINE_ORIGIN: &str = "<inline>";

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Document format of a config source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileFormat {
    #[default]
    Json,
    /// YAML decoded into the same value tree as JSON. Values JSON cannot
    /// represent, such as `.nan` and `.inf`, become null and so read as
    /// absent to `has_key`.
    Yaml,
}

impl FileFormat {
    /// Pick a format from the file extension: `.yaml`/`.yml` are YAML,
    /// anything else is treated as JSON.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => FileFormat::Yaml,
            _ => FileFormat::Json,
        }
    }

    fn parse(self, content: &[u8], origin: &str) -> ConfigResult<Value> {
        let parsed: Result<Value, BoxError> = match self {
            FileFormat::Json => serde_json::from_slice(content).map_err(BoxError::from),
            FileFormat::Yaml => serde_yaml::from_slice(content).map_err(BoxError::from),
        };
        parsed.map_err(|source| ConfigError::Parse {
            origin: origin.to_string(),
            format: self,
            source,
        })
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileFormat::Json => write!(f, "JSON"),
            FileFormat::Yaml => write!(f, "YAML"),
        }
    }
}

impl FlatConfig {
    /// Read a JSON config file into a new store, with no prefix and no override.
    pub fn read_from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let mut config = Self::new();
        config.load_file(path, "", false)?;
        Ok(config)
    }

    /// Read environment variables starting with `prefix` into a new store,
    /// at the top level and with no override.
    pub fn read_from_env(prefix: &str) -> Self {
        Self::read_from_env_source(&ProcessEnv, prefix)
    }

    /// Like [`read_from_env`](Self::read_from_env), over an explicit source.
    pub fn read_from_env_source(source: &impl EnvSource, prefix: &str) -> Self {
        let mut config = Self::new();
        config.load_environment_from(source, prefix, "", false);
        config
    }

    /// Read a JSON config file and merge it into the store.
    ///
    /// The file must contain a single object; its properties form the top
    /// level of `dest_prefix` (or of the store, when the prefix is empty).
    /// Existing keys are replaced only when `override_existing` is set.
    pub fn load_file(
        &mut self,
        path: impl AsRef<Path>,
        dest_prefix: &str,
        override_existing: bool,
    ) -> ConfigResult<()> {
        self.load_file_with_format(path, FileFormat::Json, dest_prefix, override_existing)
    }

    /// Read a config file in the given format and merge it into the store.
    pub fn load_file_with_format(
        &mut self,
        path: impl AsRef<Path>,
        format: FileFormat,
        dest_prefix: &str,
        override_existing: bool,
    ) -> ConfigResult<()> {
        let path = path.as_ref();
        let content = std::fs::read(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let origin = path.display().to_string();
        let written =
            self.merge_document(&content, format, &origin, dest_prefix, override_existing)?;
        debug!(
            path = %origin,
            %format,
            prefix = dest_prefix,
            written,
            "Merged config file"
        );
        Ok(())
    }

    /// Parse `content` and merge it into the store.
    pub fn load_str(
        &mut self,
        content: &str,
        format: FileFormat,
        dest_prefix: &str,
        override_existing: bool,
    ) -> ConfigResult<()> {
        self.merge_document(
            content.as_bytes(),
            format,
            INLINE_ORIGIN,
            dest_prefix,
            override_existing,
        )?;
        Ok(())
    }

    /// Merge an already-decoded tree. The root must be an object.
    ///
    /// Returns the number of keys written.
    pub fn merge_value(
        &mut self,
        value: Value,
        dest_prefix: &str,
        override_existing: bool,
    ) -> ConfigResult<usize> {
        self.merge_root(value, FileFormat::Json, INLINE_ORIGIN, dest_prefix, override_existing)
    }

    /// Merge environment variables whose names start with `source_prefix`.
    ///
    /// Values are merged as string leaves under `dest_prefix`; they are never
    /// split further, even when they contain dots.
    pub fn load_environment(
        &mut self,
        source_prefix: &str,
        dest_prefix: &str,
        override_existing: bool,
    ) {
        self.load_environment_from(&ProcessEnv, source_prefix, dest_prefix, override_existing);
    }

    /// Like [`load_environment`](Self::load_environment), over an explicit source.
    pub fn load_environment_from(
        &mut self,
        source: &impl EnvSource,
        source_prefix: &str,
        dest_prefix: &str,
        override_existing: bool,
    ) {
        let vars = collect_prefixed(source, source_prefix);
        let matched = vars.len();
        let written = self.merge_object(vars, dest_prefix, override_existing);
        debug!(
            source_prefix,
            dest_prefix, matched, written, "Merged environment variables"
        );
    }

    fn merge_document(
        &mut self,
        content: &[u8],
        format: FileFormat,
        origin: &str,
        dest_prefix: &str,
        override_existing: bool,
    ) -> ConfigResult<usize> {
        let value = format.parse(content, origin)?;
        self.merge_root(value, format, origin, dest_prefix, override_existing)
    }

    fn merge_root(
        &mut self,
        value: Value,
        format: FileFormat,
        origin: &str,
        dest_prefix: &str,
        override_existing: bool,
    ) -> ConfigResult<usize> {
        match value {
            Value::Object(object) => Ok(self.merge_object(object, dest_prefix, override_existing)),
            other => Err(ConfigError::Schema {
                origin: origin.to_string(),
                format,
                found: value_kind(&other),
            }),
        }
    }
}
