//! Environment variable sources.
//!
//! The merge logic never reads the process environment directly; it asks an
//! [`EnvSource`] for name/value pairs so tests can supply a fixed set.

use serde_json::{Map, Value};

/// A provider of environment name/value pairs.
pub trait EnvSource {
    /// Snapshot of all variables visible to this source.
    fn vars(&self) -> Vec<(String, String)>;
}

/// The current process environment.
///
/// Names or values that are not valid UTF-8 are converted lossily.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn vars(&self) -> Vec<(String, String)> {
        std::env::vars_os()
            .map(|(name, value)| {
                (
                    name.to_string_lossy().into_owned(),
                    value.to_string_lossy().into_owned(),
                )
            })
            .collect()
    }
}

/// A fixed set of variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticEnv {
    vars: Vec<(String, String)>,
}

impl StaticEnv {
    /// Create a source from name/value pairs.
    pub fn new<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Create a source from raw `NAME=VALUE` entries.
    ///
    /// See [`parse_env_entry`] for how each entry is split.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            vars: entries
                .into_iter()
                .map(|entry| parse_env_entry(entry.as_ref()))
                .collect(),
        }
    }
}

impl EnvSource for StaticEnv {
    fn vars(&self) -> Vec<(String, String)> {
        self.vars.clone()
    }
}

/// Split a raw `NAME=VALUE` entry on its first `=`.
///
/// An entry without `=` is a name with an empty value.
pub fn parse_env_entry(entry: &str) -> (String, String) {
    match entry.split_once('=') {
        Some((name, value)) => (name.to_string(), value.to_string()),
        None => (entry.to_string(), String::new()),
    }
}

/// Collect the variables whose names start with `prefix` into a flat object
/// of string leaves. An empty prefix keeps everything.
///
/// If a source reports the same name twice the later value is kept.
pub fn collect_prefixed(source: &impl EnvSource, prefix: &str) -> Map<String, Value> {
    source
        .vars()
        .into_iter()
        .filter(|(name, _)| name.starts_with(prefix))
        .map(|(name, value)| (name, Value::String(value)))
        .collect()
}
