//! The flat, dot-keyed config store and its typed accessors.

use super::merge::{nested_merge, value_kind};
use crate::error::{ConfigError, ConfigResult};
use crate::format::render_value;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Concrete storage for merged configuration. Keys are dot-delimited paths.
///
/// After any merge, no entry holds an object: nested objects are always
/// decomposed into leaf keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatConfig {
    entries: HashMap<String, Value>,
}

impl FlatConfig {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten `object` into the store under `dest_prefix`.
    ///
    /// Returns the number of keys written.
    pub fn merge_object(
        &mut self,
        object: Map<String, Value>,
        dest_prefix: &str,
        override_existing: bool,
    ) -> usize {
        nested_merge(&mut self.entries, object, dest_prefix, override_existing)
    }

    /// Look up a value by its dotted key.
    ///
    /// A key stored with a JSON `null` returns `Some(&Value::Null)`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Whether the key is present with a non-null value.
    ///
    /// `false` and `0` count as present; use [`contains_key`](Self::contains_key)
    /// to also see keys explicitly set to null.
    pub fn has_key(&self, key: &str) -> bool {
        matches!(self.entries.get(key), Some(value) if !value.is_null())
    }

    /// Whether the key is present at all, including with a null value.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// The value rendered as a string, or `""` when absent or null.
    pub fn as_string(&self, key: &str) -> String {
        self.get(key).map(render_value).unwrap_or_default()
    }

    /// The value as an integer, truncated toward zero.
    ///
    /// Fails with [`ConfigError::Type`] unless the value is a number.
    /// Values outside the `i64` range saturate.
    pub fn as_int(&self, key: &str) -> ConfigResult<i64> {
        match self.get(key) {
            Some(Value::Number(n)) => {
                if let Some(i) = n.as_i64() {
                    return Ok(i);
                }
                // u64 above i64::MAX or a float; `as` truncates and saturates
                Ok(n.as_f64().map(|f| f as i64).unwrap_or(i64::MAX))
            }
            other => Err(ConfigError::type_mismatch(key, "numeric", kind_of(other))),
        }
    }

    /// The value as a floating point number.
    pub fn as_f64(&self, key: &str) -> ConfigResult<f64> {
        match self.get(key) {
            Some(Value::Number(n)) => n
                .as_f64()
                .ok_or_else(|| ConfigError::type_mismatch(key, "numeric", "number")),
            other => Err(ConfigError::type_mismatch(key, "numeric", kind_of(other))),
        }
    }

    /// The value as a boolean. Strings such as `"true"` are not coerced.
    pub fn as_bool(&self, key: &str) -> ConfigResult<bool> {
        match self.get(key) {
            Some(Value::Bool(b)) => Ok(*b),
            other => Err(ConfigError::type_mismatch(key, "boolean", kind_of(other))),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All keys, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// All keys in lexicographic order.
    pub fn sorted_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.keys().collect();
        keys.sort_unstable();
        keys
    }

    /// All entries, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The store as a flat JSON object keyed by dotted path.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Value::Object(map)
    }
}

fn kind_of(value: Option<&Value>) -> &'static str {
    value.map(value_kind).unwrap_or("missing value")
}
