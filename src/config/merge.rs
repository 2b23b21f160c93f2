//! Flattening merge from nested JSON objects into dot-keyed entries.
//!
//! Objects are decomposed recursively; every other value (including arrays
//! and nulls) is stored whole under its dotted path.

use serde_json::{Map, Value};
use std::collections::HashMap;

/// Join a namespace prefix and a key with a `.` separator.
///
/// An empty prefix yields the key unchanged.
pub fn join_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

/// Flatten `object` into `entries` under `prefix`.
///
/// - Nested objects recurse with the child key appended to the prefix
/// - Leaves are written when the key is absent, or always when `override_existing` is set
/// - With `override_existing` off the first write for a key wins
///
/// Returns the number of keys written.
///
/// # Example
/// ```
/// use serde_json::json;
/// use std::collections::HashMap;
/// use flat_config::config::nested_merge;
///
/// let mut entries = HashMap::new();
/// let tree = json!({ "server": { "port": 8080 }, "debug": true });
/// let written = nested_merge(&mut entries, tree.as_object().unwrap().clone(), "app", false);
/// assert_eq!(written, 2);
/// assert_eq!(entries["app.server.port"], json!(8080));
/// ```
pub fn nested_merge(
    entries: &mut HashMap<String, Value>,
    object: Map<String, Value>,
    prefix: &str,
    override_existing: bool,
) -> usize {
    let mut written = 0;

    for (key, value) in object {
        let full_key = join_key(prefix, &key);
        match value {
            Value::Object(child) => {
                written += nested_merge(entries, child, &full_key, override_existing);
            }
            leaf => {
                if override_existing || !entries.contains_key(&full_key) {
                    entries.insert(full_key, leaf);
                    written += 1;
                }
            }
        }
    }

    written
}

/// Name of a value's variant, for error messages.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
