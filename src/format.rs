//! Output formatting for config values and whole stores.

use crate::config::FlatConfig;
use crate::error::{ConfigError, ErrorReport};
use clap::ValueEnum;
use serde_json::{Number, Value};

/// Output format for dumps and error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One `key = value` line per entry
    #[default]
    Text,
    /// A single flat JSON object
    Json,
}

/// Render a value the way `as_string` reports it.
///
/// Strings are returned verbatim, null renders as the empty string, and
/// arrays or objects render as compact JSON.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => render_number(n),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Render a number without regard to whether it was written as an integer:
/// `5.0` and `5` both render as `5`.
fn render_number(n: &Number) -> String {
    match n.as_f64() {
        Some(f)
            if n.is_f64()
                && f.fract() == 0.0
                && f >= i64::MIN as f64
                && f < i64::MAX as f64 =>
        {
            (f as i64).to_string()
        }
        _ => n.to_string(),
    }
}

/// Format every entry as `key = value`, sorted by key.
pub fn format_text(config: &FlatConfig) -> String {
    let mut out = String::new();
    for key in config.sorted_keys() {
        if let Some(value) = config.get(key) {
            out.push_str(&format!("{} = {}\n", key, render_value(value)));
        }
    }
    out
}

/// Format the store as a pretty-printed flat JSON object.
pub fn format_json(config: &FlatConfig) -> String {
    // A map of strings to plain values always serializes
    let mut out = serde_json::to_string_pretty(&config.to_json()).unwrap_or_default();
    out.push('\n');
    out
}

/// Format an error as a `{"code": ..., "message": ...}` JSON object.
pub fn format_error_json(err: &ConfigError) -> String {
    let mut out = serde_json::to_string(&ErrorReport::from(err)).unwrap_or_default();
    out.push('\n');
    out
}

/// Format the store in the requested output format.
pub fn format_config(config: &FlatConfig, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_text(config),
        OutputFormat::Json => format_json(config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_scalars() {
        assert_eq!(render_value(&json!("hello")), "hello");
        assert_eq!(render_value(&json!(3.14)), "3.14");
        assert_eq!(render_value(&json!(42)), "42");
        assert_eq!(render_value(&json!(true)), "true");
        assert_eq!(render_value(&json!(null)), "");
    }

    #[test]
    fn test_render_whole_floats_like_integers() {
        assert_eq!(render_value(&json!(5.0)), "5");
        assert_eq!(render_value(&json!(5.0)), render_value(&json!(5)));
        assert_eq!(render_value(&json!(-3.0)), "-3");
        assert_eq!(render_value(&json!(2.5)), "2.5");
        assert_eq!(render_value(&json!(u64::MAX)), u64::MAX.to_string());
    }

    #[test]
    fn test_render_array_as_compact_json() {
        assert_eq!(render_value(&json!([1, 2, 3])), "[1,2,3]");
        assert_eq!(render_value(&json!(["a", "b"])), r#"["a","b"]"#);
    }

    #[test]
    fn test_format_text_is_sorted() {
        let mut config = FlatConfig::new();
        config
            .merge_value(json!({"b": 2, "a": {"x": "y"}}), "", false)
            .unwrap();
        assert_eq!(format_text(&config), "a.x = y\nb = 2\n");
    }

    #[test]
    fn test_format_json_is_flat() {
        let mut config = FlatConfig::new();
        config
            .merge_value(json!({"a": {"b": [1]}}), "", false)
            .unwrap();
        let parsed: Value = serde_json::from_str(&format_json(&config)).unwrap();
        assert_eq!(parsed, json!({"a.b": [1]}));
    }

    #[test]
    fn test_format_error_json() {
        let mut config = FlatConfig::new();
        let err = config.merge_value(json!([1]), "", false).unwrap_err();
        let parsed: Value = serde_json::from_str(&format_error_json(&err)).unwrap();
        assert_eq!(parsed["code"], json!("SCHEMA_ERROR"));
        assert_eq!(parsed["message"], json!(err.to_string()));
    }
}
