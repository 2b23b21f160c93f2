//! Integration tests for loading config files into a FlatConfig.
//!
//! Covers:
//! - read_from_file() / load_file() flattening and prefixes
//! - override behaviour across repeated loads
//! - IO, parse and schema failures

use flat_config::{ConfigError, ErrorCode, FileFormat, FlatConfig};
use serde_json::{Value, json};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Write `content` to `name` inside the temp dir and return its path.
fn write_file(temp: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = temp.path().join(name);
    fs::write(&path, content).expect("Failed to write config file");
    path
}

/// Collect every leaf of a nested tree as (dotted path, value).
fn leaves(value: &Value, prefix: &str, out: &mut Vec<(String, Value)>) {
    match value {
        Value::Object(map) => {
            for (k, v) in map {
                let key = if prefix.is_empty() {
                    k.clone()
                } else {
                    format!("{}.{}", prefix, k)
                };
                leaves(v, &key, out);
            }
        }
        leaf => out.push((prefix.to_string(), leaf.clone())),
    }
}

fn sample_tree() -> Value {
    json!({
        "server": {
            "host": "localhost",
            "port": 8080,
            "tls": { "enabled": false, "ciphers": ["a", "b"] }
        },
        "debug": true,
        "ratio": 0.25,
        "owner": null
    })
}

#[test]
fn test_every_leaf_path_round_trips() {
    let temp = TempDir::new().unwrap();
    let tree = sample_tree();
    let path = write_file(&temp, "app.json", &tree.to_string());

    let config = FlatConfig::read_from_file(&path).unwrap();

    let mut expected = Vec::new();
    leaves(&tree, "", &mut expected);
    assert_eq!(config.len(), expected.len());
    for (key, value) in expected {
        assert_eq!(config.get(&key), Some(&value), "key: {}", key);
    }
}

#[test]
fn test_no_value_is_an_object_after_load() {
    let temp = TempDir::new().unwrap();
    let path = write_file(&temp, "app.json", &sample_tree().to_string());

    let config = FlatConfig::read_from_file(&path).unwrap();
    assert!(config.iter().all(|(_, v)| !v.is_object()));
    assert!(!config.contains_key("server"));
    assert!(!config.contains_key("server.tls"));
}

#[test]
fn test_destination_prefix() {
    let temp = TempDir::new().unwrap();
    let path = write_file(&temp, "svc.json", r#"{"a": 1}"#);

    let mut config = FlatConfig::new();
    config.load_file(&path, "svc", false).unwrap();

    assert_eq!(config.as_int("svc.a").unwrap(), 1);
    assert!(config.get("a").is_none());
}

#[test]
fn test_reload_without_override_keeps_first_values() {
    let temp = TempDir::new().unwrap();
    let first = write_file(&temp, "first.json", r#"{"a": 1, "b": {"c": "one"}}"#);
    let second = write_file(&temp, "second.json", r#"{"a": 2, "b": {"c": "two", "d": 4}}"#);

    let mut config = FlatConfig::new();
    config.load_file(&first, "", false).unwrap();
    config.load_file(&second, "", false).unwrap();

    assert_eq!(config.as_int("a").unwrap(), 1);
    assert_eq!(config.as_string("b.c"), "one");
    // new keys still arrive
    assert_eq!(config.as_int("b.d").unwrap(), 4);
}

#[test]
fn test_same_file_twice_is_stable() {
    let temp = TempDir::new().unwrap();
    let path = write_file(&temp, "app.json", &sample_tree().to_string());

    let mut config = FlatConfig::read_from_file(&path).unwrap();
    let before = config.clone();
    config.load_file(&path, "", false).unwrap();
    assert_eq!(config, before);
}

#[test]
fn test_reload_with_override_takes_second_values() {
    let temp = TempDir::new().unwrap();
    let first = write_file(&temp, "first.json", r#"{"a": 1, "b": {"c": "one"}, "keep": true}"#);
    let second = write_file(&temp, "second.json", r#"{"a": 2, "b": {"c": "two"}}"#);

    let mut config = FlatConfig::new();
    config.load_file(&first, "", false).unwrap();
    config.load_file(&second, "", true).unwrap();

    assert_eq!(config.as_int("a").unwrap(), 2);
    assert_eq!(config.as_string("b.c"), "two");
    assert!(config.as_bool("keep").unwrap());
}

#[test]
fn test_typed_accessors_on_file_values() {
    let temp = TempDir::new().unwrap();
    let path = write_file(
        &temp,
        "values.json",
        r#"{"answer": 42, "almost": 42.9, "word": "hello", "flag": true, "list": [1,2,3]}"#,
    );
    let config = FlatConfig::read_from_file(&path).unwrap();

    assert_eq!(config.as_int("answer").unwrap(), 42);
    assert_eq!(config.as_int("almost").unwrap(), 42);
    assert!(matches!(config.as_int("word"), Err(ConfigError::Type { .. })));
    assert!(matches!(config.as_int("absent"), Err(ConfigError::Type { .. })));

    assert_eq!(config.as_string("absent"), "");
    assert_eq!(config.as_string("flag"), "true");
    assert_eq!(config.as_string("list"), "[1,2,3]");
}

#[test]
fn test_missing_file_is_io_error() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope.json");

    let err = FlatConfig::read_from_file(&missing).unwrap_err();
    assert_eq!(err.code(), ErrorCode::IoError);
    match err {
        ConfigError::Io { path, source } => {
            assert_eq!(path, missing);
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_malformed_json_is_parse_error() {
    let temp = TempDir::new().unwrap();
    let path = write_file(&temp, "bad.json", r#"{"a": 1,"#);

    let err = FlatConfig::read_from_file(&path).unwrap_err();
    assert_eq!(err.code(), ErrorCode::ParseError);
    assert!(err.to_string().contains("bad.json"));
}

#[test]
fn test_array_root_is_schema_error() {
    let temp = TempDir::new().unwrap();
    let path = write_file(&temp, "list.json", "[1, 2, 3]");

    let err = FlatConfig::read_from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Schema { found: "array", .. }));
    assert!(err.to_string().contains("must be an object"));
}

#[test]
fn test_failed_load_leaves_store_untouched() {
    let temp = TempDir::new().unwrap();
    let good = write_file(&temp, "good.json", r#"{"a": 1}"#);
    let bad = write_file(&temp, "bad.json", "[{\"a\": 2}]");

    let mut config = FlatConfig::read_from_file(&good).unwrap();
    assert!(config.load_file(&bad, "", true).is_err());
    assert_eq!(config.len(), 1);
    assert_eq!(config.as_int("a").unwrap(), 1);
}

#[test]
fn test_yaml_file_flattens_like_json() {
    let temp = TempDir::new().unwrap();
    let yaml = r#"
server:
  host: localhost
  port: 8080
features: [a, b]
"#;
    let path = write_file(&temp, "app.yaml", yaml);

    let mut config = FlatConfig::new();
    config
        .load_file_with_format(&path, FileFormat::from_path(&path), "app", false)
        .unwrap();

    assert_eq!(config.as_string("app.server.host"), "localhost");
    assert_eq!(config.as_int("app.server.port").unwrap(), 8080);
    assert_eq!(config.get("app.features"), Some(&json!(["a", "b"])));
}

#[test]
fn test_yaml_scalar_root_is_schema_error() {
    let temp = TempDir::new().unwrap();
    let path = write_file(&temp, "scalar.yml", "just a string\n");

    let mut config = FlatConfig::new();
    let err = config
        .load_file_with_format(&path, FileFormat::Yaml, "", false)
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::SchemaError);
    assert!(err.to_string().starts_with("top-level YAML value"));
}

#[test]
fn test_invalid_utf8_is_parse_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("binary.json");
    fs::write(&path, [b'{', b'"', 0xff, 0xfe, b'"', b':', b'1', b'}']).unwrap();

    let err = FlatConfig::read_from_file(&path).unwrap_err();
    assert_eq!(err.code(), ErrorCode::ParseError);
}
