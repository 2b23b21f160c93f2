//! Flat configuration store.
//!
//! Collapses settings from several sources into one table keyed by
//! dot-delimited paths:
//! 1. **Files** - JSON (or YAML) documents whose root is an object; nested
//!    objects become `parent.child` keys
//! 2. **Environment** - variables selected by name prefix, stored as string
//!    leaves
//!
//! ## Merge Strategy
//! - Objects are flattened recursively; arrays, scalars and nulls are leaves
//! - Each source can be placed under a destination prefix (`svc` -> `svc.key`)
//! - On key conflicts the first value wins unless the merge overrides
//!
//! ## Example
//! ```
//! use flat_config::config::{FlatConfig, StaticEnv};
//! use serde_json::json;
//!
//! let mut config = FlatConfig::new();
//! config.merge_value(json!({"db": {"port": 5432}}), "", false).unwrap();
//! config.load_environment_from(&StaticEnv::new([("APP_MODE", "dev")]), "APP_", "env", false);
//!
//! assert_eq!(config.as_int("db.port").unwrap(), 5432);
//! assert_eq!(config.as_string("env.APP_MODE"), "dev");
//! ```

mod env;
mod loader;
mod merge;
mod store;

pub use env::{EnvSource, ProcessEnv, StaticEnv, collect_prefixed, parse_env_entry};
pub use loader::FileFormat;
pub use merge::{join_key, nested_merge, value_kind};
pub use store::FlatConfig;
