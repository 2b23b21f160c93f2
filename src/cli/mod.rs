//! CLI command definitions for flat-config
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

use crate::config::{FileFormat, FlatConfig};
use crate::error::ConfigResult;
use crate::format::{OutputFormat, format_config};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};

/// A `--file` argument: `PATH`, or `PREFIX=PATH` to nest the file's keys
/// under `PREFIX`.
///
/// Text before the first `=` is only taken as a prefix when it has no path
/// separator, so `/tmp/a=b.json` is a plain path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSpec {
    pub prefix: String,
    pub path: PathBuf,
}

impl FileSpec {
    pub fn parse(value: &str) -> Result<Self, String> {
        let (prefix, path) = match value.split_once('=') {
            Some((prefix, path)) if !prefix.contains(['/', '\\']) => (prefix, path),
            _ => ("", value),
        };
        if path.is_empty() {
            return Err(format!("missing file path in '{}'", value));
        }
        Ok(Self {
            prefix: prefix.to_string(),
            path: PathBuf::from(path),
        })
    }
}

/// Merge config files and environment variables into one flat key table
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file to merge, as PATH or PREFIX=PATH (repeatable, merged in order).
    /// A `=` after a path separator is part of the path
    #[arg(short, long = "file", value_name = "[PREFIX=]PATH", value_parser = FileSpec::parse, global = true)]
    pub files: Vec<FileSpec>,

    /// Merge environment variables whose names start with this prefix ("" for all)
    #[arg(short, long = "env", value_name = "PREFIX", global = true)]
    pub env_prefix: Option<String>,

    /// Namespace for merged environment variables
    #[arg(long, value_name = "PREFIX", default_value = "", global = true)]
    pub env_dest: String,

    /// Later sources replace keys set by earlier ones
    #[arg(short = 'o', long = "override", global = true)]
    pub override_existing: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format for dumps and error reports
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print every key and value (default if no subcommand given)
    Dump,

    /// Print a value as a string (empty when missing)
    Get(KeyArgs),

    /// Print a numeric value truncated to an integer
    Int(KeyArgs),

    /// Print whether a key holds a non-null value
    Has(KeyArgs),
}

#[derive(Args, Debug)]
pub struct KeyArgs {
    /// Dot-delimited key, e.g. `server.port`
    pub key: String,
}

impl Cli {
    /// Build the store from the command-line sources: files first, in order,
    /// then the environment.
    pub fn build_config(&self) -> ConfigResult<FlatConfig> {
        let mut config = FlatConfig::new();

        for spec in &self.files {
            let format = FileFormat::from_path(&spec.path);
            config.load_file_with_format(
                &spec.path,
                format,
                &spec.prefix,
                self.override_existing,
            )?;
            info!(path = %spec.path.display(), prefix = %spec.prefix, "Loaded config file");
        }

        if let Some(ref prefix) = self.env_prefix {
            config.load_environment(prefix, &self.env_dest, self.override_existing);
            info!(prefix = %prefix, dest = %self.env_dest, "Loaded environment");
        }

        Ok(config)
    }

    /// Build the store and produce the output of the selected command.
    pub fn execute(&self) -> ConfigResult<String> {
        let config = self.build_config()?;
        debug!(keys = config.len(), "Configuration ready");

        let output = match &self.command {
            None | Some(Command::Dump) => format_config(&config, self.format),
            Some(Command::Get(args)) => format!("{}\n", config.as_string(&args.key)),
            Some(Command::Int(args)) => format!("{}\n", config.as_int(&args.key)?),
            Some(Command::Has(args)) => format!("{}\n", config.has_key(&args.key)),
        };
        Ok(output)
    }
}
