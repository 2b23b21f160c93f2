//! flat-config
//!
//! Merges config files and environment variables into one flat, dot-keyed
//! table and prints lookups from it.

use anyhow::{Context, Result};
use clap::Parser;
use flat_config::cli::Cli;
use flat_config::format::{OutputFormat, format_error_json};
use flat_config::logging::{LogTarget, init_logging};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&LogTarget::parse(&cli.log), cli.verbose)?;

    match cli.execute() {
        Ok(output) => {
            print!("{}", output);
            Ok(())
        }
        Err(err) if cli.format == OutputFormat::Json => {
            print!("{}", format_error_json(&err));
            std::process::exit(1);
        }
        Err(err) => Err(err).context("flat-config failed"),
    }
}
