//! TOML configuration file parsing
//!
//! ```toml
//! seed = 7
//! trials = 32
//! iterations = 2000000
//!
//! [output]
//! format = "json"
//! json_output = "report.json"
//!
//! [[workload]]
//! kind = "biased_int"
//! bounds = [3, 1000, 1431655765]
//!
//! [[workload]]
//! kind = "binomial"
//! cases = [{ n = 20, p = 0.5 }, { n = 1000, p = 0.3 }]
//! ```

use super::cli::Cli;
use super::cli_convert::apply_cli_overrides;
use super::BenchConfig;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<BenchConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
pub fn parse_toml_string(contents: &str) -> Result<BenchConfig> {
    let config: BenchConfig =
        ::toml::from_str(contents).context("Failed to parse TOML configuration")?;

    Ok(config)
}

/// Merge CLI arguments with TOML configuration (CLI takes precedence)
pub fn merge_cli_with_config(cli: &Cli, mut config: BenchConfig) -> Result<BenchConfig> {
    apply_cli_overrides(&mut config, cli)?;
    Ok(config)
}
