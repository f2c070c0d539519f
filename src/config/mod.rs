//! Configuration module
//!
//! Handles CLI argument parsing, TOML configuration files, and validation for
//! the bench harness.

pub mod cli;
pub mod cli_convert;
pub mod toml;
pub mod validator;
pub mod workload;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
pub use workload::{BinomialCase, WorkloadConfig, WorkloadKind};

/// Complete bench configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Base seed; trial `t` of workload `w` uses a seed derived from it
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Worker threads (defaults to the number of CPUs)
    #[serde(default)]
    pub threads: Option<usize>,
    /// Independent trials per measurement
    #[serde(default = "default_trials")]
    pub trials: usize,
    /// Calls per trial
    #[serde(default = "default_iterations")]
    pub iterations: u64,
    /// Calls per timed batch within a trial
    #[serde(default = "default_batch_size")]
    pub batch_size: u64,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default = "default_workloads", rename = "workload")]
    pub workloads: Vec<WorkloadConfig>,
}

fn default_seed() -> u64 {
    42
}

fn default_trials() -> usize {
    16
}

fn default_iterations() -> u64 {
    1_000_000
}

fn default_batch_size() -> u64 {
    10_000
}

fn default_workloads() -> Vec<WorkloadConfig> {
    WorkloadKind::ALL
        .iter()
        .map(|kind| kind.default_config())
        .collect()
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            threads: None,
            trials: default_trials(),
            iterations: default_iterations(),
            batch_size: default_batch_size(),
            output: OutputConfig::default(),
            workloads: default_workloads(),
        }
    }
}

impl BenchConfig {
    /// Thread pool size: the configured count, or one per CPU
    pub fn effective_threads(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get).max(1)
    }
}

impl fmt::Display for BenchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "seed:       {}", self.seed)?;
        writeln!(f, "threads:    {}", self.effective_threads())?;
        writeln!(f, "trials:     {}", self.trials)?;
        writeln!(f, "iterations: {} (batches of {})", self.iterations, self.batch_size)?;
        writeln!(f, "output:     {}", self.output.format)?;
        for workload in &self.workloads {
            writeln!(f, "workload:   {}", workload)?;
        }
        Ok(())
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Write the JSON report here instead of stdout
    pub json_output: Option<PathBuf>,
}

/// Report format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Build the effective configuration from the command line
///
/// With `--config`, the file is loaded and CLI values override it; otherwise
/// defaults are used. The result is validated.
pub fn load(cli: &cli::Cli) -> Result<BenchConfig> {
    let config = match &cli.config {
        Some(path) => {
            let config = self::toml::parse_toml_file(path)?;
            self::toml::merge_cli_with_config(cli, config)?
        }
        None => cli_convert::cli_to_config(cli)?,
    };
    validator::validate_config(&config)?;
    Ok(config)
}
