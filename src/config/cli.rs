//! CLI argument parsing using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// exactsample - timing and uniformity checks for exact random sampling
#[derive(Parser, Debug, Default)]
#[command(name = "exactsample")]
#[command(version, about, long_about = None)]
pub struct Cli {
    // === Configuration File ===
    /// TOML configuration file
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    // === Run Options ===
    /// Base seed for every trial's generator
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of worker threads (default: one per CPU)
    #[arg(short = 't', long)]
    pub threads: Option<usize>,

    /// Independent trials per measurement
    #[arg(long)]
    pub trials: Option<usize>,

    /// Calls per trial (e.g., 500000, 1M, 10k)
    #[arg(short = 'n', long)]
    pub iterations: Option<String>,

    /// Calls per timed batch (e.g., 10k)
    #[arg(long)]
    pub batch_size: Option<String>,

    /// Workloads to run, with default parameters (repeatable; default: all)
    #[arg(short = 'w', long = "workload", value_enum)]
    pub workloads: Vec<WorkloadArg>,

    // === Output Options ===
    /// Report format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormatArg>,

    /// Write the JSON report to this file (implies --format json)
    #[arg(long)]
    pub json_out: Option<PathBuf>,

    /// Dry run - validate and print configuration without executing
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

/// Workload selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum WorkloadArg {
    /// Biased vs exact bounded integers
    BiasedInt,
    /// Subset samplers with k = 2 vs the pair generator
    Pairs,
    /// Pair and triple generators
    Combinations,
    /// Cached binomial draws
    Binomial,
    /// Chi-square uniformity of bounded integers
    Uniformity,
}

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    /// Aligned table
    Text,
    /// JSON document
    Json,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate CLI arguments
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(ref path) = self.config {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
        }
        if self.threads == Some(0) {
            anyhow::bail!("--threads must be at least 1");
        }
        if self.trials == Some(0) {
            anyhow::bail!("--trials must be at least 1");
        }
        if self.json_out.is_some() && self.format == Some(OutputFormatArg::Text) {
            anyhow::bail!("--json-out cannot be combined with --format text");
        }
        Ok(())
    }
}
