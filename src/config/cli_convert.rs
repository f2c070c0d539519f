//! CLI to config conversion utilities

use super::cli::{Cli, OutputFormatArg, WorkloadArg};
use super::{BenchConfig, OutputFormat, WorkloadKind};
use anyhow::{Context, Result};

/// Parse a count string (e.g., "500", "10k", "1M", "2g") to a number
///
/// Suffixes are decimal: k = 10^3, m = 10^6, g = 10^9. Underscores are
/// ignored, so "1_000_000" also works.
pub fn parse_count(s: &str) -> Result<u64> {
    let s = s.trim().to_lowercase().replace('_', "");
    if s.is_empty() {
        anyhow::bail!("Empty count string");
    }

    let (num_str, multiplier) = if let Some(num) = s.strip_suffix('k') {
        (num, 1_000u64)
    } else if let Some(num) = s.strip_suffix('m') {
        (num, 1_000_000)
    } else if let Some(num) = s.strip_suffix('g') {
        (num, 1_000_000_000)
    } else {
        (s.as_str(), 1)
    };

    let num: u64 = num_str
        .parse()
        .with_context(|| format!("Invalid count format: {}", s))?;

    num.checked_mul(multiplier)
        .with_context(|| format!("Count too large: {}", s))
}

impl From<WorkloadArg> for WorkloadKind {
    fn from(arg: WorkloadArg) -> Self {
        match arg {
            WorkloadArg::BiasedInt => WorkloadKind::BiasedInt,
            WorkloadArg::Pairs => WorkloadKind::Pairs,
            WorkloadArg::Combinations => WorkloadKind::Combinations,
            WorkloadArg::Binomial => WorkloadKind::Binomial,
            WorkloadArg::Uniformity => WorkloadKind::Uniformity,
        }
    }
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Text => OutputFormat::Text,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

/// Build a configuration from CLI arguments alone
pub fn cli_to_config(cli: &Cli) -> Result<BenchConfig> {
    let mut config = BenchConfig::default();
    apply_cli_overrides(&mut config, cli)?;
    Ok(config)
}

/// Overwrite every configuration value the CLI sets explicitly
pub(crate) fn apply_cli_overrides(config: &mut BenchConfig, cli: &Cli) -> Result<()> {
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(threads) = cli.threads {
        config.threads = Some(threads);
    }
    if let Some(trials) = cli.trials {
        config.trials = trials;
    }
    if let Some(ref iterations) = cli.iterations {
        config.iterations = parse_count(iterations).context("Invalid --iterations")?;
    }
    if let Some(ref batch_size) = cli.batch_size {
        config.batch_size = parse_count(batch_size).context("Invalid --batch-size")?;
    }

    // Workloads named on the command line replace the configured list
    if !cli.workloads.is_empty() {
        config.workloads = cli
            .workloads
            .iter()
            .map(|&arg| WorkloadKind::from(arg).default_config())
            .collect();
    }

    if let Some(format) = cli.format {
        config.output.format = format.into();
    }
    if let Some(ref path) = cli.json_out {
        config.output.json_output = Some(path.clone());
        config.output.format = OutputFormat::Json;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorkloadConfig;
    use std::path::PathBuf;

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("500").unwrap(), 500);
        assert_eq!(parse_count("10k").unwrap(), 10_000);
        assert_eq!(parse_count("1M").unwrap(), 1_000_000);
        assert_eq!(parse_count("2g").unwrap(), 2_000_000_000);
        assert_eq!(parse_count("1_000_000").unwrap(), 1_000_000);
        assert_eq!(parse_count(" 25K ").unwrap(), 25_000);
    }

    #[test]
    fn test_parse_count_invalid() {
        assert!(parse_count("").is_err());
        assert!(parse_count("abc").is_err());
        assert!(parse_count("1.5m").is_err());
        assert!(parse_count("-3").is_err());
        assert!(parse_count("99999999999999g").is_err());
    }

    #[test]
    fn test_cli_to_config_defaults() {
        let config = cli_to_config(&Cli::default()).unwrap();
        assert_eq!(config, BenchConfig::default());
    }

    #[test]
    fn test_cli_to_config_overrides() {
        let cli = Cli {
            seed: Some(9),
            iterations: Some("20k".to_string()),
            workloads: vec![WorkloadArg::Pairs],
            json_out: Some(PathBuf::from("out.json")),
            ..Cli::default()
        };
        let config = cli_to_config(&cli).unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.iterations, 20_000);
        assert_eq!(config.workloads.len(), 1);
        assert!(matches!(config.workloads[0], WorkloadConfig::Pairs { .. }));
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.output.json_output, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn test_invalid_iterations_reported() {
        let cli = Cli {
            iterations: Some("lots".to_string()),
            ..Cli::default()
        };
        let err = cli_to_config(&cli).unwrap_err();
        assert!(format!("{:#}", err).contains("--iterations"));
    }
}
