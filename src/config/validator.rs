//! Configuration validation

use super::*;
use anyhow::Result;

/// Largest bound the uniformity workload will tabulate
pub const MAX_UNIFORMITY_BOUND: i32 = 100_000;

/// Minimum expected count per outcome for a chi-square test
const MIN_EXPECTED_PER_OUTCOME: u64 = 5;

/// Validate complete configuration
pub fn validate_config(config: &BenchConfig) -> Result<()> {
    validate_run(config)?;
    if config.workloads.is_empty() {
        anyhow::bail!("At least one workload must be specified");
    }
    for (index, workload) in config.workloads.iter().enumerate() {
        validate_workload(workload)
            .map_err(|e| anyhow::anyhow!("Workload {} ({}): {}", index, workload.kind(), e))?;
    }
    Ok(())
}

/// Validate trial and iteration counts
pub fn validate_run(config: &BenchConfig) -> Result<()> {
    if config.threads == Some(0) {
        anyhow::bail!("threads must be at least 1");
    }
    if config.trials == 0 {
        anyhow::bail!("trials must be at least 1");
    }
    if config.iterations == 0 {
        anyhow::bail!("iterations must be at least 1");
    }
    if config.batch_size == 0 {
        anyhow::bail!("batch_size must be at least 1");
    }
    if config.batch_size > config.iterations {
        anyhow::bail!(
            "batch_size ({}) must not exceed iterations ({})",
            config.batch_size,
            config.iterations
        );
    }
    Ok(())
}

/// Validate one workload's parameters
pub fn validate_workload(workload: &WorkloadConfig) -> Result<()> {
    match workload {
        WorkloadConfig::BiasedInt { bounds } => {
            require_non_empty(bounds, "bounds")?;
            for &bound in bounds {
                if bound < 1 {
                    anyhow::bail!("bound must be at least 1, got {}", bound);
                }
            }
        }
        WorkloadConfig::Pairs { sizes } => {
            require_non_empty(sizes, "sizes")?;
            require_min_size(sizes, 2, "pair")?;
        }
        WorkloadConfig::Combinations { sizes, window } => {
            require_non_empty(sizes, "sizes")?;
            require_min_size(sizes, 3, "triple")?;
            if *window < 2 {
                anyhow::bail!("window must be at least 2, got {}", window);
            }
        }
        WorkloadConfig::Binomial { cases } => {
            require_non_empty(cases, "cases")?;
            for case in cases {
                if case.n < 0 {
                    anyhow::bail!("binomial n must be non-negative, got {}", case.n);
                }
                if !(0.0..=1.0).contains(&case.p) {
                    anyhow::bail!("binomial p must be between 0.0 and 1.0, got {}", case.p);
                }
            }
        }
        WorkloadConfig::Uniformity { bounds, draws } => {
            require_non_empty(bounds, "bounds")?;
            for &bound in bounds {
                if !(2..=MAX_UNIFORMITY_BOUND).contains(&bound) {
                    anyhow::bail!(
                        "uniformity bound must be between 2 and {}, got {}",
                        MAX_UNIFORMITY_BOUND,
                        bound
                    );
                }
                let needed = bound as u64 * MIN_EXPECTED_PER_OUTCOME;
                if *draws < needed {
                    anyhow::bail!(
                        "uniformity draws ({}) too few for bound {}: need at least {}",
                        draws,
                        bound,
                        needed
                    );
                }
            }
        }
    }
    Ok(())
}

fn require_non_empty<T>(values: &[T], name: &str) -> Result<()> {
    if values.is_empty() {
        anyhow::bail!("{} must not be empty", name);
    }
    Ok(())
}

fn require_min_size(sizes: &[i32], minimum: i32, what: &str) -> Result<()> {
    for &n in sizes {
        if n < minimum {
            anyhow::bail!("n must be at least {} for a {}, got {}", minimum, what, n);
        }
    }
    Ok(())
}
