//! Workload definition structures

use serde::{Deserialize, Serialize};
use std::fmt;

/// One bench workload, as written in a `[[workload]]` TOML table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WorkloadConfig {
    /// Time biased vs exact bounded integers for each bound
    BiasedInt {
        #[serde(default = "default_timing_bounds")]
        bounds: Vec<i32>,
    },
    /// Time the k = 2 subset samplers against the dedicated pair generator
    Pairs {
        #[serde(default = "default_sizes")]
        sizes: Vec<i32>,
    },
    /// Time the pair and triple generators, plain, sorted and windowed
    Combinations {
        #[serde(default = "default_sizes")]
        sizes: Vec<i32>,
        #[serde(default = "default_window")]
        window: i32,
    },
    /// Time cached binomial draws against `rand_distr::Binomial`
    Binomial {
        #[serde(default = "default_binomial_cases")]
        cases: Vec<BinomialCase>,
    },
    /// Chi-square uniformity of exact and biased bounded integers
    Uniformity {
        #[serde(default = "default_uniformity_bounds")]
        bounds: Vec<i32>,
        #[serde(default = "default_uniformity_draws")]
        draws: u64,
    },
}

/// Parameters of one binomial timing case
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BinomialCase {
    pub n: i32,
    pub p: f64,
}

/// Workload kind without parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkloadKind {
    BiasedInt,
    Pairs,
    Combinations,
    Binomial,
    Uniformity,
}

impl WorkloadKind {
    pub const ALL: [WorkloadKind; 5] = [
        WorkloadKind::BiasedInt,
        WorkloadKind::Pairs,
        WorkloadKind::Combinations,
        WorkloadKind::Binomial,
        WorkloadKind::Uniformity,
    ];

    /// The workload of this kind with every parameter at its default
    pub fn default_config(self) -> WorkloadConfig {
        match self {
            WorkloadKind::BiasedInt => WorkloadConfig::BiasedInt {
                bounds: default_timing_bounds(),
            },
            WorkloadKind::Pairs => WorkloadConfig::Pairs {
                sizes: default_sizes(),
            },
            WorkloadKind::Combinations => WorkloadConfig::Combinations {
                sizes: default_sizes(),
                window: default_window(),
            },
            WorkloadKind::Binomial => WorkloadConfig::Binomial {
                cases: default_binomial_cases(),
            },
            WorkloadKind::Uniformity => WorkloadConfig::Uniformity {
                bounds: default_uniformity_bounds(),
                draws: default_uniformity_draws(),
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            WorkloadKind::BiasedInt => "biased_int",
            WorkloadKind::Pairs => "pairs",
            WorkloadKind::Combinations => "combinations",
            WorkloadKind::Binomial => "binomial",
            WorkloadKind::Uniformity => "uniformity",
        }
    }
}

impl fmt::Display for WorkloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl WorkloadConfig {
    pub fn kind(&self) -> WorkloadKind {
        match self {
            WorkloadConfig::BiasedInt { .. } => WorkloadKind::BiasedInt,
            WorkloadConfig::Pairs { .. } => WorkloadKind::Pairs,
            WorkloadConfig::Combinations { .. } => WorkloadKind::Combinations,
            WorkloadConfig::Binomial { .. } => WorkloadKind::Binomial,
            WorkloadConfig::Uniformity { .. } => WorkloadKind::Uniformity,
        }
    }
}

impl fmt::Display for WorkloadConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkloadConfig::BiasedInt { bounds } => write!(f, "biased_int bounds={:?}", bounds),
            WorkloadConfig::Pairs { sizes } => write!(f, "pairs n={:?}", sizes),
            WorkloadConfig::Combinations { sizes, window } => {
                write!(f, "combinations n={:?} window={}", sizes, window)
            }
            WorkloadConfig::Binomial { cases } => {
                write!(f, "binomial")?;
                for case in cases {
                    write!(f, " ({}, {})", case.n, case.p)?;
                }
                Ok(())
            }
            WorkloadConfig::Uniformity { bounds, draws } => {
                write!(f, "uniformity bounds={:?} draws={}", bounds, draws)
            }
        }
    }
}

/// Small bounds, a power of two, and a bound near 2^31 / 1.5 where the
/// biased variant is furthest from uniform
fn default_timing_bounds() -> Vec<i32> {
    vec![3, 7, 100, 256, 1_000, 1_000_000, 1_431_655_765]
}

fn default_sizes() -> Vec<i32> {
    vec![16, 64, 256, 1024]
}

fn default_window() -> i32 {
    8
}

/// Both sides of the inverse-transform / BTPE cutoff, plus large n
fn default_binomial_cases() -> Vec<BinomialCase> {
    vec![
        BinomialCase { n: 20, p: 0.45 },
        BinomialCase { n: 20, p: 0.5 },
        BinomialCase { n: 1_000, p: 0.005 },
        BinomialCase { n: 1_000, p: 0.3 },
        BinomialCase { n: 100_000, p: 0.5 },
    ]
}

fn default_uniformity_bounds() -> Vec<i32> {
    vec![2, 5, 6, 7, 10, 100]
}

fn default_uniformity_draws() -> u64 {
    120_000
}
