//! Bench results
//!
//! Plain serializable rows; `output::text` and `output::json` render them.

use super::Measurement;
use crate::config::{BenchConfig, WorkloadKind};
use crate::stats::{self, GoodnessOfFit};
use serde::Serialize;

/// Results of one complete bench run
#[derive(Debug, Clone, Serialize)]
pub struct BenchReport {
    pub config: BenchConfig,
    /// Thread pool size actually used
    pub threads: usize,
    /// Wall-clock time for the whole run
    pub elapsed_secs: f64,
    pub workloads: Vec<WorkloadReport>,
}

/// Results of one configured workload
#[derive(Debug, Clone, Serialize)]
pub struct WorkloadReport {
    pub kind: WorkloadKind,
    /// Human-readable workload parameters
    pub description: String,
    pub timings: Vec<TimingRow>,
    pub comparisons: Vec<ComparisonRow>,
    pub checks: Vec<CheckRow>,
}

impl WorkloadReport {
    pub fn new(kind: WorkloadKind, description: String) -> Self {
        Self {
            kind,
            description,
            timings: Vec::new(),
            comparisons: Vec::new(),
            checks: Vec::new(),
        }
    }

    /// Checks with a verdict that failed
    pub fn failed_checks(&self) -> impl Iterator<Item = &CheckRow> {
        self.checks.iter().filter(|check| check.passed == Some(false))
    }
}

/// Per-call cost of one method on one case
#[derive(Debug, Clone, Serialize)]
pub struct TimingRow {
    /// Parameters, e.g. `n=64`
    pub case: String,
    pub method: String,
    /// Mean over trials of each trial's average cost
    pub mean_ns: f64,
    /// Sample standard deviation of the per-trial averages
    pub std_dev_ns: f64,
    /// Batch percentiles over all trials
    pub p50_ns: f64,
    pub p99_ns: f64,
    pub min_ns: f64,
    pub max_ns: f64,
    /// Mean over trials of each trial's call rate
    pub calls_per_sec: f64,
    pub trials: usize,
}

impl TimingRow {
    pub fn new(case: &str, method: &str, measurement: &Measurement) -> Self {
        let histogram = &measurement.histogram;
        Self {
            case: case.to_string(),
            method: method.to_string(),
            mean_ns: measurement.mean_ns(),
            std_dev_ns: stats::std_dev(&measurement.trial_ns),
            p50_ns: histogram.percentile_ns(50.0).unwrap_or(0.0),
            p99_ns: histogram.percentile_ns(99.0).unwrap_or(0.0),
            min_ns: histogram.min_ns().unwrap_or(0.0),
            max_ns: histogram.max_ns().unwrap_or(0.0),
            calls_per_sec: measurement.calls_per_sec(),
            trials: measurement.trial_ns.len(),
        }
    }
}

/// Welch comparison of two methods on the same case
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonRow {
    pub case: String,
    pub baseline: String,
    pub candidate: String,
    /// Positive when the candidate is slower than the baseline
    pub t: f64,
    pub dof: u32,
    /// Baseline mean cost over candidate mean cost
    pub speedup: f64,
}

impl ComparisonRow {
    pub fn new(
        case: &str,
        (baseline, baseline_measurement): (&str, &Measurement),
        (candidate, candidate_measurement): (&str, &Measurement),
    ) -> Self {
        let welch = stats::welch_t_test(
            &candidate_measurement.trial_ns,
            &baseline_measurement.trial_ns,
        );
        let candidate_mean = candidate_measurement.mean_ns();
        Self {
            case: case.to_string(),
            baseline: baseline.to_string(),
            candidate: candidate.to_string(),
            t: welch.t,
            dof: welch.dof,
            speedup: if candidate_mean > 0.0 {
                baseline_measurement.mean_ns() / candidate_mean
            } else {
                0.0
            },
        }
    }
}

/// A statistical check, or an informational figure when `passed` is `None`
#[derive(Debug, Clone, Serialize)]
pub struct CheckRow {
    pub case: String,
    pub method: String,
    /// What was measured, e.g. `chi-square`
    pub check: String,
    pub value: f64,
    /// Largest acceptable value, if the check has a verdict
    pub limit: Option<f64>,
    pub passed: Option<bool>,
    pub detail: String,
}

impl CheckRow {
    /// Row for a chi-square goodness-of-fit test
    pub fn goodness_of_fit(case: &str, method: &str, fit: &GoodnessOfFit) -> Self {
        Self {
            case: case.to_string(),
            method: method.to_string(),
            check: "chi-square".to_string(),
            value: fit.statistic,
            limit: Some(fit.critical),
            passed: Some(fit.passes()),
            detail: format!("{} dof", fit.dof),
        }
    }

    /// Row that passes when `value <= limit`
    pub fn bounded(
        case: &str,
        method: &str,
        check: &str,
        value: f64,
        limit: f64,
        detail: String,
    ) -> Self {
        Self {
            case: case.to_string(),
            method: method.to_string(),
            check: check.to_string(),
            value,
            limit: Some(limit),
            passed: Some(value <= limit),
            detail,
        }
    }

    /// Informational row with no verdict
    pub fn info(case: &str, method: &str, check: &str, value: f64, detail: String) -> Self {
        Self {
            case: case.to_string(),
            method: method.to_string(),
            check: check.to_string(),
            value,
            limit: None,
            passed: None,
            detail,
        }
    }
}
