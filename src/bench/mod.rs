//! Benchmark and verification harness
//!
//! Each configured workload is measured over `trials` independent trials run
//! on a rayon pool. A trial owns its source and its [`BinomialCache`], so
//! nothing is shared between threads while timing.
//!
//! Trial `t` of workload `w` draws from the base seed's stream advanced by `w`
//! long jumps and `t` jumps, which keeps every trial's stream disjoint and the
//! whole run reproducible from one seed. All methods timed within a workload
//! see the same streams.

pub mod report;
mod workloads;

pub use report::{BenchReport, CheckRow, ComparisonRow, TimingRow, WorkloadReport};

use crate::config::BenchConfig;
use crate::distribution::binomial::BinomialCache;
use crate::stats::histogram::CallCostHistogram;
use crate::stats;
use crate::util::time::{calls_per_second, format_duration, ns_per_call, Timestamp};
use anyhow::{Context, Result};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use rayon::ThreadPool;
use std::hint::black_box;
use tracing::{debug, info};

/// Source for trial `trial` of workload `workload`
pub fn trial_source(seed: u64, workload: usize, trial: usize) -> Xoshiro256PlusPlus {
    let mut source = Xoshiro256PlusPlus::seed_from_u64(seed);
    for _ in 0..workload {
        source.long_jump();
    }
    for _ in 0..trial {
        source.jump();
    }
    source
}

/// Runs configured workloads on a dedicated thread pool
pub struct BenchRunner {
    config: BenchConfig,
    pool: ThreadPool,
}

impl BenchRunner {
    pub fn new(config: BenchConfig) -> Result<Self> {
        let threads = config.effective_threads();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("exactsample-{}", index))
            .build()
            .context("Failed to build bench thread pool")?;
        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Run every workload in order
    pub fn run(&self) -> Result<BenchReport> {
        let threads = self.pool.current_num_threads();
        info!(
            workloads = self.config.workloads.len(),
            trials = self.config.trials,
            iterations = self.config.iterations,
            threads,
            "starting bench run"
        );

        let start = Timestamp::now();
        let mut reports = Vec::with_capacity(self.config.workloads.len());
        for (index, workload) in self.config.workloads.iter().enumerate() {
            debug!(index, %workload, "running workload");
            let workload_start = Timestamp::now();
            let report = workloads::run(self, index, workload)
                .with_context(|| format!("Workload {} ({}) failed", index, workload.kind()))?;
            debug!(
                index,
                kind = %workload.kind(),
                elapsed = %format_duration(workload_start.elapsed()),
                timings = report.timings.len(),
                checks = report.checks.len(),
                "workload finished"
            );
            reports.push(report);
        }

        Ok(BenchReport {
            config: self.config.clone(),
            threads,
            elapsed_secs: start.elapsed().as_secs_f64(),
            workloads: reports,
        })
    }

    /// Time one method over all trials
    ///
    /// `time_trial` is called once per trial, on a pool thread, and usually
    /// just hands a closure to [`Trial::time`].
    pub(crate) fn measure<F>(&self, workload: usize, time_trial: F) -> Result<Measurement>
    where
        F: Fn(&mut Trial) -> TrialTiming + Sync,
    {
        let config = &self.config;
        let timings: Vec<TrialTiming> = self.pool.install(|| {
            (0..config.trials)
                .into_par_iter()
                .map(|t| {
                    let mut trial = Trial::new(
                        trial_source(config.seed, workload, t),
                        config.iterations,
                        config.batch_size,
                    );
                    time_trial(&mut trial)
                })
                .collect()
        });
        Measurement::from_trials(timings)
    }

    /// Run `task` for each item on the pool, preserving order
    pub(crate) fn for_each<T, R, F>(&self, items: &[T], task: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(usize, &T) -> R + Sync,
    {
        self.pool.install(|| {
            items
                .par_iter()
                .enumerate()
                .map(|(index, item)| task(index, item))
                .collect()
        })
    }
}

/// State owned by one trial
pub struct Trial {
    source: Xoshiro256PlusPlus,
    cache: BinomialCache,
    iterations: u64,
    batch_size: u64,
}

/// Timing of one trial
#[derive(Debug)]
pub struct TrialTiming {
    pub histogram: CallCostHistogram,
    pub ns_per_call: f64,
    pub calls_per_sec: f64,
}

impl Trial {
    pub fn new(source: Xoshiro256PlusPlus, iterations: u64, batch_size: u64) -> Self {
        Self {
            source,
            cache: BinomialCache::new(),
            iterations,
            batch_size: batch_size.max(1),
        }
    }

    /// Call `call` `iterations` times, timing it in batches
    ///
    /// Each batch records its average per-call cost in the histogram. Results
    /// pass through `black_box` so the calls cannot be optimized away.
    pub fn time<T, F>(&mut self, mut call: F) -> TrialTiming
    where
        F: FnMut(&mut Xoshiro256PlusPlus, &mut BinomialCache) -> T,
    {
        let mut histogram = CallCostHistogram::new();
        let start = Timestamp::now();
        let mut remaining = self.iterations;
        while remaining > 0 {
            let batch = remaining.min(self.batch_size);
            let batch_start = Timestamp::now();
            for _ in 0..batch {
                black_box(call(&mut self.source, &mut self.cache));
            }
            histogram.record_batch(batch_start.elapsed(), batch);
            remaining -= batch;
        }
        let elapsed = start.elapsed();
        TrialTiming {
            histogram,
            ns_per_call: ns_per_call(elapsed, self.iterations),
            calls_per_sec: calls_per_second(self.iterations, elapsed),
        }
    }
}

/// One method's timings merged over all trials
#[derive(Debug)]
pub struct Measurement {
    /// Batch costs from every trial
    pub histogram: CallCostHistogram,
    /// Average per-call cost of each trial, in trial order
    pub trial_ns: Vec<f64>,
    /// Throughput of each trial, in trial order
    pub trial_rates: Vec<f64>,
}

impl Measurement {
    fn from_trials(timings: Vec<TrialTiming>) -> Result<Self> {
        let mut histogram = CallCostHistogram::new();
        let mut trial_ns = Vec::with_capacity(timings.len());
        let mut trial_rates = Vec::with_capacity(timings.len());
        for timing in timings {
            histogram
                .merge(&timing.histogram)
                .context("Failed to merge trial histograms")?;
            trial_ns.push(timing.ns_per_call);
            trial_rates.push(timing.calls_per_sec);
        }
        Ok(Self {
            histogram,
            trial_ns,
            trial_rates,
        })
    }

    /// Mean of the per-trial averages
    pub fn mean_ns(&self) -> f64 {
        stats::mean(&self.trial_ns)
    }

    /// Mean of the per-trial call rates
    pub fn calls_per_sec(&self) -> f64 {
        stats::mean(&self.trial_rates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{WorkloadConfig, WorkloadKind};
    use rand::RngCore;

    fn small_config(workloads: Vec<WorkloadConfig>) -> BenchConfig {
        BenchConfig {
            threads: Some(2),
            trials: 3,
            iterations: 2_000,
            batch_size: 500,
            workloads,
            ..BenchConfig::default()
        }
    }

    #[test]
    fn test_trial_sources_are_distinct_and_reproducible() {
        let mut a = trial_source(7, 0, 0);
        let mut b = trial_source(7, 0, 1);
        let mut c = trial_source(7, 1, 0);
        let first = a.next_u64();
        assert_ne!(first, b.next_u64());
        assert_ne!(first, c.next_u64());
        assert_eq!(first, trial_source(7, 0, 0).next_u64());
    }

    #[test]
    fn test_trial_records_every_batch() {
        let mut trial = Trial::new(trial_source(1, 0, 0), 1_050, 100);
        let mut calls = 0u64;
        let timing = trial.time(|source, _| {
            calls += 1;
            source.next_u32()
        });
        assert_eq!(calls, 1_050);
        assert_eq!(timing.histogram.len(), 11);
        assert!(timing.ns_per_call >= 0.0);
    }

    #[test]
    fn test_measure_runs_each_trial() {
        let runner = BenchRunner::new(small_config(vec![])).unwrap();
        let measurement = runner
            .measure(0, |trial| trial.time(|source, _| source.next_u32()))
            .unwrap();
        assert_eq!(measurement.trial_ns.len(), 3);
        assert_eq!(measurement.trial_rates.len(), 3);
        assert_eq!(measurement.histogram.len(), 3 * 4);
        assert!(measurement.mean_ns() > 0.0);
        assert!(measurement.calls_per_sec() > 0.0);
    }

    #[test]
    fn test_for_each_preserves_order() {
        let runner = BenchRunner::new(small_config(vec![])).unwrap();
        let squares = runner.for_each(&[1, 2, 3, 4], |index, &value| (index, value * value));
        assert_eq!(squares, vec![(0, 1), (1, 4), (2, 9), (3, 16)]);
    }

    #[test]
    fn test_run_every_default_workload() {
        let workloads = WorkloadKind::ALL
            .iter()
            .map(|kind| match kind {
                WorkloadKind::Uniformity => WorkloadConfig::Uniformity {
                    bounds: vec![2, 7],
                    draws: 20_000,
                },
                WorkloadKind::Binomial => WorkloadConfig::Binomial {
                    cases: vec![crate::config::BinomialCase { n: 30, p: 0.4 }],
                },
                other => other.default_config(),
            })
            .collect();
        let runner = BenchRunner::new(small_config(workloads)).unwrap();
        let report = runner.run().unwrap();

        assert_eq!(report.threads, 2);
        assert_eq!(report.workloads.len(), WorkloadKind::ALL.len());
        for (workload, kind) in report.workloads.iter().zip(WorkloadKind::ALL) {
            assert_eq!(workload.kind, kind);
            assert_eq!(workload.failed_checks().count(), 0, "{:?}", workload.checks);
        }
        assert!(report.workloads[0].timings.len() >= 3);
        assert!(report.workloads[4].timings.is_empty());
        assert_eq!(report.workloads[4].checks.len(), 4);
    }
}
