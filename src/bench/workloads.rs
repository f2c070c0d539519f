//! Workload implementations

use super::report::{CheckRow, ComparisonRow, TimingRow, WorkloadReport};
use super::{trial_source, BenchRunner, Measurement};
use crate::config::{BinomialCase, WorkloadConfig};
use crate::distribution::binomial::{binomials, next_binomial, BinomialSetup};
use crate::distribution::bounded::{biased_int_bias, next_biased_int, next_int};
use crate::index::{
    next_int_pair, next_int_triple, next_sorted_int_pair, next_sorted_int_triple,
    next_sorted_windowed_int_pair, next_sorted_windowed_int_triple, next_windowed_int_pair,
    next_windowed_int_triple,
};
use crate::sample::{sample, SampleAlgorithm};
use crate::stats::{binomial_goodness_of_fit, goodness_of_fit, Confidence};
use anyhow::{Context, Result};
use rand::Rng;
use rand_distr::{Binomial, Distribution};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Draws for the binomial accuracy checks, whatever `iterations` is
const MIN_CHECK_DRAWS: u64 = 10_000;
const MAX_CHECK_DRAWS: u64 = 1_000_000;

/// Largest `n` whose full outcome table is tabulated for goodness of fit
const MAX_TABULATED_N: i32 = 1_000_000;

/// Largest acceptable |z| of a sample mean
const MEAN_Z_LIMIT: f64 = 4.0;

pub(super) fn run(
    runner: &BenchRunner,
    index: usize,
    workload: &WorkloadConfig,
) -> Result<WorkloadReport> {
    let mut report = WorkloadReport::new(workload.kind(), workload.to_string());
    match workload {
        WorkloadConfig::BiasedInt { bounds } => {
            biased_int(runner, index, bounds, &mut report)?
        }
        WorkloadConfig::Pairs { sizes } => pairs(runner, index, sizes, &mut report)?,
        WorkloadConfig::Combinations { sizes, window } => {
            combinations(runner, index, sizes, *window, &mut report)?
        }
        WorkloadConfig::Binomial { cases } => binomial(runner, index, cases, &mut report)?,
        WorkloadConfig::Uniformity { bounds, draws } => {
            uniformity(runner, index, bounds, *draws, &mut report)?
        }
    }
    Ok(report)
}

/// Time a call that needs only the trial's source
fn time_call<T, F>(runner: &BenchRunner, index: usize, call: F) -> Result<Measurement>
where
    F: Fn(&mut Xoshiro256PlusPlus) -> T + Sync,
{
    runner.measure(index, |trial| trial.time(|source, _| call(source)))
}

fn biased_int(
    runner: &BenchRunner,
    index: usize,
    bounds: &[i32],
    report: &mut WorkloadReport,
) -> Result<()> {
    for &bound in bounds {
        let case = format!("bound={}", bound);
        let exact = time_call(runner, index, |source| next_int(bound, source))?;
        let biased = time_call(runner, index, |source| next_biased_int(bound, source))?;
        let library = time_call(runner, index, |source| source.gen_range(0..bound))?;

        report.timings.push(TimingRow::new(&case, "gen_range", &library));
        report.timings.push(TimingRow::new(&case, "next_int", &exact));
        report.timings.push(TimingRow::new(&case, "next_biased_int", &biased));
        report.comparisons.push(ComparisonRow::new(
            &case,
            ("next_int", &exact),
            ("next_biased_int", &biased),
        ));
        report.comparisons.push(ComparisonRow::new(
            &case,
            ("gen_range", &library),
            ("next_int", &exact),
        ));

        let bias = biased_int_bias(bound)?;
        report.checks.push(CheckRow::info(
            &case,
            "next_biased_int",
            "total variation",
            bias.total_variation,
            format!(
                "{} heavy outcomes, max error {:.3e}",
                bias.heavy_outcomes, bias.max_abs_error
            ),
        ));
    }
    Ok(())
}

fn pairs(
    runner: &BenchRunner,
    index: usize,
    sizes: &[i32],
    report: &mut WorkloadReport,
) -> Result<()> {
    for &n in sizes {
        let case = format!("n={}", n);
        let baseline = time_call(runner, index, |source| next_int_pair(n, source))?;
        report.timings.push(TimingRow::new(&case, "next_int_pair", &baseline));

        for algorithm in SampleAlgorithm::ALL {
            let measurement = runner.measure(index, |trial| {
                let mut buffer = [0i32; 2];
                trial.time(|source, _| {
                    algorithm
                        .run(n, 2, Some(&mut buffer[..]), source)
                        .map(|pair| pair[0])
                })
            })?;
            let method = format!("sample_{}", algorithm);
            report.timings.push(TimingRow::new(&case, &method, &measurement));
            report.comparisons.push(ComparisonRow::new(
                &case,
                ("next_int_pair", &baseline),
                (method.as_str(), &measurement),
            ));
        }

        let dispatched = runner.measure(index, |trial| {
            let mut buffer = [0i32; 2];
            trial.time(|source, _| {
                sample(n, 2, Some(&mut buffer[..]), source).map(|pair| pair[0])
            })
        })?;
        let method = format!("sample ({})", SampleAlgorithm::select(n, 2));
        report.timings.push(TimingRow::new(&case, &method, &dispatched));
    }
    Ok(())
}

fn combinations(
    runner: &BenchRunner,
    index: usize,
    sizes: &[i32],
    window: i32,
    report: &mut WorkloadReport,
) -> Result<()> {
    for &n in sizes {
        let case = format!("n={} window={}", n, window);
        let pair = time_call(runner, index, |source| next_int_pair(n, source))?;
        let sorted_pair = time_call(runner, index, |source| next_sorted_int_pair(n, source))?;
        let triple = time_call(runner, index, |source| next_int_triple(n, source))?;
        let sorted_triple =
            time_call(runner, index, |source| next_sorted_int_triple(n, source))?;
        let windowed_pair = time_call(runner, index, |source| {
            next_windowed_int_pair(n, window, source)
        })?;
        let sorted_windowed_pair = time_call(runner, index, |source| {
            next_sorted_windowed_int_pair(n, window, source)
        })?;
        let windowed_triple = time_call(runner, index, |source| {
            next_windowed_int_triple(n, window, source)
        })?;
        let sorted_windowed_triple = time_call(runner, index, |source| {
            next_sorted_windowed_int_triple(n, window, source)
        })?;

        for (method, measurement) in [
            ("next_int_pair", &pair),
            ("next_sorted_int_pair", &sorted_pair),
            ("next_windowed_int_pair", &windowed_pair),
            ("next_sorted_windowed_int_pair", &sorted_windowed_pair),
            ("next_int_triple", &triple),
            ("next_sorted_int_triple", &sorted_triple),
            ("next_windowed_int_triple", &windowed_triple),
            ("next_sorted_windowed_int_triple", &sorted_windowed_triple),
        ] {
            report.timings.push(TimingRow::new(&case, method, measurement));
        }

        for (baseline, candidate) in [
            (("next_int_pair", &pair), ("next_sorted_int_pair", &sorted_pair)),
            (("next_int_pair", &pair), ("next_windowed_int_pair", &windowed_pair)),
            (("next_int_triple", &triple), ("next_sorted_int_triple", &sorted_triple)),
            (("next_int_triple", &triple), ("next_windowed_int_triple", &windowed_triple)),
        ] {
            report.comparisons.push(ComparisonRow::new(&case, baseline, candidate));
        }
    }
    Ok(())
}

fn binomial(
    runner: &BenchRunner,
    index: usize,
    cases: &[BinomialCase],
    report: &mut WorkloadReport,
) -> Result<()> {
    for &BinomialCase { n, p } in cases {
        let case = format!("n={} p={}", n, p);
        let cached = runner.measure(index, |trial| {
            trial.time(|source, cache| next_binomial(n, p, source, cache))
        })?;
        let uncached = time_call(runner, index, |source| {
            BinomialSetup::new(n, p).map(|setup| setup.sample(source))
        })?;
        let reference = Binomial::new(n as u64, p)
            .with_context(|| format!("rand_distr rejected binomial({}, {})", n, p))?;
        let library = time_call(runner, index, |source| reference.sample(source))?;

        report.timings.push(TimingRow::new(&case, "rand_distr::Binomial", &library));
        report.timings.push(TimingRow::new(&case, "next_binomial (cached)", &cached));
        report.timings.push(TimingRow::new(&case, "next_binomial (uncached)", &uncached));
        report.comparisons.push(ComparisonRow::new(
            &case,
            ("rand_distr::Binomial", &library),
            ("next_binomial (cached)", &cached),
        ));
        report.comparisons.push(ComparisonRow::new(
            &case,
            ("next_binomial (cached)", &cached),
            ("next_binomial (uncached)", &uncached),
        ));

        check_binomial(runner, index, n, p, &case, report)?;
    }
    Ok(())
}

/// Compare a stream of variates against binomial(n, p)
///
/// Uses the stream after every timing trial of this workload.
fn check_binomial(
    runner: &BenchRunner,
    index: usize,
    n: i32,
    p: f64,
    case: &str,
    report: &mut WorkloadReport,
) -> Result<()> {
    let config = runner.config();
    let draws = config.iterations.clamp(MIN_CHECK_DRAWS, MAX_CHECK_DRAWS);
    let mut source = trial_source(config.seed, index, config.trials);
    let setup = BinomialSetup::new(n, p)?;

    let mut counts = if n <= MAX_TABULATED_N {
        vec![0u64; n as usize + 1]
    } else {
        Vec::new()
    };
    let mut sum = 0.0;
    for x in binomials(n, p, &mut source)?.take(draws as usize) {
        if let Some(count) = counts.get_mut(x as usize) {
            *count += 1;
        }
        sum += f64::from(x);
    }

    let mean = sum / draws as f64;
    let expected = f64::from(n) * p;
    let std_error = (expected * (1.0 - p) / draws as f64).sqrt();
    let deviation = (mean - expected).abs();
    let z = if std_error > 0.0 {
        deviation / std_error
    } else if deviation == 0.0 {
        0.0
    } else {
        f64::INFINITY
    };
    report.checks.push(CheckRow::bounded(
        case,
        "binomials",
        "mean |z|",
        z,
        MEAN_Z_LIMIT,
        format!(
            "mean {:.4} vs n*p {:.4} over {} draws ({})",
            mean,
            expected,
            draws,
            setup.algorithm()
        ),
    ));

    if !counts.is_empty() {
        let fit = binomial_goodness_of_fit(&counts, n, p, Confidence::P999);
        report.checks.push(CheckRow::goodness_of_fit(case, "binomials", &fit));
    }
    Ok(())
}

fn uniformity(
    runner: &BenchRunner,
    index: usize,
    bounds: &[i32],
    draws: u64,
    report: &mut WorkloadReport,
) -> Result<()> {
    let seed = runner.config().seed;
    let results = runner.for_each(bounds, |bound_index, &bound| -> Result<Vec<CheckRow>> {
        let case = format!("bound={} draws={}", bound, draws);
        let mut source = trial_source(seed, index, bound_index);
        let uniform = vec![1.0 / f64::from(bound); bound as usize];

        let mut exact = vec![0u64; bound as usize];
        for _ in 0..draws {
            exact[next_int(bound, &mut source)? as usize] += 1;
        }
        let mut biased = vec![0u64; bound as usize];
        for _ in 0..draws {
            biased[next_biased_int(bound, &mut source)? as usize] += 1;
        }

        Ok(vec![
            CheckRow::goodness_of_fit(
                &case,
                "next_int",
                &goodness_of_fit(&exact, &uniform, Confidence::P999),
            ),
            CheckRow::goodness_of_fit(
                &case,
                "next_biased_int",
                &goodness_of_fit(&biased, &uniform, Confidence::P999),
            ),
        ])
    });
    for checks in results {
        report.checks.extend(checks?);
    }
    Ok(())
}
