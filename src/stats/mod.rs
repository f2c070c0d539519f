//! Statistics for checking and timing the samplers
//!
//! Descriptive statistics, Welch's t-test for comparing timing runs, and
//! chi-square goodness-of-fit tests for checking that generated outcomes follow
//! the intended distribution.
//!
//! # Example
//!
//! ```
//! use exactsample::stats::{chi_square_critical, chi_square_uniform, Confidence};
//!
//! let counts = [1_010, 987, 1_003, 1_000];
//! let chi = chi_square_uniform(&counts);
//! assert!(chi < chi_square_critical(3, Confidence::P95));
//! ```

pub mod histogram;

use serde::{Deserialize, Serialize};

/// Arithmetic mean; NaN for an empty slice
pub fn mean(data: &[f64]) -> f64 {
    data.iter().sum::<f64>() / data.len() as f64
}

/// Sample variance (divisor `len - 1`); zero for fewer than two values
///
/// Uses the shifted two-pass form, which stays accurate when the values are
/// large relative to their spread.
pub fn variance(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return 0.0;
    }
    let m = mean(data);
    let (sum, sum_squares) = data.iter().fold((0.0, 0.0), |(s, ss), &x| {
        let d = x - m;
        (s + d, ss + d * d)
    });
    (sum_squares - sum * sum / data.len() as f64) / (data.len() as f64 - 1.0)
}

/// Sample standard deviation
pub fn std_dev(data: &[f64]) -> f64 {
    variance(data).sqrt()
}

/// Result of Welch's unequal-variances t-test
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WelchTest {
    /// t statistic; positive when the first sample has the larger mean
    pub t: f64,
    /// Welch-Satterthwaite degrees of freedom, truncated
    pub dof: u32,
}

/// Welch's t-test between two samples
pub fn welch_t_test(first: &[f64], second: &[f64]) -> WelchTest {
    let n1 = first.len() as f64;
    let n2 = second.len() as f64;
    let term1 = variance(first) / n1;
    let term2 = variance(second) / n2;
    let term_sum = term1 + term2;
    let v_denom = term1 * term1 / (n1 - 1.0) + term2 * term2 / (n2 - 1.0);
    let dof = term_sum * term_sum / v_denom;
    WelchTest {
        t: (mean(first) - mean(second)) / term_sum.sqrt(),
        dof: if dof.is_finite() { dof as u32 } else { 0 },
    }
}

/// Confidence level for chi-square critical values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    /// 95%
    P95,
    /// 99.9%
    P999,
}

impl Confidence {
    fn z(self) -> f64 {
        match self {
            Confidence::P95 => 1.644_853_626_951_472_2,
            Confidence::P999 => 3.090_232_306_167_813_5,
        }
    }
}

const CHI_SQUARE_95: [f64; 30] = [
    3.841, 5.991, 7.815, 9.488, 11.070, 12.592, 14.067, 15.507, 16.919, 18.307, 19.675, 21.026,
    22.362, 23.685, 24.996, 26.296, 27.587, 28.869, 30.144, 31.410, 32.671, 33.924, 35.172,
    36.415, 37.652, 38.885, 40.113, 41.337, 42.557, 43.773,
];

const CHI_SQUARE_999: [f64; 30] = [
    10.828, 13.816, 16.266, 18.467, 20.515, 22.458, 24.322, 26.124, 27.877, 29.588, 31.264,
    32.909, 34.528, 36.123, 37.697, 39.252, 40.790, 42.312, 43.820, 45.315, 46.797, 48.268,
    49.728, 51.179, 52.620, 54.052, 55.476, 56.892, 58.301, 59.703,
];

/// Upper critical value of the chi-square distribution
///
/// Tabulated for 1 to 30 degrees of freedom; beyond that the Wilson-Hilferty
/// approximation is used. Returns infinity for zero degrees of freedom, where
/// no test is possible.
pub fn chi_square_critical(dof: usize, confidence: Confidence) -> f64 {
    if dof == 0 {
        return f64::INFINITY;
    }
    let table = match confidence {
        Confidence::P95 => &CHI_SQUARE_95,
        Confidence::P999 => &CHI_SQUARE_999,
    };
    if dof <= table.len() {
        return table[dof - 1];
    }
    let k = dof as f64;
    let h = 2.0 / (9.0 * k);
    k * (1.0 - h + confidence.z() * h.sqrt()).powi(3)
}

/// Chi-square statistic of observed counts against expected counts
pub fn chi_square_statistic(observed: &[u64], expected: &[f64]) -> f64 {
    observed
        .iter()
        .zip(expected)
        .map(|(&o, &e)| {
            let d = o as f64 - e;
            d * d / e
        })
        .sum()
}

/// Chi-square statistic of counts against equal expected counts
pub fn chi_square_uniform(counts: &[u64]) -> f64 {
    let total: u64 = counts.iter().sum();
    let expected = total as f64 / counts.len() as f64;
    let expected = vec![expected; counts.len()];
    chi_square_statistic(counts, &expected)
}

/// Outcome of a chi-square goodness-of-fit test
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoodnessOfFit {
    pub statistic: f64,
    pub dof: usize,
    pub critical: f64,
}

impl GoodnessOfFit {
    /// True when the statistic does not exceed the critical value
    pub fn passes(&self) -> bool {
        self.statistic <= self.critical
    }
}

/// Minimum expected count per bin before adjacent bins are pooled
const MIN_EXPECTED: f64 = 5.0;

/// Chi-square goodness of fit of counts against outcome probabilities
///
/// Adjacent outcomes are pooled, left to right, until each bin expects at
/// least five observations; a short remainder is folded into the last bin.
pub fn goodness_of_fit(
    observed: &[u64],
    probabilities: &[f64],
    confidence: Confidence,
) -> GoodnessOfFit {
    let total: u64 = observed.iter().sum();
    let total = total as f64;

    let mut bins: Vec<(u64, f64)> = Vec::new();
    let mut pending = (0u64, 0.0f64);
    for (&o, &prob) in observed.iter().zip(probabilities) {
        pending.0 += o;
        pending.1 += prob * total;
        if pending.1 >= MIN_EXPECTED {
            bins.push(pending);
            pending = (0, 0.0);
        }
    }
    if pending.0 > 0 || pending.1 > 0.0 {
        match bins.last_mut() {
            Some(last) => {
                last.0 += pending.0;
                last.1 += pending.1;
            }
            None => bins.push(pending),
        }
    }

    let (counts, expected): (Vec<u64>, Vec<f64>) = bins.into_iter().unzip();
    let dof = counts.len().saturating_sub(1);
    GoodnessOfFit {
        statistic: if dof == 0 {
            0.0
        } else {
            chi_square_statistic(&counts, &expected)
        },
        dof,
        critical: chi_square_critical(dof, confidence),
    }
}

/// Probability mass function of binomial(n, p) over `0..=n`
///
/// Evaluated outward from the mode so that large `n` neither underflows at
/// the start nor accumulates error across the whole support.
pub fn binomial_pmf(n: i32, p: f64) -> Vec<f64> {
    let n = n.max(0) as usize;
    let mut pmf = vec![0.0; n + 1];
    if p <= 0.0 {
        pmf[0] = 1.0;
        return pmf;
    }
    if p >= 1.0 {
        pmf[n] = 1.0;
        return pmf;
    }

    let q = 1.0 - p;
    let mode = (((n as f64) + 1.0) * p).floor().min(n as f64) as usize;
    let ln_choose: f64 = (1..=mode)
        .map(|i| ((n - mode + i) as f64 / i as f64).ln())
        .sum();
    pmf[mode] = (ln_choose + mode as f64 * p.ln() + (n - mode) as f64 * q.ln()).exp();

    let ratio = p / q;
    for k in mode..n {
        pmf[k + 1] = pmf[k] * ((n - k) as f64 / (k + 1) as f64) * ratio;
    }
    for k in (1..=mode).rev() {
        pmf[k - 1] = pmf[k] * (k as f64 / (n - k + 1) as f64) / ratio;
    }
    pmf
}

/// Goodness of fit of observed counts (indexed by outcome) to binomial(n, p)
pub fn binomial_goodness_of_fit(
    counts: &[u64],
    n: i32,
    p: f64,
    confidence: Confidence,
) -> GoodnessOfFit {
    goodness_of_fit(counts, &binomial_pmf(n, p), confidence)
}
