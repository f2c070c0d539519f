//! Per-call cost histogram using HdrHistogram
//!
//! Sampling calls take a few nanoseconds each, far below timer resolution, so
//! the bench harness times batches of calls and records the average cost per
//! call. Values are stored in picoseconds so that sub-nanosecond differences
//! between algorithms survive the integer histogram.
//!
//! # Example
//!
//! ```
//! use exactsample::stats::histogram::CallCostHistogram;
//! use std::time::Duration;
//!
//! let mut hist = CallCostHistogram::new();
//!
//! // 1,000 calls took 4.2 microseconds: 4.2 ns per call
//! hist.record_batch(Duration::from_nanos(4_200), 1_000);
//! hist.record_batch(Duration::from_nanos(3_900), 1_000);
//!
//! let median = hist.percentile_ns(50.0).unwrap();
//! assert!(median > 3.8 && median < 4.3);
//! ```

use anyhow::Result;
use hdrhistogram::Histogram;
use std::time::Duration;

const PICOS_PER_NANO: f64 = 1_000.0;
/// One hour, in picoseconds
const MAX_PICOS: u64 = 3_600_000_000_000_000;

/// Histogram of average per-call cost
///
/// Tracks 1 ps to 1 hour with 3 significant digits, so every reported value is
/// within 0.1% of what was recorded.
#[derive(Debug)]
pub struct CallCostHistogram {
    histogram: Histogram<u64>,
}

impl CallCostHistogram {
    /// Create an empty histogram
    pub fn new() -> Self {
        let histogram = Histogram::new_with_bounds(1, MAX_PICOS, 3)
            .expect("Failed to create histogram with valid bounds");
        Self { histogram }
    }

    /// Record one timed batch of `calls` calls
    ///
    /// Batches with zero calls are ignored. Values outside the tracked range
    /// are clamped.
    #[inline]
    pub fn record_batch(&mut self, elapsed: Duration, calls: u64) {
        if calls == 0 {
            return;
        }
        let picos = elapsed.as_nanos().saturating_mul(1_000) / u128::from(calls);
        let value = u64::try_from(picos).unwrap_or(MAX_PICOS).clamp(1, MAX_PICOS);
        let _ = self.histogram.record(value);
    }

    /// Per-call cost at `percentile` (0.0 - 100.0), in nanoseconds
    pub fn percentile_ns(&self, percentile: f64) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        Some(self.histogram.value_at_percentile(percentile) as f64 / PICOS_PER_NANO)
    }

    /// Cheapest batch average, in nanoseconds per call
    pub fn min_ns(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        Some(self.histogram.min() as f64 / PICOS_PER_NANO)
    }

    /// Most expensive batch average, in nanoseconds per call
    pub fn max_ns(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        Some(self.histogram.max() as f64 / PICOS_PER_NANO)
    }

    /// Mean over batches, in nanoseconds per call
    pub fn mean_ns(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        Some(self.histogram.mean() / PICOS_PER_NANO)
    }

    /// Number of batches recorded
    pub fn len(&self) -> u64 {
        self.histogram.len()
    }

    pub fn is_empty(&self) -> bool {
        self.histogram.len() == 0
    }

    /// Merge another histogram into this one
    ///
    /// Used to combine the per-trial histograms of parallel bench trials.
    ///
    /// # Errors
    ///
    /// Returns an error if the histograms have incompatible configurations.
    pub fn merge(&mut self, other: &CallCostHistogram) -> Result<()> {
        self.histogram
            .add(&other.histogram)
            .map_err(|e| anyhow::anyhow!("Failed to merge histograms: {}", e))?;
        Ok(())
    }
}

impl Default for CallCostHistogram {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_histogram() {
        let hist = CallCostHistogram::new();
        assert_eq!(hist.len(), 0);
        assert!(hist.is_empty());
        assert!(hist.percentile_ns(50.0).is_none());
        assert!(hist.mean_ns().is_none());
    }

    #[test]
    fn test_sub_nanosecond_precision() {
        let mut hist = CallCostHistogram::new();
        // 2.5 ns per call
        hist.record_batch(Duration::from_nanos(2_500), 1_000);
        let min = hist.min_ns().unwrap();
        assert!((min - 2.5).abs() < 0.01, "min = {}", min);
    }

    #[test]
    fn test_zero_call_batch_ignored() {
        let mut hist = CallCostHistogram::new();
        hist.record_batch(Duration::from_nanos(100), 0);
        assert!(hist.is_empty());
    }

    #[test]
    fn test_percentiles() {
        let mut hist = CallCostHistogram::new();
        for i in 1..=100u64 {
            hist.record_batch(Duration::from_nanos(i * 1_000), 100);
        }
        // Batches average 10, 20, ..., 1000 ns per call
        let p50 = hist.percentile_ns(50.0).unwrap();
        let p99 = hist.percentile_ns(99.0).unwrap();
        assert!(p50 >= 490.0 && p50 <= 510.0, "p50 = {}", p50);
        assert!(p99 >= 980.0 && p99 <= 1000.0, "p99 = {}", p99);
    }

    #[test]
    fn test_merge() {
        let mut first = CallCostHistogram::new();
        first.record_batch(Duration::from_nanos(1_000), 100);
        let mut second = CallCostHistogram::new();
        second.record_batch(Duration::from_nanos(3_000), 100);

        first.merge(&second).unwrap();
        assert_eq!(first.len(), 2);
        let mean = first.mean_ns().unwrap();
        assert!((mean - 20.0).abs() < 0.1, "mean = {}", mean);
    }
}
