//! Timing and formatting helpers for the bench harness
//!
//! Sampling calls cost nanoseconds, so costs are carried as `f64` nanoseconds
//! per call and formatted with sub-nanosecond precision.

use std::time::{Duration, Instant};

/// Start point of a timed section
///
/// A thin wrapper around `std::time::Instant` with the conversions the bench
/// harness needs.
#[derive(Debug, Clone, Copy)]
pub struct Timestamp {
    instant: Instant,
}

impl Timestamp {
    /// Create a new timestamp representing the current time
    #[inline]
    pub fn now() -> Self {
        Self {
            instant: Instant::now(),
        }
    }

    /// Get the elapsed time since this timestamp
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.instant.elapsed()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

/// Average nanoseconds per call; zero when no calls were made
pub fn ns_per_call(elapsed: Duration, calls: u64) -> f64 {
    if calls == 0 {
        return 0.0;
    }
    elapsed.as_nanos() as f64 / calls as f64
}

/// Calls per second; zero for a zero duration
pub fn calls_per_second(calls: u64, elapsed: Duration) -> f64 {
    let seconds = elapsed.as_secs_f64();
    if seconds > 0.0 {
        calls as f64 / seconds
    } else {
        0.0
    }
}

/// Format a per-call cost given in nanoseconds
///
/// # Examples
///
/// ```
/// use exactsample::util::time::format_ns;
///
/// assert_eq!(format_ns(4.25), "4.25ns");
/// assert_eq!(format_ns(1_500.0), "1.50us");
/// assert_eq!(format_ns(2_500_000.0), "2.50ms");
/// ```
pub fn format_ns(ns: f64) -> String {
    if ns < 1_000.0 {
        format!("{:.2}ns", ns)
    } else if ns < 1_000_000.0 {
        format!("{:.2}us", ns / 1_000.0)
    } else if ns < 1_000_000_000.0 {
        format!("{:.2}ms", ns / 1_000_000.0)
    } else {
        format!("{:.2}s", ns / 1_000_000_000.0)
    }
}

/// Format a wall-clock duration in human-readable form
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use exactsample::util::time::format_duration;
///
/// assert_eq!(format_duration(Duration::from_nanos(500)), "500ns");
/// assert_eq!(format_duration(Duration::from_micros(2500)), "2.50ms");
/// assert_eq!(format_duration(Duration::from_secs(5)), "5.00s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();

    if nanos < 1_000 {
        format!("{}ns", nanos)
    } else {
        format_ns(nanos as f64)
    }
}

/// Format a call rate
///
/// # Examples
///
/// ```
/// use exactsample::util::time::format_rate;
///
/// assert_eq!(format_rate(500.0), "500");
/// assert_eq!(format_rate(2_500_000.0), "2.50M");
/// ```
pub fn format_rate(rate: f64) -> String {
    if rate < 1_000.0 {
        format!("{:.0}", rate)
    } else if rate < 1_000_000.0 {
        format!("{:.2}K", rate / 1_000.0)
    } else if rate < 1_000_000_000.0 {
        format!("{:.2}M", rate / 1_000_000.0)
    } else {
        format!("{:.2}G", rate / 1_000_000_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_timestamp_elapsed() {
        let start = Timestamp::now();
        thread::sleep(Duration::from_millis(10));
        assert!(start.elapsed() >= Duration::from_millis(10));
    }

    #[test]
    fn test_ns_per_call() {
        assert_eq!(ns_per_call(Duration::from_micros(5), 1_000), 5.0);
        assert_eq!(ns_per_call(Duration::from_micros(5), 0), 0.0);
    }

    #[test]
    fn test_calls_per_second() {
        assert_eq!(calls_per_second(1_000, Duration::from_secs(10)), 100.0);
        assert_eq!(calls_per_second(1_000, Duration::ZERO), 0.0);
    }

    #[test]
    fn test_format_ns() {
        assert_eq!(format_ns(0.5), "0.50ns");
        assert_eq!(format_ns(12.0), "12.00ns");
        assert_eq!(format_ns(1_500.0), "1.50us");
        assert_eq!(format_ns(1_500_000_000.0), "1.50s");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_nanos(500)), "500ns");
        assert_eq!(format_duration(Duration::from_nanos(1500)), "1.50us");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(1500.0), "1.50K");
        assert_eq!(format_rate(1_500_000_000.0), "1.50G");
    }
}
