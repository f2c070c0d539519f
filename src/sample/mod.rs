//! Random k-subsets of `[0, n)`
//!
//! [`sample`] draws `k` distinct integers from `[0, n)` so that every one of
//! the `C(n, k)` subsets is equally likely. It dispatches to one of three
//! algorithms via [`SampleAlgorithm::select`]; each is also available on its
//! own.
//!
//! # Output buffers
//!
//! Every sampler takes an optional caller buffer. When the buffer holds at
//! least `k` values, its first `k` slots are overwritten and the result
//! borrows them ([`Sample::Reused`]). Otherwise a new vector is allocated
//! ([`Sample::Allocated`]) and the buffer is left untouched. Callers that rely
//! on the buffer being filled must check [`Sample::is_reused`].
//!
//! # Example
//!
//! ```
//! use exactsample::distribution::seeded;
//! use exactsample::sample::sample;
//!
//! let mut rng = seeded(11);
//! let mut buffer = [0i32; 16];
//!
//! let picked = sample(1_000, 10, Some(&mut buffer[..]), &mut rng).unwrap();
//! assert!(picked.is_reused());
//! assert_eq!(picked.len(), 10);
//!
//! let too_many = sample(1_000, 20, Some(&mut buffer[..]), &mut rng).unwrap();
//! assert!(!too_many.is_reused());
//! ```

mod algorithm;
pub mod mask;

pub use algorithm::{sample_insertion, sample_pool, sample_reservoir, SampleAlgorithm};
pub use mask::{array_mask, array_mask_with_count, array_mask_with_probability};

use crate::distribution::binomial::BinomialCache;
use crate::distribution::UniformSource;
use crate::error::{Result, SampleError};
use std::ops::{Deref, DerefMut};

/// The `k` sampled values, in the caller's buffer or in a new vector
#[derive(Debug, PartialEq, Eq)]
pub enum Sample<'a> {
    /// Written to the first `k` slots of the caller's buffer
    Reused(&'a mut [i32]),
    /// The caller's buffer was absent or shorter than `k`
    Allocated(Vec<i32>),
}

impl Sample<'_> {
    /// True if the caller's buffer holds the result
    pub fn is_reused(&self) -> bool {
        matches!(self, Sample::Reused(_))
    }

    /// Owned copy of the values; free when already allocated
    pub fn into_vec(self) -> Vec<i32> {
        match self {
            Sample::Reused(values) => values.to_vec(),
            Sample::Allocated(values) => values,
        }
    }
}

impl Deref for Sample<'_> {
    type Target = [i32];

    fn deref(&self) -> &[i32] {
        match self {
            Sample::Reused(values) => &values[..],
            Sample::Allocated(values) => &values[..],
        }
    }
}

impl DerefMut for Sample<'_> {
    fn deref_mut(&mut self) -> &mut [i32] {
        match self {
            Sample::Reused(values) => &mut values[..],
            Sample::Allocated(values) => &mut values[..],
        }
    }
}

impl From<Sample<'_>> for Vec<i32> {
    fn from(sample: Sample<'_>) -> Self {
        sample.into_vec()
    }
}

/// Output slots for `k` values: the caller's buffer if it is long enough
pub(crate) fn output(k: usize, buffer: Option<&mut [i32]>) -> Sample<'_> {
    match buffer {
        Some(buffer) if buffer.len() >= k => Sample::Reused(&mut buffer[..k]),
        _ => Sample::Allocated(vec![0; k]),
    }
}

/// `k < 0` is a sizing error; any other `k > n`, negative `n` included, is a range error
pub(crate) fn check_sizes(n: i32, k: i32) -> Result<()> {
    if k < 0 {
        return Err(SampleError::NegativeSize(k));
    }
    if k > n {
        return Err(SampleError::invalid(format!(
            "k ({}) must be no greater than n ({})",
            k, n
        )));
    }
    Ok(())
}

/// `k` distinct integers from `[0, n)`, every subset equally likely
///
/// Uses O(min(k, n - k)) draws and O(min(n, k^2)) time. The order of the
/// values within the result is unspecified.
///
/// # Errors
///
/// - [`SampleError::NegativeSize`] if `k < 0`
/// - [`SampleError::InvalidArgument`] if `k > n`, which covers a negative `n`
pub fn sample<'a, S: UniformSource + ?Sized>(
    n: i32,
    k: i32,
    buffer: Option<&'a mut [i32]>,
    source: &mut S,
) -> Result<Sample<'a>> {
    SampleAlgorithm::select(n, k).run(n, k, buffer, source)
}

/// `k` distinct integers from `[0, n)` in a new vector
///
/// # Errors
///
/// Same as [`sample`].
pub fn sample_vec<S: UniformSource + ?Sized>(n: i32, k: i32, source: &mut S) -> Result<Vec<i32>> {
    sample(n, k, None, source).map(Sample::into_vec)
}

/// Subset of `[0, n)` including each integer independently with probability `p`
///
/// The size is drawn from binomial(n, p) through `cache`, then that many
/// integers are sampled. `p <= 0` gives an empty vector and `p >= 1` gives all
/// of `[0, n)`, in both cases without consuming any draws.
///
/// # Errors
///
/// - [`SampleError::NegativeSize`] if `n < 0` and `0 < p < 1`
/// - [`SampleError::InvalidArgument`] if `p` is NaN
pub fn sample_with_probability<S: UniformSource + ?Sized>(
    n: i32,
    p: f64,
    source: &mut S,
    cache: &mut BinomialCache,
) -> Result<Vec<i32>> {
    if p <= 0.0 {
        return Ok(Vec::new());
    }
    if n < 0 {
        return Err(SampleError::NegativeSize(n));
    }
    if p >= 1.0 {
        return Ok((0..n).collect());
    }
    let k = cache.next(n, p, source)?;
    sample_vec(n, k, source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::seeded;
    use crate::stats::{chi_square_critical, chi_square_uniform, mean, Confidence};
    use crate::testing::CountingSource;
    use proptest::prelude::*;

    #[test]
    fn test_zero_of_five_draws_nothing() {
        let mut rng = CountingSource::new(seeded(1));
        let result = sample(5, 0, None, &mut rng).unwrap();
        assert!(result.is_empty());
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_five_of_five_selects_everything() {
        let mut rng = seeded(2);
        assert_eq!(SampleAlgorithm::select(5, 5), SampleAlgorithm::Reservoir);
        let mut result = sample_vec(5, 5, &mut rng).unwrap();
        result.sort_unstable();
        assert_eq!(result, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_probability_extremes_draw_nothing() {
        let mut rng = CountingSource::new(seeded(3));
        let mut cache = BinomialCache::new();
        assert!(sample_with_probability(10, 0.0, &mut rng, &mut cache)
            .unwrap()
            .is_empty());
        assert!(sample_with_probability(10, -3.0, &mut rng, &mut cache)
            .unwrap()
            .is_empty());
        assert_eq!(
            sample_with_probability(10, 1.0, &mut rng, &mut cache).unwrap(),
            (0..10).collect::<Vec<_>>()
        );
        assert_eq!(
            sample_with_probability(4, 7.5, &mut rng, &mut cache).unwrap(),
            vec![0, 1, 2, 3]
        );
        assert_eq!(rng.draws(), 0);
        assert!(cache.current().is_none());
    }

    #[test]
    fn test_probability_errors() {
        let mut rng = seeded(4);
        let mut cache = BinomialCache::new();
        assert_eq!(
            sample_with_probability(-1, 0.5, &mut rng, &mut cache),
            Err(SampleError::NegativeSize(-1))
        );
        assert!(matches!(
            sample_with_probability(10, f64::NAN, &mut rng, &mut cache),
            Err(SampleError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_negative_n_error_kinds() {
        let mut rng = CountingSource::new(seeded(5));
        let mut cache = BinomialCache::new();
        assert!(matches!(
            sample_vec(-1, 0, &mut rng),
            Err(SampleError::InvalidArgument(_))
        ));
        assert_eq!(sample_vec(-5, -1, &mut rng), Err(SampleError::NegativeSize(-1)));
        assert_eq!(
            sample_with_probability(-1, 0.0, &mut rng, &mut cache),
            Ok(Vec::new())
        );
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_probability_sample_size() {
        let mut rng = seeded(5);
        let mut cache = BinomialCache::new();
        let sizes: Vec<f64> = (0..5_000)
            .map(|_| {
                let result = sample_with_probability(200, 0.25, &mut rng, &mut cache).unwrap();
                let mut sorted = result.clone();
                sorted.sort_unstable();
                sorted.dedup();
                assert_eq!(sorted.len(), result.len());
                result.len() as f64
            })
            .collect();
        assert!((mean(&sizes) - 50.0).abs() < 0.5, "mean = {}", mean(&sizes));
        assert_eq!(cache.rebuilds(), 1);
    }

    #[test]
    fn test_probability_inclusion_is_uniform() {
        let mut rng = seeded(6);
        let mut cache = BinomialCache::new();
        let mut counts = vec![0u64; 20];
        for _ in 0..20_000 {
            for value in sample_with_probability(20, 0.3, &mut rng, &mut cache).unwrap() {
                counts[value as usize] += 1;
            }
        }
        let chi = chi_square_uniform(&counts);
        assert!(chi <= chi_square_critical(19, Confidence::P999), "chi = {}", chi);
    }

    #[test]
    fn test_buffer_is_reused_in_place() {
        let mut rng = seeded(7);
        let mut buffer = [-1i32; 8];
        let address = buffer.as_ptr();

        let first = sample(100, 5, Some(&mut buffer[..]), &mut rng).unwrap();
        assert!(first.is_reused());
        assert_eq!(first.as_ptr(), address);
        let first = first.into_vec();

        let second = sample(100, 5, Some(&mut buffer[..]), &mut rng).unwrap();
        assert!(second.is_reused());
        assert_eq!(second.as_ptr(), address);
        let second = second.into_vec();

        assert_eq!(&buffer[..5], &second[..]);
        assert_ne!(first, second);
        // Slots past k are untouched
        assert_eq!(&buffer[5..], &[-1, -1, -1]);
    }

    #[test]
    fn test_short_buffer_is_left_alone() {
        let mut rng = seeded(8);
        let mut buffer = [-1i32; 3];
        let result = sample(100, 4, Some(&mut buffer[..]), &mut rng).unwrap();
        assert!(!result.is_reused());
        assert_eq!(result.len(), 4);
        drop(result);
        assert_eq!(buffer, [-1, -1, -1]);
    }

    #[test]
    fn test_every_algorithm_reuses_buffer() {
        let mut rng = seeded(9);
        let mut buffer = vec![0i32; 10];
        for algorithm in SampleAlgorithm::ALL {
            let result = algorithm.run(50, 10, Some(&mut buffer[..]), &mut rng).unwrap();
            assert!(result.is_reused(), "{}", algorithm);
        }
    }

    #[test]
    fn test_dispatch_matches_selected_algorithm() {
        for (n, k) in [(1_000, 10), (1_000, 100), (1_000, 600)] {
            let mut a = seeded(10);
            let mut b = seeded(10);
            let dispatched = sample_vec(n, k, &mut a).unwrap();
            let direct = SampleAlgorithm::select(n, k)
                .run(n, k, None, &mut b)
                .unwrap()
                .into_vec();
            assert_eq!(dispatched, direct);
        }
    }

    proptest! {
        #[test]
        fn prop_samples_distinct_and_bounded(
            n in 0i32..2_000,
            fraction in 0.0f64..=1.0,
            seed in any::<u64>(),
        ) {
            let k = (f64::from(n) * fraction) as i32;
            let mut rng = seeded(seed);
            let mut result = sample_vec(n, k, &mut rng).unwrap();
            prop_assert_eq!(result.len(), k as usize);
            prop_assert!(result.iter().all(|v| (0..n).contains(v)));
            result.sort_unstable();
            result.dedup();
            prop_assert_eq!(result.len(), k as usize);
        }
    }
}
