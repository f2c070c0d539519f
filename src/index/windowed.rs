//! Pairs and triples whose indices lie within a window of each other
//!
//! Every valid tuple is reached by exactly one combination of bounded draws.
//! With `z1 = n - window`, the tuples split into two regions:
//!
//! - **interior**: the smallest index `q` is below `z1`, so all `window`
//!   positions to its right exist. The remaining indices are offsets into
//!   `(q, q + window]` and the position of `q` within the tuple is drawn too.
//! - **boundary**: every index lies in the last `window` positions
//!   `[z1, n)`. These are decoded by skipping over the indices already taken.
//!
//! For pairs the first draw covers `2 * z1` interior values plus `window - 1`
//! boundary values; for triples `3 * z1` plus `window - 2`. The remaining draws
//! are the offsets, so no candidate is ever rejected.
//!
//! A window of `n - 1` or more admits every tuple, and the unconstrained
//! generators from [`crate::index`] are used instead.

use super::pair::check_n;
use super::{
    next_int_pair, next_int_triple, next_sorted_int_pair, next_sorted_int_triple, IndexPair,
    IndexTriple,
};
use crate::distribution::bounded::below;
use crate::distribution::UniformSource;
use crate::error::{Result, SampleError};

/// Two distinct indices from `[0, n)` at most `window` apart
///
/// # Errors
///
/// [`SampleError::InvalidArgument`] if `window < 1`, if `n < 2`, or if the
/// number of valid pairs is too large to index with an `i32`.
pub fn next_windowed_int_pair<S: UniformSource + ?Sized>(
    n: i32,
    window: i32,
    source: &mut S,
) -> Result<IndexPair> {
    let (i, j) = match PairRegions::new(n, window)? {
        Some(regions) => regions.draw(source),
        None => return next_int_pair(n, source),
    };
    Ok(IndexPair::from_distinct(i, j))
}

/// Two indices from `[0, n)` with `i < j <= i + window`
///
/// # Errors
///
/// Same as [`next_windowed_int_pair`].
pub fn next_sorted_windowed_int_pair<S: UniformSource + ?Sized>(
    n: i32,
    window: i32,
    source: &mut S,
) -> Result<IndexPair> {
    let (i, j) = match PairRegions::new(n, window)? {
        Some(regions) => regions.draw(source),
        None => return next_sorted_int_pair(n, source),
    };
    Ok(IndexPair::sorted_from_distinct(i, j))
}

/// Three pairwise distinct indices from `[0, n)` spanning at most `window`
///
/// # Errors
///
/// [`SampleError::InvalidArgument`] if `window < 2`, if `n < 3`, or if the
/// number of valid triples is too large to index with an `i32`.
pub fn next_windowed_int_triple<S: UniformSource + ?Sized>(
    n: i32,
    window: i32,
    source: &mut S,
) -> Result<IndexTriple> {
    let (i, j, k) = match TripleRegions::new(n, window)? {
        Some(regions) => regions.draw(source),
        None => return next_int_triple(n, source),
    };
    Ok(IndexTriple::from_distinct(i, j, k))
}

/// Three indices from `[0, n)` with `i < j < k <= i + window`
///
/// # Errors
///
/// Same as [`next_windowed_int_triple`].
pub fn next_sorted_windowed_int_triple<S: UniformSource + ?Sized>(
    n: i32,
    window: i32,
    source: &mut S,
) -> Result<IndexTriple> {
    let (i, j, k) = match TripleRegions::new(n, window)? {
        Some(regions) => regions.draw(source),
        None => return next_sorted_int_triple(n, source),
    };
    Ok(IndexTriple::sorted_from_distinct(i, j, k))
}

fn check_window(window: i32, minimum: i32, what: &str) -> Result<()> {
    if window < minimum {
        return Err(SampleError::invalid(format!(
            "window must be at least {} for a {}, got {}",
            minimum, what, window
        )));
    }
    Ok(())
}

fn draw_range(count: i64, n: i32, window: i32) -> Result<i32> {
    i32::try_from(count).map_err(|_| {
        SampleError::invalid(format!(
            "too many windowed tuples to index for n = {}, window = {}",
            n, window
        ))
    })
}

/// Draw ranges for one `(n, window)`; `None` from `new` means unconstrained
struct PairRegions {
    z1: i32,
    z2: i32,
    first: i32,
    window: i32,
}

impl PairRegions {
    fn new(n: i32, window: i32) -> Result<Option<Self>> {
        check_window(window, 1, "pair")?;
        check_n(n, 2, "pair")?;
        if window >= n - 1 {
            return Ok(None);
        }
        let z1 = n - window;
        let z2 = 2 * i64::from(z1);
        let first = draw_range(z2 + i64::from(window) - 1, n, window)?;
        Ok(Some(Self {
            z1,
            // first >= z2 and first fits
            z2: z2 as i32,
            first,
            window,
        }))
    }

    #[inline]
    fn draw<S: UniformSource + ?Sized>(&self, source: &mut S) -> (i32, i32) {
        let i = below(self.first, source);
        let j = below(self.window, source);
        if i < self.z2 {
            let q = i >> 1;
            let other = q + 1 + j;
            if i & 1 == 0 {
                (q, other)
            } else {
                (other, q)
            }
        } else {
            let i = i - self.z1;
            let j = j + self.z1;
            (if i >= j { i + 1 } else { i }, j)
        }
    }
}

struct TripleRegions {
    z1: i32,
    z3: i32,
    first: i32,
    window: i32,
}

impl TripleRegions {
    fn new(n: i32, window: i32) -> Result<Option<Self>> {
        check_window(window, 2, "triple")?;
        check_n(n, 3, "triple")?;
        if window >= n - 1 {
            return Ok(None);
        }
        let z1 = n - window;
        let z3 = 3 * i64::from(z1);
        let first = draw_range(z3 + i64::from(window) - 2, n, window)?;
        Ok(Some(Self {
            z1,
            z3: z3 as i32,
            first,
            window,
        }))
    }

    #[inline]
    fn draw<S: UniformSource + ?Sized>(&self, source: &mut S) -> (i32, i32, i32) {
        let i = below(self.first, source);
        let j = below(self.window, source);
        let mut k = below(self.window - 1, source);
        if k >= j {
            k += 1;
        }

        if i < self.z3 {
            let q = i / 3;
            let (a, b) = (q + 1 + j, q + 1 + k);
            match i % 3 {
                0 => (q, a, b),
                1 => (a, q, b),
                _ => (a, b, q),
            }
        } else {
            let j = j + self.z1;
            let k = k + self.z1;
            let (lower, higher) = if j < k { (j, k) } else { (k, j) };
            let mut i = i - self.z3 + self.z1;
            if i >= lower {
                i += 1;
                if i >= higher {
                    i += 1;
                }
            }
            (i, j, k)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::seeded;
    use crate::stats::{chi_square_critical, chi_square_uniform, Confidence};
    use crate::testing::CountingSource;
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn windowed_pair_count(n: i32, window: i32) -> usize {
        let mut count = 0;
        for i in 0..n {
            for j in 0..n {
                if i != j && (i - j).abs() <= window {
                    count += 1;
                }
            }
        }
        count
    }

    fn windowed_triple_count(n: i32, window: i32) -> usize {
        let mut count = 0;
        for i in 0..n {
            for j in 0..n {
                for k in 0..n {
                    let distinct = i != j && i != k && j != k;
                    let span = i.max(j).max(k) - i.min(j).min(k);
                    if distinct && span <= window {
                        count += 1;
                    }
                }
            }
        }
        count
    }

    fn assert_uniform<T: std::hash::Hash + Eq>(counts: &HashMap<T, u64>, cells: usize) {
        assert_eq!(counts.len(), cells, "not every windowed tuple was produced");
        let observed: Vec<u64> = counts.values().copied().collect();
        let chi = chi_square_uniform(&observed);
        let critical = chi_square_critical(cells - 1, Confidence::P999);
        assert!(chi <= critical, "chi = {} > {}", chi, critical);
    }

    #[test]
    fn test_invalid_window_and_n() {
        let mut rng = seeded(1);
        assert!(matches!(
            next_windowed_int_pair(10, 0, &mut rng),
            Err(SampleError::InvalidArgument(_))
        ));
        assert!(next_sorted_windowed_int_pair(1, 1, &mut rng).is_err());
        assert!(next_windowed_int_triple(10, 1, &mut rng).is_err());
        assert!(next_sorted_windowed_int_triple(2, 5, &mut rng).is_err());
    }

    #[test]
    fn test_oversized_range_rejected() {
        let mut rng = seeded(1);
        // 3 * (i32::MAX - 2) does not fit in an i32
        assert!(next_windowed_int_triple(i32::MAX, 2, &mut rng).is_err());
        assert!(next_windowed_int_pair(i32::MAX, 1, &mut rng).is_err());
        // 2 * 1_000_000_000 + 99 does
        assert!(next_windowed_int_pair(1_000_000_100, 100, &mut rng).is_ok());
    }

    #[test]
    fn test_wide_window_falls_back_to_unconstrained() {
        // Same draws as the unconstrained generator for the same seed
        for window in [9, 10, 1_000] {
            let mut a = seeded(5);
            let mut b = seeded(5);
            for _ in 0..100 {
                assert_eq!(
                    next_windowed_int_pair(10, window, &mut a).unwrap(),
                    next_int_pair(10, &mut b).unwrap()
                );
                assert_eq!(
                    next_sorted_windowed_int_triple(10, window, &mut a).unwrap(),
                    next_sorted_int_triple(10, &mut b).unwrap()
                );
            }
        }
    }

    #[test]
    fn test_constant_draw_count() {
        let mut rng = CountingSource::new(seeded(3));
        for _ in 0..1_000 {
            next_windowed_int_triple(1_000, 4, &mut rng).unwrap();
        }
        // Three bounded draws each, plus rare rejections inside the bounded draws
        assert!(rng.draws() >= 3_000 && rng.draws() < 3_010);
    }

    #[test]
    fn test_exhaustive_windowed_pairs_uniform() {
        for (n, window) in [(3, 1), (5, 1), (6, 2), (6, 3), (6, 4)] {
            let cells = windowed_pair_count(n, window);
            let mut rng = seeded((n * 10 + window) as u64);
            let mut counts = HashMap::new();
            for _ in 0..cells * 2_000 {
                let pair = next_windowed_int_pair(n, window, &mut rng).unwrap();
                assert!(pair.span() <= window as u32);
                *counts.entry(pair).or_insert(0u64) += 1;
            }
            assert_uniform(&counts, cells);
        }
    }

    #[test]
    fn test_exhaustive_sorted_windowed_pairs_uniform() {
        for (n, window) in [(4, 1), (6, 2), (6, 3)] {
            let cells = windowed_pair_count(n, window) / 2;
            let mut rng = seeded((n * 100 + window) as u64);
            let mut counts = HashMap::new();
            for _ in 0..cells * 2_000 {
                let pair = next_sorted_windowed_int_pair(n, window, &mut rng).unwrap();
                assert!(pair.is_sorted());
                assert!(pair.span() <= window as u32);
                *counts.entry(pair).or_insert(0u64) += 1;
            }
            assert_uniform(&counts, cells);
        }
    }

    #[test]
    fn test_exhaustive_windowed_triples_uniform() {
        for (n, window) in [(4, 2), (5, 2), (6, 2), (6, 3), (6, 4)] {
            let cells = windowed_triple_count(n, window);
            let mut rng = seeded((n * 1_000 + window) as u64);
            let mut counts = HashMap::new();
            for _ in 0..cells * 2_000 {
                let triple = next_windowed_int_triple(n, window, &mut rng).unwrap();
                assert!(triple.span() <= window as u32);
                *counts.entry(triple).or_insert(0u64) += 1;
            }
            assert_uniform(&counts, cells);
        }
    }

    #[test]
    fn test_exhaustive_sorted_windowed_triples_uniform() {
        for (n, window) in [(5, 2), (6, 3)] {
            let cells = windowed_triple_count(n, window) / 6;
            let mut rng = seeded((n * 10_000 + window) as u64);
            let mut counts = HashMap::new();
            for _ in 0..cells * 2_000 {
                let triple = next_sorted_windowed_int_triple(n, window, &mut rng).unwrap();
                assert!(triple.is_sorted());
                assert!(triple.span() <= window as u32);
                *counts.entry(triple).or_insert(0u64) += 1;
            }
            assert_uniform(&counts, cells);
        }
    }

    proptest! {
        #[test]
        fn prop_windowed_pair_constraint(
            n in 2i32..5_000,
            window in 1i32..100,
            seed in any::<u64>(),
        ) {
            let mut rng = seeded(seed);
            let pair = next_windowed_int_pair(n, window, &mut rng).unwrap();
            prop_assert_ne!(pair.i(), pair.j());
            prop_assert!(pair.span() <= window as u32);
            prop_assert!((0..n).contains(&pair.i()) && (0..n).contains(&pair.j()));
        }

        #[test]
        fn prop_windowed_triple_constraint(
            n in 3i32..5_000,
            window in 2i32..100,
            seed in any::<u64>(),
        ) {
            let mut rng = seeded(seed);
            let [i, j, k] = next_windowed_int_triple(n, window, &mut rng).unwrap().to_array();
            prop_assert!(i != j && i != k && j != k);
            prop_assert!(i.max(j).max(k) - i.min(j).min(k) <= window);
            for x in [i, j, k] {
                prop_assert!((0..n).contains(&x));
            }
        }
    }
}
