//! Unconstrained pairs and triples
//!
//! A pair draws `i` from `[0, n)` and `j` from `[0, n - 1)`. The one value of
//! `j` that collides with `i` is relabelled to `n - 1`, the single value the
//! smaller range cannot produce, which makes the map from `(i, j)` draws to
//! ordered pairs a bijection. Triples extend this with `k` from `[0, n - 2)`
//! and a relabel onto `n - 1` or `n - 2`, whichever is still free.

use super::{IndexPair, IndexTriple};
use crate::distribution::bounded::below;
use crate::distribution::UniformSource;
use crate::error::{Result, SampleError};

/// Two distinct indices from `[0, n)`, all ordered pairs equally likely
///
/// # Errors
///
/// [`SampleError::InvalidArgument`] if `n < 2`.
pub fn next_int_pair<S: UniformSource + ?Sized>(n: i32, source: &mut S) -> Result<IndexPair> {
    check_n(n, 2, "pair")?;
    let (i, j) = draw_pair(n, source);
    Ok(IndexPair::from_distinct(i, j))
}

/// Two distinct indices from `[0, n)` with `i < j`, all such pairs equally likely
///
/// # Errors
///
/// [`SampleError::InvalidArgument`] if `n < 2`.
pub fn next_sorted_int_pair<S: UniformSource + ?Sized>(
    n: i32,
    source: &mut S,
) -> Result<IndexPair> {
    check_n(n, 2, "pair")?;
    let (i, j) = draw_pair(n, source);
    Ok(IndexPair::sorted_from_distinct(i, j))
}

/// Three pairwise distinct indices from `[0, n)`, all ordered triples equally likely
///
/// # Errors
///
/// [`SampleError::InvalidArgument`] if `n < 3`.
pub fn next_int_triple<S: UniformSource + ?Sized>(n: i32, source: &mut S) -> Result<IndexTriple> {
    check_n(n, 3, "triple")?;
    let (i, j, k) = draw_triple(n, source);
    Ok(IndexTriple::from_distinct(i, j, k))
}

/// Three pairwise distinct indices from `[0, n)` in ascending order
///
/// # Errors
///
/// [`SampleError::InvalidArgument`] if `n < 3`.
pub fn next_sorted_int_triple<S: UniformSource + ?Sized>(
    n: i32,
    source: &mut S,
) -> Result<IndexTriple> {
    check_n(n, 3, "triple")?;
    let (i, j, k) = draw_triple(n, source);
    Ok(IndexTriple::sorted_from_distinct(i, j, k))
}

pub(super) fn check_n(n: i32, minimum: i32, what: &str) -> Result<()> {
    if n < minimum {
        return Err(SampleError::invalid(format!(
            "n must be at least {} for a {}, got {}",
            minimum, what, n
        )));
    }
    Ok(())
}

#[inline]
fn draw_pair<S: UniformSource + ?Sized>(n: i32, source: &mut S) -> (i32, i32) {
    let i = below(n, source);
    let mut j = below(n - 1, source);
    if j == i {
        j = n - 1;
    }
    (i, j)
}

#[inline]
fn draw_triple<S: UniformSource + ?Sized>(n: i32, source: &mut S) -> (i32, i32, i32) {
    let i = below(n, source);
    let mut j = below(n - 1, source);
    let mut k = below(n - 2, source);
    if j == i {
        j = n - 1;
    }
    if k == i {
        k = n - 1;
        if k == j {
            k = n - 2;
        }
    } else if k == j {
        k = n - 2;
        if k == i {
            k = n - 1;
        }
    }
    (i, j, k)
}
