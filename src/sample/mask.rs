//! Boolean masks over `n` positions

use super::{sample, sample_with_probability};
use crate::distribution::binomial::BinomialCache;
use crate::distribution::UniformSource;
use crate::error::{Result, SampleError};

/// `n` fair coin flips
///
/// # Errors
///
/// [`SampleError::NegativeSize`] if `n < 0`.
pub fn array_mask<S: UniformSource + ?Sized>(n: i32, source: &mut S) -> Result<Vec<bool>> {
    let len = mask_len(n)?;
    Ok((0..len).map(|_| source.next_bool()).collect())
}

/// Mask of length `n` with exactly `min(k, n)` true positions, uniformly placed
///
/// A `k` of `n` or more sets every position without drawing.
///
/// # Errors
///
/// [`SampleError::NegativeSize`] if `n < 0` or `k < 0`.
pub fn array_mask_with_count<S: UniformSource + ?Sized>(
    n: i32,
    k: i32,
    source: &mut S,
) -> Result<Vec<bool>> {
    let len = mask_len(n)?;
    if k >= n {
        return Ok(vec![true; len]);
    }
    let mut mask = vec![false; len];
    for &position in sample(n, k, None, source)?.iter() {
        mask[position as usize] = true;
    }
    Ok(mask)
}

/// Mask of length `n` with each position true independently with probability `p`
///
/// # Errors
///
/// - [`SampleError::NegativeSize`] if `n < 0`
/// - [`SampleError::InvalidArgument`] if `p` is NaN
pub fn array_mask_with_probability<S: UniformSource + ?Sized>(
    n: i32,
    p: f64,
    source: &mut S,
    cache: &mut BinomialCache,
) -> Result<Vec<bool>> {
    let len = mask_len(n)?;
    if p >= 1.0 {
        return Ok(vec![true; len]);
    }
    let mut mask = vec![false; len];
    for position in sample_with_probability(n, p, source, cache)? {
        mask[position as usize] = true;
    }
    Ok(mask)
}

fn mask_len(n: i32) -> Result<usize> {
    usize::try_from(n).map_err(|_| SampleError::NegativeSize(n))
}
