//! Bounded integer generation
//!
//! Converts 31 uniform bits into an integer in `[0, bound)` with Lemire's
//! multiply-shift method.
//!
//! # Exact variant
//!
//! A 31-bit draw `x` is multiplied by `bound`, giving a 62-bit product. The high
//! 31 bits are the candidate result, the low 31 bits act as a remainder `r`.
//! Each candidate is produced by either `floor(2^31 / bound)` or one more value
//! of `x`. When `r < bound` the draw may belong to an over-represented
//! candidate, so `threshold = (2^31 - bound) mod bound` is computed and `x` is
//! redrawn while `r < threshold`. Exactly `2^31 mod bound` draws are discarded,
//! one per over-represented candidate, which leaves every outcome with equal
//! probability under a uniform 31-bit source.
//!
//! # Biased variant
//!
//! The same multiply-shift without the rejection step. One draw per call, but
//! outcomes are not exactly uniform unless `bound` is a power of two. The exact
//! bias is published by [`biased_int_bias`].
//!
//! # Example
//!
//! ```
//! use exactsample::distribution::{bounded, seeded};
//!
//! let mut rng = seeded(7);
//! let die = bounded::next_int_range(1, 7, &mut rng).unwrap();
//! assert!((1..7).contains(&die));
//!
//! let fast = bounded::next_biased_int(1024, &mut rng).unwrap();
//! assert!(fast < 1024);
//! ```

use super::UniformSource;
use crate::error::{Result, SampleError};

const TWO_POW_31: u64 = 1 << 31;
const LOW_31_BITS: u64 = 0x7fff_ffff;

/// Uniform integer in `[0, bound)`, exactly
///
/// # Errors
///
/// [`SampleError::InvalidArgument`] if `bound < 1`.
pub fn next_int<S: UniformSource + ?Sized>(bound: i32, source: &mut S) -> Result<i32> {
    check_bound(bound)?;
    Ok(below(bound, source))
}

/// Uniform integer in `[origin, bound)`, exactly
///
/// # Errors
///
/// [`SampleError::InvalidArgument`] if `bound <= origin`, or if the width of the
/// range does not fit in a positive `i32`.
pub fn next_int_range<S: UniformSource + ?Sized>(
    origin: i32,
    bound: i32,
    source: &mut S,
) -> Result<i32> {
    let width = range_width(origin, bound)?;
    Ok(origin + below(width, source))
}

/// Integer in `[0, bound)` by multiply-shift only
///
/// Faster than [`next_int`] because it never redraws, but for a `bound` that is
/// not a power of two some outcomes are more likely than others by at most
/// `2^-31`. See [`biased_int_bias`] for the exact figures.
///
/// # Errors
///
/// [`SampleError::InvalidArgument`] if `bound < 1`.
pub fn next_biased_int<S: UniformSource + ?Sized>(bound: i32, source: &mut S) -> Result<i32> {
    check_bound(bound)?;
    Ok(biased_below(bound, source))
}

/// Integer in `[origin, bound)` by multiply-shift only
///
/// # Errors
///
/// Same as [`next_int_range`].
pub fn next_biased_int_range<S: UniformSource + ?Sized>(
    origin: i32,
    bound: i32,
    source: &mut S,
) -> Result<i32> {
    let width = range_width(origin, bound)?;
    Ok(origin + biased_below(width, source))
}

/// Exact draw for a bound the caller has already validated
#[inline]
pub(crate) fn below<S: UniformSource + ?Sized>(bound: i32, source: &mut S) -> i32 {
    debug_assert!(bound > 0, "bound must be positive");
    let bound = bound as u64;
    let mut product = u64::from(source.next_u31()) * bound;
    let mut low31 = product & LOW_31_BITS;
    if low31 < bound {
        let threshold = (TWO_POW_31 - bound) % bound;
        while low31 < threshold {
            product = u64::from(source.next_u31()) * bound;
            low31 = product & LOW_31_BITS;
        }
    }
    (product >> 31) as i32
}

#[inline]
pub(crate) fn biased_below<S: UniformSource + ?Sized>(bound: i32, source: &mut S) -> i32 {
    debug_assert!(bound > 0, "bound must be positive");
    ((u64::from(source.next_u31()) * bound as u64) >> 31) as i32
}

fn check_bound(bound: i32) -> Result<()> {
    if bound < 1 {
        return Err(SampleError::invalid(format!(
            "bound must be positive, got {}",
            bound
        )));
    }
    Ok(())
}

fn range_width(origin: i32, bound: i32) -> Result<i32> {
    let width = i64::from(bound) - i64::from(origin);
    if width < 1 {
        return Err(SampleError::invalid(format!(
            "bound ({}) must be greater than origin ({})",
            bound, origin
        )));
    }
    i32::try_from(width).map_err(|_| {
        SampleError::invalid(format!(
            "range [{}, {}) is wider than 2^31 - 1",
            origin, bound
        ))
    })
}

/// Exact bias of [`next_biased_int`] for one bound
///
/// Multiply-shift maps the `2^31` possible draws onto `bound` outcomes. With
/// `f = floor(2^31 / bound)` and `m = 2^31 mod bound`, exactly `m` outcomes
/// ("heavy") receive `f + 1` draws and the other `bound - m` ("light") receive
/// `f` draws. Consequently:
///
/// - heavy probability `(f + 1) / 2^31`, light probability `f / 2^31`
/// - largest absolute deviation from `1 / bound` is
///   `max(m, bound - m) / (bound * 2^31)` when `m > 0`, never above `2^-31`
/// - total variation distance from uniform is `m * (bound - m) / (bound * 2^31)`
///
/// All of these are zero when `bound` is a power of two.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiasProfile {
    /// The bound this profile describes
    pub bound: i32,
    /// Outcomes reached by `f + 1` draws
    pub heavy_outcomes: u32,
    /// Outcomes reached by `f` draws
    pub light_outcomes: u32,
    /// Probability of each heavy outcome
    pub heavy_probability: f64,
    /// Probability of each light outcome
    pub light_probability: f64,
    /// Largest `|P(outcome) - 1/bound|` over all outcomes
    pub max_abs_error: f64,
    /// Total variation distance from the uniform distribution
    pub total_variation: f64,
}

impl BiasProfile {
    /// True when the biased generator is exactly uniform for this bound
    pub fn is_exact(&self) -> bool {
        self.heavy_outcomes == 0
    }

    /// Number of 31-bit draws that map to `value` under multiply-shift
    ///
    /// Draw `x` maps to `value` when `value * 2^31 <= x * bound < (value + 1) * 2^31`,
    /// so the count is `ceil((value + 1) * 2^31 / bound) - ceil(value * 2^31 / bound)`.
    /// Returns 0 for values outside `[0, bound)`.
    pub fn outcome_weight(&self, value: i32) -> u64 {
        if value < 0 || value >= self.bound {
            return 0;
        }
        let bound = self.bound as u64;
        let first_draw = |q: u64| (q * TWO_POW_31).div_ceil(bound);
        first_draw(value as u64 + 1) - first_draw(value as u64)
    }
}

/// Compute the [`BiasProfile`] of the biased generator for `bound`
///
/// # Errors
///
/// [`SampleError::InvalidArgument`] if `bound < 1`.
pub fn biased_int_bias(bound: i32) -> Result<BiasProfile> {
    check_bound(bound)?;
    let b = bound as u64;
    let f = TWO_POW_31 / b;
    let m = TWO_POW_31 % b;
    let scale = TWO_POW_31 as f64;
    let denom = b as f64 * scale;

    let light_probability = f as f64 / scale;
    let (heavy_probability, max_abs_error) = if m == 0 {
        (light_probability, 0.0)
    } else {
        ((f + 1) as f64 / scale, m.max(b - m) as f64 / denom)
    };

    Ok(BiasProfile {
        bound,
        heavy_outcomes: m as u32,
        light_outcomes: (b - m) as u32,
        heavy_probability,
        light_probability,
        max_abs_error,
        total_variation: (m * (b - m)) as f64 / denom,
    })
}
