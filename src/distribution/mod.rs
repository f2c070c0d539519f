//! Uniform random source and the distributions built directly on it
//!
//! Everything in this crate consumes randomness through the [`UniformSource`]
//! trait, which exposes exactly two primitives:
//!
//! - `next_u31()`: a nonnegative integer with 31 uniformly random bits
//! - `next_f64()`: a double uniformly distributed in `[0, 1)`
//!
//! Any `rand::RngCore` is a `UniformSource`, so seeding, jumping and stream
//! splitting stay with the generator's owner. This layer only turns raw bits
//! into precisely specified distributions.
//!
//! # Distributions
//!
//! - **Bounded integers** ([`bounded`]): exact (rejection-corrected) and biased
//!   (multiply-shift only) integers in `[0, bound)` or `[origin, bound)`
//! - **Binomial** ([`binomial`]): inverse transform for small means, BTPE
//!   rejection otherwise, with a caller-owned setup cache
//!
//! # Example
//!
//! ```
//! use exactsample::distribution::{bounded, seeded};
//!
//! let mut rng = seeded(42);
//! let roll = bounded::next_int(6, &mut rng).unwrap();
//! assert!((0..6).contains(&roll));
//! ```

pub mod binomial;
pub mod bounded;

use rand::{Rng, RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Provider of uniform random bits
///
/// Consumption is strictly sequential within one call. Nothing here requires
/// the source to be safe for concurrent use; each thread should own its own.
pub trait UniformSource {
    /// Next value with 31 uniformly random bits, in `[0, 2^31)`
    fn next_u31(&mut self) -> u32;

    /// Next value uniformly distributed in `[0, 1)`
    fn next_f64(&mut self) -> f64;

    /// Next fair coin flip, taken from one bit of `next_u31`
    #[inline]
    fn next_bool(&mut self) -> bool {
        self.next_u31() >> 30 != 0
    }
}

impl<R: RngCore + ?Sized> UniformSource for R {
    #[inline(always)]
    fn next_u31(&mut self) -> u32 {
        // High bits of xoshiro-family outputs are the strongest
        self.next_u32() >> 1
    }

    #[inline(always)]
    fn next_f64(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Create a seeded xoshiro256++ source
///
/// Useful for reproducible tests and benchmark trials.
pub fn seeded(seed: u64) -> Xoshiro256PlusPlus {
    Xoshiro256PlusPlus::seed_from_u64(seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_u31_range() {
        let mut rng = seeded(12345);
        for _ in 0..10_000 {
            assert!(rng.next_u31() < (1 << 31));
        }
    }

    #[test]
    fn test_next_f64_range() {
        let mut rng = seeded(7);
        for _ in 0..10_000 {
            let u = rng.next_f64();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn test_next_bool_is_roughly_fair() {
        let mut rng = seeded(99);
        let heads = (0..10_000).filter(|_| rng.next_bool()).count();
        assert!(heads > 4_700 && heads < 5_300, "heads = {}", heads);
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = seeded(2024);
        let mut b = seeded(2024);
        for _ in 0..10 {
            assert_eq!(a.next_u31(), b.next_u31());
        }
    }

    #[test]
    fn test_trait_object_source() {
        let mut rng = seeded(3);
        let source: &mut dyn RngCore = &mut rng;
        assert!(UniformSource::next_u31(source) < (1 << 31));
    }
}
