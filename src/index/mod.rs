//! Distinct index pairs and triples
//!
//! Generators for two or three distinct indices from `[0, n)` drawn without
//! replacement, in constant time and a constant number of bounded draws. Every
//! generator here is a bijection from a product of uniform integer ranges onto
//! the set of valid tuples, so there is no rejection loop and every valid tuple
//! is equally likely.
//!
//! - [`next_int_pair`] / [`next_int_triple`]: any distinct indices, in random
//!   order
//! - [`next_sorted_int_pair`] / [`next_sorted_int_triple`]: ascending
//! - [`windowed`]: all indices within `window` of each other
//!
//! # Example
//!
//! ```
//! use exactsample::distribution::seeded;
//! use exactsample::index::{next_int_pair, next_sorted_int_triple};
//!
//! let mut rng = seeded(3);
//! let pair = next_int_pair(10, &mut rng).unwrap();
//! assert_ne!(pair.i(), pair.j());
//!
//! let triple = next_sorted_int_triple(10, &mut rng).unwrap();
//! assert!(triple.i() < triple.j() && triple.j() < triple.k());
//! ```

mod pair;
pub mod windowed;

pub use pair::{next_int_pair, next_int_triple, next_sorted_int_pair, next_sorted_int_triple};
pub use windowed::{
    next_sorted_windowed_int_pair, next_sorted_windowed_int_triple, next_windowed_int_pair,
    next_windowed_int_triple,
};

use crate::error::{Result, SampleError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Two distinct indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexPair {
    i: i32,
    j: i32,
}

impl IndexPair {
    /// Pair `(i, j)` in the given order
    ///
    /// # Errors
    ///
    /// [`SampleError::InvalidArgument`] if `i == j`.
    pub fn new(i: i32, j: i32) -> Result<Self> {
        if i == j {
            return Err(SampleError::invalid(format!(
                "pair indices must be distinct, got ({}, {})",
                i, j
            )));
        }
        Ok(Self { i, j })
    }

    /// Pair of `a` and `b` in ascending order
    ///
    /// # Errors
    ///
    /// [`SampleError::InvalidArgument`] if `a == b`.
    pub fn sorted(a: i32, b: i32) -> Result<Self> {
        Self::new(a.min(b), a.max(b))
    }

    #[inline]
    pub(crate) fn from_distinct(i: i32, j: i32) -> Self {
        debug_assert_ne!(i, j);
        Self { i, j }
    }

    #[inline]
    pub(crate) fn sorted_from_distinct(a: i32, b: i32) -> Self {
        if a < b {
            Self::from_distinct(a, b)
        } else {
            Self::from_distinct(b, a)
        }
    }

    pub fn i(&self) -> i32 {
        self.i
    }

    pub fn j(&self) -> i32 {
        self.j
    }

    pub fn is_sorted(&self) -> bool {
        self.i < self.j
    }

    /// Absolute difference between the two indices
    pub fn span(&self) -> u32 {
        self.i.abs_diff(self.j)
    }

    pub fn to_array(self) -> [i32; 2] {
        [self.i, self.j]
    }
}

impl From<IndexPair> for (i32, i32) {
    fn from(pair: IndexPair) -> Self {
        (pair.i, pair.j)
    }
}

impl fmt::Display for IndexPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.i, self.j)
    }
}

/// Three pairwise distinct indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexTriple {
    i: i32,
    j: i32,
    k: i32,
}

impl IndexTriple {
    /// Triple `(i, j, k)` in the given order
    ///
    /// # Errors
    ///
    /// [`SampleError::InvalidArgument`] if any two indices are equal.
    pub fn new(i: i32, j: i32, k: i32) -> Result<Self> {
        if i == j || i == k || j == k {
            return Err(SampleError::invalid(format!(
                "triple indices must be pairwise distinct, got ({}, {}, {})",
                i, j, k
            )));
        }
        Ok(Self { i, j, k })
    }

    /// Triple of `a`, `b` and `c` in ascending order
    ///
    /// # Errors
    ///
    /// [`SampleError::InvalidArgument`] if any two values are equal.
    pub fn sorted(a: i32, b: i32, c: i32) -> Result<Self> {
        let triple = Self::new(a, b, c)?;
        Ok(Self::sorted_from_distinct(triple.i, triple.j, triple.k))
    }

    #[inline]
    pub(crate) fn from_distinct(i: i32, j: i32, k: i32) -> Self {
        debug_assert!(i != j && i != k && j != k);
        Self { i, j, k }
    }

    /// Three-comparison sorting network
    #[inline]
    pub(crate) fn sorted_from_distinct(a: i32, b: i32, c: i32) -> Self {
        let (a, b) = if a < b { (a, b) } else { (b, a) };
        let (b, c) = if b < c { (b, c) } else { (c, b) };
        let (a, b) = if a < b { (a, b) } else { (b, a) };
        Self::from_distinct(a, b, c)
    }

    pub fn i(&self) -> i32 {
        self.i
    }

    pub fn j(&self) -> i32 {
        self.j
    }

    pub fn k(&self) -> i32 {
        self.k
    }

    pub fn is_sorted(&self) -> bool {
        self.i < self.j && self.j < self.k
    }

    /// Difference between the largest and smallest index
    pub fn span(&self) -> u32 {
        let high = self.i.max(self.j).max(self.k);
        let low = self.i.min(self.j).min(self.k);
        high.abs_diff(low)
    }

    pub fn to_array(self) -> [i32; 3] {
        [self.i, self.j, self.k]
    }
}

impl From<IndexTriple> for (i32, i32, i32) {
    fn from(triple: IndexTriple) -> Self {
        (triple.i, triple.j, triple.k)
    }
}

impl fmt::Display for IndexTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.i, self.j, self.k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_constructors() {
        let pair = IndexPair::new(5, 2).unwrap();
        assert_eq!((pair.i(), pair.j()), (5, 2));
        assert!(!pair.is_sorted());
        assert_eq!(pair.span(), 3);

        let sorted = IndexPair::sorted(5, 2).unwrap();
        assert_eq!(sorted.to_array(), [2, 5]);
        assert!(sorted.is_sorted());

        assert!(IndexPair::new(4, 4).is_err());
        assert!(IndexPair::sorted(4, 4).is_err());
    }

    #[test]
    fn test_triple_constructors() {
        let triple = IndexTriple::new(7, 1, 4).unwrap();
        assert_eq!(<(i32, i32, i32)>::from(triple), (7, 1, 4));
        assert_eq!(triple.span(), 6);

        assert!(IndexTriple::new(1, 2, 1).is_err());
        assert!(IndexTriple::sorted(3, 3, 0).is_err());
    }

    #[test]
    fn test_span_at_extremes() {
        let pair = IndexPair::new(i32::MIN, 1).unwrap();
        assert_eq!(pair.span(), 2_147_483_649);
        let pair = IndexPair::new(i32::MAX, i32::MIN).unwrap();
        assert_eq!(pair.span(), u32::MAX);

        let triple = IndexTriple::new(0, i32::MIN, i32::MAX).unwrap();
        assert_eq!(triple.span(), u32::MAX);
    }

    #[test]
    fn test_sorting_network_all_orders() {
        let orders = [
            (1, 2, 3),
            (1, 3, 2),
            (2, 1, 3),
            (2, 3, 1),
            (3, 1, 2),
            (3, 2, 1),
        ];
        for (a, b, c) in orders {
            let triple = IndexTriple::sorted(a, b, c).unwrap();
            assert_eq!(triple.to_array(), [1, 2, 3], "input ({}, {}, {})", a, b, c);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(IndexPair::new(0, 9).unwrap().to_string(), "(0, 9)");
        assert_eq!(IndexTriple::new(3, 1, 2).unwrap().to_string(), "(3, 1, 2)");
    }
}
