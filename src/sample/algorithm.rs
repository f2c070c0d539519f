//! The three k-subset algorithms and the rule that picks between them
//!
//! | algorithm | time       | draws      | extra space |
//! |-----------|------------|------------|-------------|
//! | reservoir | O(n)       | n - k      | none        |
//! | pool      | O(n)       | k          | O(n)        |
//! | insertion | O(k^2)     | k          | none        |

use super::{check_sizes, output, Sample};
use crate::distribution::bounded::below;
use crate::distribution::UniformSource;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which k-subset algorithm to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleAlgorithm {
    /// Keep the first k, then replace with decreasing probability
    Reservoir,
    /// Swap-remove from an explicit pool of all n values
    Pool,
    /// Keep a sorted sample and shift each new draw past smaller members
    Insertion,
}

impl SampleAlgorithm {
    pub const ALL: [SampleAlgorithm; 3] = [
        SampleAlgorithm::Reservoir,
        SampleAlgorithm::Pool,
        SampleAlgorithm::Insertion,
    ];

    /// Cheapest algorithm for drawing `k` of `n`
    ///
    /// Small samples (`2k < n`) need only k draws: insertion when `k^2 < n`,
    /// otherwise pool. Large samples use the reservoir, which draws `n - k`
    /// times and needs no extra memory.
    pub fn select(n: i32, k: i32) -> Self {
        let (n, k) = (i64::from(n), i64::from(k));
        if k + k < n {
            if k * k < n {
                SampleAlgorithm::Insertion
            } else {
                SampleAlgorithm::Pool
            }
        } else {
            SampleAlgorithm::Reservoir
        }
    }

    /// Run this algorithm, validating `n` and `k` first
    ///
    /// # Errors
    ///
    /// Same as [`super::sample`].
    pub fn run<'a, S: UniformSource + ?Sized>(
        self,
        n: i32,
        k: i32,
        buffer: Option<&'a mut [i32]>,
        source: &mut S,
    ) -> Result<Sample<'a>> {
        check_sizes(n, k)?;
        let mut result = output(k as usize, buffer);
        match self {
            SampleAlgorithm::Reservoir => reservoir(n, &mut result, source),
            SampleAlgorithm::Pool => pool(n, &mut result, source),
            SampleAlgorithm::Insertion => insertion(n, &mut result, source),
        }
        Ok(result)
    }

    pub fn name(&self) -> &'static str {
        match self {
            SampleAlgorithm::Reservoir => "reservoir",
            SampleAlgorithm::Pool => "pool",
            SampleAlgorithm::Insertion => "insertion",
        }
    }
}

impl fmt::Display for SampleAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// k of n by reservoir sampling
///
/// # Errors
///
/// Same as [`super::sample`].
pub fn sample_reservoir<'a, S: UniformSource + ?Sized>(
    n: i32,
    k: i32,
    buffer: Option<&'a mut [i32]>,
    source: &mut S,
) -> Result<Sample<'a>> {
    SampleAlgorithm::Reservoir.run(n, k, buffer, source)
}

/// k of n by pool sampling (Goodman and Hedetniemi's SELECT)
///
/// # Errors
///
/// Same as [`super::sample`].
pub fn sample_pool<'a, S: UniformSource + ?Sized>(
    n: i32,
    k: i32,
    buffer: Option<&'a mut [i32]>,
    source: &mut S,
) -> Result<Sample<'a>> {
    SampleAlgorithm::Pool.run(n, k, buffer, source)
}

/// k of n by insertion sampling; the result comes back in ascending order
///
/// # Errors
///
/// Same as [`super::sample`].
pub fn sample_insertion<'a, S: UniformSource + ?Sized>(
    n: i32,
    k: i32,
    buffer: Option<&'a mut [i32]>,
    source: &mut S,
) -> Result<Sample<'a>> {
    SampleAlgorithm::Insertion.run(n, k, buffer, source)
}

fn reservoir<S: UniformSource + ?Sized>(n: i32, result: &mut [i32], source: &mut S) {
    let k = result.len() as i32;
    for (slot, value) in result.iter_mut().zip(0..) {
        *slot = value;
    }
    for i in k..n {
        let j = below(i + 1, source);
        if j < k {
            result[j as usize] = i;
        }
    }
}

fn pool<S: UniformSource + ?Sized>(n: i32, result: &mut [i32], source: &mut S) {
    let mut pool: Vec<i32> = (0..n).collect();
    let mut remaining = n;
    for slot in result.iter_mut() {
        let pick = below(remaining, source) as usize;
        *slot = pool[pick];
        remaining -= 1;
        pool[pick] = pool[remaining as usize];
    }
}

fn insertion<S: UniformSource + ?Sized>(n: i32, result: &mut [i32], source: &mut S) {
    let k = result.len();
    // result[k - i..] is sorted; each new value is relabelled past the
    // members it meets, then inserted just below the first larger one
    for i in 0..k {
        let mut value = below(n - i as i32, source);
        let mut j = k - i;
        while j < k && value >= result[j] {
            value += 1;
            result[j - 1] = result[j];
            j += 1;
        }
        result[j - 1] = value;
    }
}
