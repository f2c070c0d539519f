//! Binomial variates
//!
//! A binomial(n, p) count is produced by one of two algorithms, chosen once per
//! `(n, p)` from the reduced mean `n * min(p, 1 - p)`:
//!
//! - below [`BTPE_CUTOFF`]: inverse transform ([`InverseTransform`]), a short
//!   walk along the CDF
//! - at or above it: BTPE rejection ([`Btpe`]), constant expected cost
//!
//! Both reduce `p` to `min(p, 1 - p)` and mirror the result through `n - y`
//! when `p > 0.5`.
//!
//! # Setup cache
//!
//! Building either setup costs a power, a square root or several divisions,
//! and callers tend to draw many variates for the same `(n, p)`. A
//! [`BinomialCache`] holds the setup of the last parameters seen and rebuilds
//! it only when they change. The cache is an ordinary owned value: every
//! thread or task keeps its own, so there is nothing to lock.
//!
//! # Example
//!
//! ```
//! use exactsample::distribution::binomial::{next_binomial, BinomialCache};
//! use exactsample::distribution::seeded;
//!
//! let mut rng = seeded(42);
//! let mut cache = BinomialCache::new();
//! for _ in 0..100 {
//!     let successes = next_binomial(50, 0.3, &mut rng, &mut cache).unwrap();
//!     assert!((0..=50).contains(&successes));
//! }
//! assert_eq!(cache.rebuilds(), 1);
//! ```

mod btpe;
mod inverse;

pub use btpe::Btpe;
pub use inverse::InverseTransform;

use super::UniformSource;
use crate::error::{Result, SampleError};
use tracing::trace;

/// Reduced mean at which BTPE takes over from inverse transform
pub const BTPE_CUTOFF: f64 = 10.0;

/// Precomputed constants for one `(n, p)`, tagged by algorithm
#[derive(Debug, Clone, PartialEq)]
pub enum BinomialSetup {
    /// CDF walk, used when `n * min(p, 1 - p) < 10`
    InverseTransform(InverseTransform),
    /// Triangle/parallelogram/exponential rejection, used otherwise
    Btpe(Btpe),
}

impl BinomialSetup {
    /// Validate the parameters and build the matching setup
    ///
    /// # Errors
    ///
    /// - [`SampleError::NegativeSize`] if `n < 0`
    /// - [`SampleError::InvalidArgument`] if `p` is NaN or outside `[0, 1]`
    pub fn new(n: i32, p: f64) -> Result<Self> {
        validate(n, p)?;
        Ok(Self::build(n, p))
    }

    fn build(n: i32, p: f64) -> Self {
        if f64::from(n) * p.min(1.0 - p) < BTPE_CUTOFF {
            BinomialSetup::InverseTransform(InverseTransform::new(n, p))
        } else {
            BinomialSetup::Btpe(Btpe::new(n, p))
        }
    }

    /// Number of trials this setup was built for
    pub fn n(&self) -> i32 {
        match self {
            BinomialSetup::InverseTransform(setup) => setup.n(),
            BinomialSetup::Btpe(setup) => setup.n(),
        }
    }

    /// Success probability this setup was built for
    pub fn p(&self) -> f64 {
        match self {
            BinomialSetup::InverseTransform(setup) => setup.p(),
            BinomialSetup::Btpe(setup) => setup.p(),
        }
    }

    /// True if this setup was built for exactly these parameters
    ///
    /// `p` is compared bit for bit.
    pub fn matches(&self, n: i32, p: f64) -> bool {
        self.n() == n && self.p().to_bits() == p.to_bits()
    }

    /// Short algorithm name, for logs and reports
    pub fn algorithm(&self) -> &'static str {
        match self {
            BinomialSetup::InverseTransform(_) => "inverse-transform",
            BinomialSetup::Btpe(_) => "btpe",
        }
    }

    /// Draw one binomial variate
    #[inline]
    pub fn sample<S: UniformSource + ?Sized>(&self, source: &mut S) -> i32 {
        match self {
            BinomialSetup::InverseTransform(setup) => setup.sample(source),
            BinomialSetup::Btpe(setup) => setup.sample(source),
        }
    }
}

fn validate(n: i32, p: f64) -> Result<()> {
    if n < 0 {
        return Err(SampleError::NegativeSize(n));
    }
    if !(0.0..=1.0).contains(&p) {
        return Err(SampleError::invalid(format!(
            "p must be in [0, 1], got {}",
            p
        )));
    }
    Ok(())
}

/// Caller-owned cache of the most recent [`BinomialSetup`]
///
/// Holds at most one setup. It is replaced whole when `(n, p)` changes, and
/// kept as is when validation of new parameters fails.
#[derive(Debug, Clone, Default)]
pub struct BinomialCache {
    setup: Option<BinomialSetup>,
    rebuilds: u64,
}

impl BinomialCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Setup for `(n, p)`, rebuilt only if the cached one differs
    ///
    /// # Errors
    ///
    /// Same as [`BinomialSetup::new`].
    pub fn setup(&mut self, n: i32, p: f64) -> Result<&BinomialSetup> {
        let fresh = self.setup.as_ref().is_some_and(|setup| setup.matches(n, p));
        if !fresh {
            validate(n, p)?;
        }

        let setup = match self.setup.take() {
            Some(setup) if setup.matches(n, p) => setup,
            _ => {
                let setup = BinomialSetup::build(n, p);
                self.rebuilds += 1;
                trace!(n, p, algorithm = setup.algorithm(), "rebuilt binomial setup");
                setup
            }
        };
        let setup: &BinomialSetup = self.setup.insert(setup);
        Ok(setup)
    }

    /// Draw one binomial(n, p) variate through the cache
    ///
    /// # Errors
    ///
    /// Same as [`BinomialSetup::new`]; no random draw is consumed on error.
    pub fn next<S: UniformSource + ?Sized>(
        &mut self,
        n: i32,
        p: f64,
        source: &mut S,
    ) -> Result<i32> {
        let setup = self.setup(n, p)?;
        Ok(setup.sample(source))
    }

    /// The cached setup, if any
    pub fn current(&self) -> Option<&BinomialSetup> {
        self.setup.as_ref()
    }

    /// How many times a setup has been built by this cache
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }
}

/// Draw one binomial(n, p) variate, reusing the caller's cached setup
///
/// # Errors
///
/// - [`SampleError::NegativeSize`] if `n < 0`
/// - [`SampleError::InvalidArgument`] if `p` is NaN or outside `[0, 1]`
pub fn next_binomial<S: UniformSource + ?Sized>(
    n: i32,
    p: f64,
    source: &mut S,
    cache: &mut BinomialCache,
) -> Result<i32> {
    cache.next(n, p, source)
}

/// Endless stream of binomial(n, p) variates sharing one setup
pub struct Binomials<'a, S: ?Sized> {
    setup: BinomialSetup,
    source: &'a mut S,
}

impl<S: UniformSource + ?Sized> Iterator for Binomials<'_, S> {
    type Item = i32;

    #[inline]
    fn next(&mut self) -> Option<i32> {
        Some(self.setup.sample(self.source))
    }
}

/// Stream binomial(n, p) variates from `source`
///
/// The setup is built once, up front. Use `.take(count)` to bound the stream.
///
/// # Errors
///
/// Same as [`BinomialSetup::new`].
pub fn binomials<S: UniformSource + ?Sized>(
    n: i32,
    p: f64,
    source: &mut S,
) -> Result<Binomials<'_, S>> {
    Ok(Binomials {
        setup: BinomialSetup::new(n, p)?,
        source,
    })
}
