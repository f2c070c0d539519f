//! Inverse-transform binomial sampling for small means
//!
//! Walks the CDF from `y = 0` using the recurrence
//! `P(y) = P(y - 1) * ((n + 1) s / y - s)` with `s = r / q`, where `r` is the
//! smaller of `p` and `1 - p`. The expected number of steps is about `n * r`,
//! which is why this regime is only used below the BTPE cutoff.

use crate::distribution::UniformSource;

/// Precomputed constants for one `(n, p)` in the inverse-transform regime
#[derive(Debug, Clone, PartialEq)]
pub struct InverseTransform {
    n: i32,
    p: f64,
    s: f64,
    a: f64,
    pow0: f64,
}

impl InverseTransform {
    /// Build the constants; `n >= 0` and `p` in `[0, 1]` are checked by the caller
    pub(crate) fn new(n: i32, p: f64) -> Self {
        let (r, q) = if p <= 0.5 { (p, 1.0 - p) } else { (1.0 - p, p) };
        let s = r / q;
        Self {
            n,
            p,
            s,
            a: (f64::from(n) + 1.0) * s,
            pow0: q.powi(n),
        }
    }

    pub(crate) fn n(&self) -> i32 {
        self.n
    }

    pub(crate) fn p(&self) -> f64 {
        self.p
    }

    pub(crate) fn sample<S: UniformSource + ?Sized>(&self, source: &mut S) -> i32 {
        let mut u = source.next_f64();
        let mut y = 0;
        let mut pow = self.pow0;
        // Capped at n: rounding residue in u must not walk past the support
        while u > pow && y < self.n {
            u -= pow;
            y += 1;
            pow *= self.a / f64::from(y) - self.s;
        }
        if self.p > 0.5 {
            self.n - y
        } else {
            y
        }
    }
}
