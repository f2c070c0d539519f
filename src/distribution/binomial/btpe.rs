//! BTPE rejection sampling for binomial variates with larger means
//!
//! Kachitvichyanukul & Schmeiser (1988), "Binomial random variate generation",
//! Communications of the ACM 31(2). The majorizing function is split into a
//! central triangle, two parallelograms and two exponential tails:
//!
//! ```text
//! region     |  u range       | acceptance
//! -----------+----------------+-------------------------------------------
//! triangle   |  (0, p1]       | always
//! parallel.  |  (p1, p2]      | test v against f(y)/f(m)
//! left tail  |  (p2, p3]      | test v against f(y)/f(m)
//! right tail |  (p3, p4]      | test v against f(y)/f(m)
//! ```
//!
//! The test against `f(y)/f(m)` is evaluated explicitly when `y` is close to
//! the mode or far in a tail, and otherwise through a squeeze on `ln v` with a
//! Stirling-series fallback. Setup needs a square root and several divisions,
//! which is why callers keep it in a `BinomialCache`.

use crate::distribution::UniformSource;

/// Precomputed constants for one `(n, p)` in the BTPE regime
#[derive(Debug, Clone, PartialEq)]
pub struct Btpe {
    n: i32,
    p: f64,
    r: f64,
    q: f64,
    s: f64,
    m: i32,
    nrq: f64,
    nrq_inv: f64,
    p1: f64,
    x_m: f64,
    x_l: f64,
    x_r: f64,
    c: f64,
    lambda_l: f64,
    lambda_r: f64,
    p2: f64,
    p3: f64,
    p4: f64,
}

impl Btpe {
    /// Build the region constants; requires `n * min(p, 1 - p) >= 10`
    pub(crate) fn new(n: i32, p: f64) -> Self {
        let (r, q) = if p <= 0.5 { (p, 1.0 - p) } else { (1.0 - p, p) };
        let nr = f64::from(n) * r;
        let f_m = nr + r;
        let m = f_m as i32;
        let nrq = nr * q;
        let p1 = (2.195 * nrq.sqrt() - 4.6 * q).floor() + 0.5;
        let x_m = f64::from(m) + 0.5;
        let x_l = x_m - p1;
        let x_r = x_m + p1;
        let c = 0.134 + 20.5 / (15.3 + f64::from(m));

        let a = (f_m - x_l) / (f_m - x_l * r);
        let lambda_l = a * (1.0 + 0.5 * a);
        let a = (x_r - f_m) / (x_r * q);
        let lambda_r = a * (1.0 + 0.5 * a);

        let p2 = p1 * (1.0 + c + c);
        let p3 = p2 + c / lambda_l;
        let p4 = p3 + c / lambda_r;

        Self {
            n,
            p,
            r,
            q,
            s: r / q,
            m,
            nrq,
            nrq_inv: 1.0 / nrq,
            p1,
            x_m,
            x_l,
            x_r,
            c,
            lambda_l,
            lambda_r,
            p2,
            p3,
            p4,
        }
    }

    pub(crate) fn n(&self) -> i32 {
        self.n
    }

    pub(crate) fn p(&self) -> f64 {
        self.p
    }

    /// Mode of the symmetry-reduced distribution
    pub fn mode(&self) -> i32 {
        self.m
    }

    pub(crate) fn sample<S: UniformSource + ?Sized>(&self, source: &mut S) -> i32 {
        let y = loop {
            let u = source.next_f64() * self.p4;
            let mut v = source.next_f64();

            if u <= self.p1 {
                break (self.x_m - self.p1 * v + u) as i32;
            }

            let y = if u <= self.p2 {
                let x = self.x_l + (u - self.p1) / self.c;
                v = v * self.c + 1.0 - (f64::from(self.m) - x + 0.5).abs() / self.p1;
                if v > 1.0 {
                    continue;
                }
                x as i32
            } else if u <= self.p3 {
                // ln(0) saturates to i32::MIN here and is rejected below
                let y = (self.x_l + v.ln() / self.lambda_l).floor() as i32;
                if y < 0 {
                    continue;
                }
                v *= (u - self.p2) * self.lambda_l;
                y
            } else {
                let y = (self.x_r - v.ln() / self.lambda_r).floor() as i32;
                if y > self.n {
                    continue;
                }
                v *= (u - self.p3) * self.lambda_r;
                y
            };

            if self.accepts(y, v) {
                break y;
            }
        };

        if self.p > 0.5 {
            self.n - y
        } else {
            y
        }
    }

    /// Acceptance test of candidate `y` with scaled uniform `v`
    fn accepts(&self, y: i32, v: f64) -> bool {
        let k = f64::from((self.m - y).abs());

        if k <= 20.0 || k >= self.nrq * 0.5 - 1.0 {
            // f(y)/f(m) by the recurrence between y and the mode
            let a = self.s * (f64::from(self.n) + 1.0);
            let mut f = 1.0;
            if self.m < y {
                for i in self.m + 1..=y {
                    f *= a / f64::from(i) - self.s;
                }
            } else if self.m > y {
                for i in y + 1..=self.m {
                    f /= a / f64::from(i) - self.s;
                }
            }
            return v <= f;
        }

        // Squeeze on ln(v) around the normal approximation
        let rho = (k * self.nrq_inv)
            * ((k * (k / 3.0 + 0.625) + 1.0 / 6.0) * self.nrq_inv + 0.5);
        let t = -k * k * (0.5 * self.nrq_inv);
        let a = v.ln();
        if a < t - rho {
            return true;
        }
        if a > t + rho {
            return false;
        }

        let x1 = f64::from(y) + 1.0;
        let f1 = f64::from(self.m) + 1.0;
        let z = f64::from(self.n) + 1.0 - f64::from(self.m);
        let w = f64::from(self.n) - f64::from(y) + 1.0;

        let bound = self.x_m * (f1 / x1).ln()
            + (f64::from(self.n) - f64::from(self.m) + 0.5) * (z / w).ln()
            + (f64::from(y) - f64::from(self.m)) * (w * self.r / (x1 * self.q)).ln()
            + stirling_correction(f1)
            + stirling_correction(z)
            + stirling_correction(x1)
            + stirling_correction(w);
        a <= bound
    }
}

/// Rational approximation of `ln(x!) - [(x + 0.5) ln x - x + ln(2 pi)/2]`
#[inline]
fn stirling_correction(x: f64) -> f64 {
    let x2 = x * x;
    (13860.0 - (462.0 - (132.0 - (99.0 - 140.0 / x2) / x2) / x2) / x2) / x / 166320.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_constants_are_ordered() {
        for (n, p) in [(20, 0.5), (100, 0.1), (1000, 0.3), (1_000_000, 0.01)] {
            let btpe = Btpe::new(n, p);
            assert!(btpe.p1 > 0.0);
            assert!(btpe.p1 < btpe.p2);
            assert!(btpe.p2 < btpe.p3);
            assert!(btpe.p3 < btpe.p4);
            assert!(btpe.x_l > 0.0, "x_l = {} for n={} p={}", btpe.x_l, n, p);
            assert!(btpe.x_r < f64::from(n) + 1.0);
        }
    }

    #[test]
    fn test_mode_of_reduced_distribution() {
        assert_eq!(Btpe::new(100, 0.3).mode(), 30);
        // p > 0.5 is reduced to r = 1 - p before computing the mode
        assert_eq!(Btpe::new(100, 0.7).mode(), 30);
    }

    #[test]
    fn test_stirling_correction_matches_log_factorial() {
        // ln(10!) = 15.104412573075516
        let x: f64 = 10.0;
        let approx = (x + 0.5) * x.ln() - x + 0.5 * (2.0 * std::f64::consts::PI).ln()
            + stirling_correction(x);
        assert!((approx - 15.104_412_573_075_516).abs() < 1e-9);
    }

    #[test]
    fn test_samples_within_support() {
        let mut rng = crate::distribution::seeded(77);
        let btpe = Btpe::new(50, 0.4);
        for _ in 0..10_000 {
            let y = btpe.sample(&mut rng);
            assert!((0..=50).contains(&y));
        }
    }
}
