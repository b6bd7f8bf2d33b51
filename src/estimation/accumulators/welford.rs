use crate::estimation::Estimate;
use crate::estimation::accumulators::Accumulator;

/// Welford's online algorithm with Bessel's correction.
///
/// Reports the unbiased sample variance `M2 / (n − 1)`. With a single
/// observation there is no spread information and the variance is `+inf`,
/// which makes any band derived from it unbounded.
///
/// Reference: Welford (1962), *Technometrics* 4(3), pp. 419–420.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct WelfordAccumulator {
    n: u64,
    mean: f64,
    m2: f64,
}

impl WelfordAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn variance(&self) -> f64 {
        if self.n < 2 {
            f64::INFINITY
        } else {
            self.m2 / (self.n - 1) as f64
        }
    }
}

impl Accumulator for WelfordAccumulator {
    #[inline]
    fn observe(&mut self, y: f64) -> Estimate {
        self.n += 1;
        let delta = y - self.mean;
        self.mean += delta / self.n as f64;
        self.m2 += delta * (y - self.mean);
        Estimate {
            n: self.n,
            mean: self.mean,
            variance: self.variance(),
        }
    }

    #[inline]
    fn count(&self) -> u64 {
        self.n
    }

    fn estimate(&self) -> Option<Estimate> {
        (self.n > 0).then(|| Estimate {
            n: self.n,
            mean: self.mean,
            variance: self.variance(),
        })
    }

    fn merge(&mut self, other: &Self) {
        if other.n == 0 {
            return;
        }
        if self.n == 0 {
            *self = *other;
            return;
        }
        let na = self.n as f64;
        let nb = other.n as f64;
        let n = na + nb;
        let delta = other.mean - self.mean;
        self.mean += delta * nb / n;
        self.m2 += other.m2 + delta * delta * na * nb / n;
        self.n += other.n;
    }
}
