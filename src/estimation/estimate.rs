use std::fmt::{Display, Formatter, Result};

/// Running estimate after `n` observations.
///
/// `variance` estimates the variance of the objective itself; the epistemic
/// variance of the mean is `variance / n`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub n: u64,
    pub mean: f64,
    pub variance: f64,
}

impl Estimate {
    /// Standard error of the mean, `sqrt(variance / n)`.
    #[inline]
    pub fn standard_error(&self) -> f64 {
        if self.n == 0 {
            f64::INFINITY
        } else {
            (self.variance / self.n as f64).sqrt()
        }
    }
}

impl Display for Estimate {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "n={}, mean={:.6}, var={:.6}",
            self.n, self.mean, self.variance
        )
    }
}
