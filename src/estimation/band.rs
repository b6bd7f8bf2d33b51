//! Asymptotic confidence bands around a running Monte Carlo mean.
//!
//! By the Central Limit Theorem the running mean is approximately
//! `N(μ, σ²/n)`. Replacing the unknown `σ²` by its running estimate gives the
//! band `mean ± z·sqrt(var/n)`; the default `z = 2` is the classic
//! two-standard-deviation band (≈95%).
//!
//! The band is a large-sample approximation. For small `n` the variance
//! estimate is noisy and the band tends to be too narrow, so its coverage
//! falls short of the nominal level. That is expected behaviour of the method.
//!
//! `n = 0` has no defined half-width; by convention it is `+inf` and the
//! interval is the whole real line.

use crate::error::{McError, Result};
use crate::estimation::Estimate;
use crate::utils::normal_quantile;

/// Multiplier of the classic two-standard-deviation band.
pub const TWO_SIGMA: f64 = 2.0;

/// Half-width `2·sqrt(var_n / n)`; `+inf` when `n = 0`.
#[inline]
pub fn bandwidth(variance: f64, n: u64) -> f64 {
    UncertaintyBand::two_sigma().half_width(variance, n)
}

/// `(mean − h, mean + h)` with `h = bandwidth(variance, n)`.
#[inline]
pub fn interval(mean: f64, variance: f64, n: u64) -> ConfidenceBand {
    UncertaintyBand::two_sigma().interval(mean, variance, n)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceBand {
    pub lower: f64,
    pub upper: f64,
}

impl ConfidenceBand {
    pub fn unbounded() -> Self {
        Self {
            lower: f64::NEG_INFINITY,
            upper: f64::INFINITY,
        }
    }

    #[inline]
    pub fn half_width(&self) -> f64 {
        0.5 * (self.upper - self.lower)
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    #[inline]
    pub fn is_bounded(&self) -> bool {
        self.lower.is_finite() && self.upper.is_finite()
    }
}

/// Band shape, parameterized by its normal multiplier `z`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UncertaintyBand {
    multiplier: f64,
}

impl Default for UncertaintyBand {
    fn default() -> Self {
        Self::two_sigma()
    }
}

impl UncertaintyBand {
    pub const fn two_sigma() -> Self {
        Self {
            multiplier: TWO_SIGMA,
        }
    }

    pub fn with_multiplier(multiplier: f64) -> Result<Self> {
        if !(multiplier.is_finite() && multiplier > 0.0) {
            return Err(McError::invalid(format!(
                "band multiplier must be finite and > 0, got {multiplier}"
            )));
        }
        Ok(Self { multiplier })
    }

    /// Two-sided band with nominal coverage `level`, e.g. `0.95` gives `z ≈ 1.96`.
    pub fn with_confidence(level: f64) -> Result<Self> {
        if !(level > 0.0 && level < 1.0) {
            return Err(McError::invalid(format!(
                "confidence level must lie in (0, 1), got {level}"
            )));
        }
        Self::with_multiplier(normal_quantile(0.5 + 0.5 * level))
    }

    #[inline]
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    #[inline]
    pub fn half_width(&self, variance: f64, n: u64) -> f64 {
        if n == 0 {
            return f64::INFINITY;
        }
        self.multiplier * (variance / n as f64).sqrt()
    }

    pub fn interval(&self, mean: f64, variance: f64, n: u64) -> ConfidenceBand {
        if n == 0 {
            return ConfidenceBand::unbounded();
        }
        let h = self.half_width(variance, n);
        ConfidenceBand {
            lower: mean - h,
            upper: mean + h,
        }
    }

    #[inline]
    pub fn around(&self, estimate: &Estimate) -> ConfidenceBand {
        self.interval(estimate.mean, estimate.variance, estimate.n)
    }
}
