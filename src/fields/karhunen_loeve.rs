use std::f64::consts::{PI, SQRT_2};

use crate::error::{McError, Result};

/// Truncated Karhunen-Loeve expansion of a self-similar random process on `[0, 1]`.
///
/// A sample of the field is
///
/// ```text
/// g(x; ξ) = Σ_{i=1}^{d} ξ_i · φ_i(x),   φ_i(x) = √2·σ / ((i − ½)·π) · sin((i − ½)·π·x)
/// ```
///
/// with `ξ_i` independent standard normals. The untruncated series describes a
/// non-differentiable process; keeping `d` terms is a modelling approximation
/// whose fidelity grows with `d`, at a cost linear in `d` and in the number of
/// evaluation points.
///
/// The basis is fixed configuration: nothing here depends on a particular draw.
#[derive(Debug, Clone, PartialEq)]
pub struct KarhunenLoeveField {
    dimension: usize,
    sigma: f64,
}

impl KarhunenLoeveField {
    pub fn new(dimension: usize, sigma: f64) -> Result<Self> {
        if dimension == 0 {
            return Err(McError::invalid("truncation dimension must be > 0"));
        }
        if !(sigma.is_finite() && sigma > 0.0) {
            return Err(McError::invalid(format!(
                "sigma must be finite and > 0, got {sigma}"
            )));
        }
        Ok(Self { dimension, sigma })
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    #[inline]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// `φ_i(x)` for the 1-based mode index `i`.
    #[inline]
    pub fn basis(&self, i: usize, x: f64) -> f64 {
        let w = (i as f64 - 0.5) * PI;
        SQRT_2 * self.sigma / w * (w * x).sin()
    }

    /// Field value at a single point.
    pub fn value_at(&self, x: f64, xi: &[f64]) -> Result<f64> {
        self.check_coefficients(xi)?;
        check_point(x)?;
        Ok(self.sum_modes(x, xi))
    }

    /// Field values at every point of `points`, in order.
    pub fn evaluate(&self, points: &[f64], xi: &[f64]) -> Result<Vec<f64>> {
        self.check_coefficients(xi)?;
        for &x in points {
            check_point(x)?;
        }
        Ok(points.iter().map(|&x| self.sum_modes(x, xi)).collect())
    }

    /// Left-to-right over modes. Terms are damped by `1/i` and modulated by a
    /// sine, so no pathological cancellation occurs even for thousands of modes.
    fn sum_modes(&self, x: f64, xi: &[f64]) -> f64 {
        xi.iter()
            .enumerate()
            .map(|(k, &c)| c * self.basis(k + 1, x))
            .fold(0.0, |acc, t| acc + t)
    }

    fn check_coefficients(&self, xi: &[f64]) -> Result<()> {
        if xi.len() != self.dimension {
            return Err(McError::DimensionMismatch {
                expected: self.dimension,
                found: xi.len(),
            });
        }
        Ok(())
    }
}

#[inline]
fn check_point(x: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&x) {
        return Err(McError::invalid(format!(
            "evaluation point must lie in [0, 1], got {x}"
        )));
    }
    Ok(())
}

/// `m` equally spaced points from 0 to 1 inclusive.
pub fn uniform_grid(m: usize) -> Result<Vec<f64>> {
    match m {
        0 => Err(McError::invalid("grid needs at least one point")),
        1 => Ok(vec![0.0]),
        _ => {
            let h = 1.0 / (m - 1) as f64;
            Ok((0..m)
                .map(|j| if j + 1 == m { 1.0 } else { j as f64 * h })
                .collect())
        }
    }
}
