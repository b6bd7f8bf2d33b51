//! Pointwise order statistics over a batch of independent realizations.
//!
//! # Percentiles
//! Linear interpolation between order statistics (Hyndman & Fan type 7, the
//! default of R and NumPy). For the ascending column `x[0..k]` and
//! `q ∈ [0, 100]`:
//!
//! ```text
//! h = (k − 1) · q / 100
//! v = x[⌊h⌋] + (h − ⌊h⌋) · (x[⌊h⌋ + 1] − x[⌊h⌋])
//! ```
//!
//! Ties need no special handling: equal order statistics interpolate to the
//! same value. `q = 0` and `q = 100` return the column minimum and maximum.
//!
//! # Exceedance
//! `exceedance_probability` counts realizations *strictly greater* than the
//! threshold. The fraction is itself a Monte Carlo estimate and is reported
//! with its binomial standard error `sqrt(p(1 − p)/k)`.

use crate::error::{McError, Result};

/// Batch of `k` realizations, each with `m` positional values.
///
/// Values are stored per position and sorted once at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct EmpiricalBatch {
    realizations: usize,
    columns: Vec<Vec<f64>>,
}

/// Tail probability estimate at one position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exceedance {
    pub probability: f64,
    pub standard_error: f64,
    pub exceeding: usize,
    pub realizations: usize,
}

/// Pointwise prediction band: lower percentile, median and upper percentile.
#[derive(Debug, Clone, PartialEq)]
pub struct PercentileBand {
    pub lower_q: f64,
    pub upper_q: f64,
    pub lower: Vec<f64>,
    pub median: Vec<f64>,
    pub upper: Vec<f64>,
}

impl PercentileBand {
    /// Whether `profile` lies inside the band at every position.
    pub fn contains(&self, profile: &[f64]) -> bool {
        profile.len() == self.lower.len()
            && profile
                .iter()
                .zip(self.lower.iter().zip(&self.upper))
                .all(|(&v, (&lo, &hi))| lo <= v && v <= hi)
    }
}

impl EmpiricalBatch {
    /// Builds the batch from row-major realizations (one `Vec` per realization).
    ///
    /// # Errors
    /// - `InsufficientData` if there are no realizations or they are empty.
    /// - `DimensionMismatch` if realizations differ in length.
    /// - `InvalidParameter` if any value is NaN or infinite.
    pub fn new(realizations: Vec<Vec<f64>>) -> Result<Self> {
        let Some(first) = realizations.first() else {
            return Err(McError::insufficient(
                "percentiles need at least one realization",
            ));
        };
        let m = first.len();
        if m == 0 {
            return Err(McError::insufficient("realizations have no positions"));
        }
        let k = realizations.len();
        let mut columns = vec![Vec::with_capacity(k); m];
        for r in &realizations {
            if r.len() != m {
                return Err(McError::DimensionMismatch {
                    expected: m,
                    found: r.len(),
                });
            }
            for (col, &v) in columns.iter_mut().zip(r) {
                if !v.is_finite() {
                    return Err(McError::invalid(format!(
                        "realization contains non-finite value {v}"
                    )));
                }
                col.push(v);
            }
        }
        for col in &mut columns {
            col.sort_unstable_by(f64::total_cmp);
        }
        Ok(Self {
            realizations: k,
            columns,
        })
    }

    /// Batch of a scalar objective (`m = 1`).
    pub fn from_scalars(values: Vec<f64>) -> Result<Self> {
        Self::new(values.into_iter().map(|v| vec![v]).collect())
    }

    /// Number of realizations `k`.
    pub fn len(&self) -> usize {
        self.realizations
    }

    pub fn is_empty(&self) -> bool {
        self.realizations == 0
    }

    /// Number of positions `m` per realization.
    pub fn positions(&self) -> usize {
        self.columns.len()
    }

    /// Ascending values at `position`.
    pub fn column(&self, position: usize) -> Result<&[f64]> {
        self.columns
            .get(position)
            .map(Vec::as_slice)
            .ok_or_else(|| {
                McError::invalid(format!(
                    "position {position} outside batch of {} positions",
                    self.columns.len()
                ))
            })
    }

    pub fn percentile(&self, q: f64, position: usize) -> Result<f64> {
        check_percentile(q)?;
        Ok(interpolate(self.column(position)?, q))
    }

    pub fn median(&self, position: usize) -> Result<f64> {
        self.percentile(50.0, position)
    }

    /// `q`-th percentile at every position.
    pub fn percentile_profile(&self, q: f64) -> Result<Vec<f64>> {
        check_percentile(q)?;
        Ok(self.columns.iter().map(|c| interpolate(c, q)).collect())
    }

    pub fn median_profile(&self) -> Vec<f64> {
        self.columns.iter().map(|c| interpolate(c, 50.0)).collect()
    }

    /// Prediction band between the `lower_q` and `upper_q` percentiles.
    pub fn prediction_band(&self, lower_q: f64, upper_q: f64) -> Result<PercentileBand> {
        check_percentile(lower_q)?;
        check_percentile(upper_q)?;
        if lower_q > upper_q {
            return Err(McError::invalid(format!(
                "lower percentile {lower_q} exceeds upper percentile {upper_q}"
            )));
        }
        Ok(PercentileBand {
            lower_q,
            upper_q,
            lower: self.percentile_profile(lower_q)?,
            median: self.median_profile(),
            upper: self.percentile_profile(upper_q)?,
        })
    }

    /// Fraction of realizations at `position` strictly greater than `threshold`.
    pub fn exceedance_probability(&self, threshold: f64, position: usize) -> Result<Exceedance> {
        if threshold.is_nan() {
            return Err(McError::invalid("threshold must not be NaN"));
        }
        Ok(exceedance(self.column(position)?, threshold))
    }

    pub fn exceedance_profile(&self, threshold: f64) -> Result<Vec<Exceedance>> {
        if threshold.is_nan() {
            return Err(McError::invalid("threshold must not be NaN"));
        }
        Ok(self
            .columns
            .iter()
            .map(|c| exceedance(c, threshold))
            .collect())
    }
}

fn check_percentile(q: f64) -> Result<()> {
    if !(0.0..=100.0).contains(&q) {
        return Err(McError::invalid(format!(
            "percentile must lie in [0, 100], got {q}"
        )));
    }
    Ok(())
}

/// Type-7 interpolation on an ascending, non-empty column.
fn interpolate(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let h = (n - 1) as f64 * q / 100.0;
    let j = h.floor() as usize;
    let g = h - h.floor();
    if j + 1 >= n {
        sorted[n - 1]
    } else if g == 0.0 {
        sorted[j]
    } else {
        // Rounding must not push the value past the neighbouring order statistic.
        (sorted[j] + g * (sorted[j + 1] - sorted[j])).clamp(sorted[j], sorted[j + 1])
    }
}

fn exceedance(sorted: &[f64], threshold: f64) -> Exceedance {
    let k = sorted.len();
    let at_or_below = sorted.partition_point(|&v| v <= threshold);
    let exceeding = k - at_or_below;
    let p = exceeding as f64 / k as f64;
    Exceedance {
        probability: p,
        standard_error: (p * (1.0 - p) / k as f64).sqrt(),
        exceeding,
        realizations: k,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profiles() -> EmpiricalBatch {
        EmpiricalBatch::new(vec![
            vec![1.0, 10.0, 7.0],
            vec![2.0, 20.0, 7.0],
            vec![3.0, 30.0, 7.0],
            vec![4.0, 40.0, 7.0],
            vec![5.0, 50.0, 7.0],
        ])
        .unwrap()
    }

    #[test]
    fn median_of_one_to_five_is_three() {
        let b = EmpiricalBatch::from_scalars(vec![5.0, 3.0, 1.0, 4.0, 2.0]).unwrap();
        assert_eq!(b.median(0).unwrap(), 3.0);
        assert_eq!(b.percentile(50.0, 0).unwrap(), 3.0);
    }

    #[test]
    fn percentile_interpolates_linearly() {
        let b = EmpiricalBatch::from_scalars(vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(b.percentile(0.0, 0).unwrap(), 1.0);
        assert_eq!(b.percentile(100.0, 0).unwrap(), 5.0);
        assert_eq!(b.percentile(25.0, 0).unwrap(), 2.0);
        assert!((b.percentile(10.0, 0).unwrap() - 1.4).abs() < 1e-12);
        assert!((b.percentile(95.0, 0).unwrap() - 4.8).abs() < 1e-12);

        let even = EmpiricalBatch::from_scalars(vec![4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(even.median(0).unwrap(), 2.5);
    }

    #[test]
    fn identical_values_give_that_value_for_every_percentile() {
        let b = profiles();
        for q in [0.0, 2.5, 17.0, 50.0, 83.3, 97.5, 100.0] {
            assert_eq!(b.percentile(q, 2).unwrap(), 7.0, "q={q}");
        }
    }

    #[test]
    fn positions_are_independent() {
        let b = profiles();
        assert_eq!(b.len(), 5);
        assert_eq!(b.positions(), 3);
        assert_eq!(b.median_profile(), vec![3.0, 30.0, 7.0]);
        assert_eq!(b.percentile_profile(25.0).unwrap(), vec![2.0, 20.0, 7.0]);
    }

    #[test]
    fn prediction_band_brackets_median() {
        let b = profiles();
        let band = b.prediction_band(2.5, 97.5).unwrap();
        assert_eq!(band.median, vec![3.0, 30.0, 7.0]);
        for j in 0..3 {
            assert!(band.lower[j] <= band.median[j] && band.median[j] <= band.upper[j]);
        }
        assert!(band.contains(&[3.0, 30.0, 7.0]));
        assert!(!band.contains(&[3.0, 60.0, 7.0]));
        assert!(!band.contains(&[3.0, 30.0]));
        assert!(b.prediction_band(90.0, 10.0).is_err());
    }

    #[test]
    fn exceedance_extremes() {
        let b = EmpiricalBatch::from_scalars(vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let below = b.exceedance_probability(0.0, 0).unwrap();
        assert_eq!(below.probability, 1.0);
        assert_eq!(below.standard_error, 0.0);
        let above = b.exceedance_probability(10.0, 0).unwrap();
        assert_eq!(above.probability, 0.0);
        assert_eq!(above.standard_error, 0.0);
    }

    #[test]
    fn exceedance_is_strict() {
        let b = EmpiricalBatch::from_scalars(vec![1.0, 2.0, 2.0, 3.0]).unwrap();
        let e = b.exceedance_probability(2.0, 0).unwrap();
        assert_eq!(e.exceeding, 1);
        assert_eq!(e.realizations, 4);
        assert_eq!(e.probability, 0.25);
    }

    #[test]
    fn exceedance_standard_error() {
        // Reported next to the point estimate; there is no reference value to reproduce.
        let b = EmpiricalBatch::from_scalars((1..=100).map(f64::from).collect()).unwrap();
        let e = b.exceedance_probability(80.0, 0).unwrap();
        assert_eq!(e.probability, 0.2);
        assert!((e.standard_error - (0.2 * 0.8 / 100.0_f64).sqrt()).abs() < 1e-15);
    }

    #[test]
    fn exceedance_profile_per_position() {
        let b = profiles();
        let p = b.exceedance_profile(6.0).unwrap();
        let probs: Vec<f64> = p.iter().map(|e| e.probability).collect();
        assert_eq!(probs, vec![0.0, 1.0, 1.0]);
    }

    #[test]
    fn empty_batch_is_insufficient_data() {
        assert!(matches!(
            EmpiricalBatch::new(vec![]),
            Err(McError::InsufficientData(_))
        ));
        assert!(matches!(
            EmpiricalBatch::from_scalars(vec![]),
            Err(McError::InsufficientData(_))
        ));
        assert!(matches!(
            EmpiricalBatch::new(vec![vec![], vec![]]),
            Err(McError::InsufficientData(_))
        ));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        // Interpolating next to an infinite order statistic is undefined.
        assert!(matches!(
            EmpiricalBatch::from_scalars(vec![f64::INFINITY; 4]),
            Err(McError::InvalidParameter(_))
        ));
        assert!(matches!(
            EmpiricalBatch::from_scalars(vec![f64::NEG_INFINITY, 5.0]),
            Err(McError::InvalidParameter(_))
        ));
        assert!(matches!(
            EmpiricalBatch::new(vec![vec![1.0, 2.0], vec![3.0, f64::INFINITY]]),
            Err(McError::InvalidParameter(_))
        ));
    }

    #[test]
    fn large_identical_values_keep_every_percentile() {
        let b = EmpiricalBatch::from_scalars(vec![f64::MAX; 4]).unwrap();
        for q in [0.0, 12.5, 50.0, 99.0, 100.0] {
            assert_eq!(b.percentile(q, 0).unwrap(), f64::MAX, "q={q}");
        }
    }

    #[test]
    fn ragged_batch_is_dimension_mismatch() {
        let err = EmpiricalBatch::new(vec![vec![1.0, 2.0], vec![1.0]]).unwrap_err();
        assert!(matches!(
            err,
            McError::DimensionMismatch {
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn invalid_requests_are_rejected() {
        let b = profiles();
        assert!(matches!(
            b.percentile(-0.1, 0),
            Err(McError::InvalidParameter(_))
        ));
        assert!(matches!(
            b.percentile(100.1, 0),
            Err(McError::InvalidParameter(_))
        ));
        assert!(b.percentile(f64::NAN, 0).is_err());
        assert!(b.percentile(50.0, 3).is_err());
        assert!(b.exceedance_probability(f64::NAN, 0).is_err());
        assert!(EmpiricalBatch::from_scalars(vec![1.0, f64::NAN]).is_err());
    }
}
