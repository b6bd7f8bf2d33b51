use tracing::{debug, info};

use crate::error::{McError, Result};
use crate::estimation::{Estimate, Trajectory, UncertaintyBand};
use crate::objective::Objective;
use crate::sampling::Sampler;
use crate::summary::EmpiricalBatch;
use crate::tasks::SequentialEstimator;

/// Outer loop re-running the whole estimator to expose its spread.
///
/// Repetition `r` gets a fresh sampler built from seed `base_seed + r` and a
/// fresh [`SequentialEstimator`]; nothing is shared between repetitions.
#[derive(Debug, Clone)]
pub struct Repetitions {
    repetitions: usize,
    max_samples: u64,
    base_seed: u64,
    band: UncertaintyBand,
}

impl Repetitions {
    pub fn new(repetitions: usize, max_samples: u64, base_seed: u64) -> Result<Self> {
        if repetitions == 0 {
            return Err(McError::invalid("repetitions must be > 0"));
        }
        Ok(Self {
            repetitions,
            max_samples,
            base_seed,
            band: UncertaintyBand::two_sigma(),
        })
    }

    pub fn with_band(mut self, band: UncertaintyBand) -> Self {
        self.band = band;
        self
    }

    pub fn run<S, F, O>(&self, mut make_sampler: F, objective: &O) -> Result<RepetitionReport>
    where
        S: Sampler,
        F: FnMut(u64) -> Result<S>,
        O: Objective<S::Sample, Output = f64> + ?Sized,
    {
        let mut trajectories = Vec::with_capacity(self.repetitions);
        for r in 0..self.repetitions {
            let seed = self.base_seed.wrapping_add(r as u64);
            let mut sampler = make_sampler(seed)?;
            let mut estimator = SequentialEstimator::new().with_band(self.band);
            estimator.run(&mut sampler, objective, self.max_samples)?;
            debug!(repetition = r, seed, "repetition finished");
            trajectories.push(estimator.into_trajectory());
        }
        info!(
            repetitions = self.repetitions,
            max_samples = self.max_samples,
            "repetitions finished"
        );
        Ok(RepetitionReport {
            trajectories,
            band: self.band,
        })
    }
}

#[derive(Debug, Clone)]
pub struct RepetitionReport {
    trajectories: Vec<Trajectory>,
    band: UncertaintyBand,
}

impl RepetitionReport {
    pub fn trajectories(&self) -> &[Trajectory] {
        &self.trajectories
    }

    pub fn final_estimates(&self) -> Vec<Estimate> {
        self.trajectories
            .iter()
            .filter_map(Trajectory::latest)
            .collect()
    }

    /// Fraction of repetitions whose final band contains `truth`.
    pub fn coverage(&self, truth: f64) -> Result<f64> {
        let finals = self.final_estimates();
        if finals.is_empty() {
            return Err(McError::insufficient("no repetition produced an estimate"));
        }
        let hits = finals
            .iter()
            .filter(|e| self.band.around(e).contains(truth))
            .count();
        Ok(hits as f64 / finals.len() as f64)
    }

    /// Running means of all repetitions as a batch, one position per sample count.
    ///
    /// Percentiles of this batch show how the spread of the estimator
    /// narrows as `n` grows.
    pub fn mean_spread(&self) -> Result<EmpiricalBatch> {
        EmpiricalBatch::new(self.trajectories.iter().map(Trajectory::means).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::UniformSampler;

    fn oscillating(x: &f64) -> f64 {
        let v = (50.0 * x).cos() + (20.0 * x).sin();
        v * v
    }

    /// ∫_0^1 (cos 50x + sin 20x)² dx in closed form.
    fn oscillating_truth() -> f64 {
        1.0 + (100.0_f64).sin() / 200.0 - (40.0_f64).sin() / 80.0
            + ((30.0_f64).cos() - 1.0) / 30.0
            - ((70.0_f64).cos() - 1.0) / 70.0
    }

    #[test]
    fn closed_form_truth() {
        assert!((oscillating_truth() - 0.9652).abs() < 1e-3);
    }

    #[test]
    fn zero_repetitions_rejected() {
        assert!(matches!(
            Repetitions::new(0, 10, 1),
            Err(McError::InvalidParameter(_))
        ));
    }

    #[test]
    fn repetitions_are_independent_and_reproducible() {
        let reps = Repetitions::new(4, 200, 10).unwrap();
        let a = reps
            .run(|seed| Ok(UniformSampler::unit(seed)), &oscillating)
            .unwrap();
        let b = reps
            .run(|seed| Ok(UniformSampler::unit(seed)), &oscillating)
            .unwrap();
        assert_eq!(a.trajectories(), b.trajectories());
        assert_eq!(a.trajectories().len(), 4);
        let finals = a.final_estimates();
        assert!(finals.windows(2).all(|w| w[0].mean != w[1].mean));

        let single = crate::tasks::estimate(&mut UniformSampler::unit(12), &oscillating, 200)
            .unwrap();
        assert_eq!(&a.trajectories()[2], &single);
    }

    #[test]
    fn sampler_errors_abort() {
        let reps = Repetitions::new(3, 10, 0).unwrap();
        let err = reps
            .run(
                |seed| UniformSampler::new(1.0, 0.0, None, seed),
                &oscillating,
            )
            .unwrap_err();
        assert!(matches!(err, McError::InvalidParameter(_)));
    }

    #[test]
    fn mean_spread_narrows_with_n() {
        let reps = Repetitions::new(50, 2_000, 1).unwrap();
        let report = reps
            .run(|seed| Ok(UniformSampler::unit(seed)), &oscillating)
            .unwrap();
        let spread = report.mean_spread().unwrap();
        assert_eq!(spread.len(), 50);
        assert_eq!(spread.positions(), 2_000);
        let width = |j: usize| {
            spread.percentile(90.0, j).unwrap() - spread.percentile(10.0, j).unwrap()
        };
        assert!(width(1_999) < width(19));
    }

    #[test]
    fn fixed_seed_band_contains_mean_and_truth() {
        let t = crate::tasks::estimate(&mut UniformSampler::unit(42), &oscillating, 100_000)
            .unwrap();
        let last = t.latest().unwrap();
        let band = UncertaintyBand::two_sigma().around(&last);
        assert!(band.contains(last.mean));
        assert!(
            band.contains(oscillating_truth()),
            "band=[{}, {}], truth={}",
            band.lower,
            band.upper,
            oscillating_truth()
        );
    }

    #[test]
    fn coverage_is_close_to_nominal() {
        // Two-sigma band: nominal ≈ 95.4%. 200 repetitions give a binomial
        // standard error of about 1.5 points.
        let reps = Repetitions::new(200, 5_000, 1_000).unwrap();
        let report = reps
            .run(|seed| Ok(UniformSampler::unit(seed)), &oscillating)
            .unwrap();
        let coverage = report.coverage(oscillating_truth()).unwrap();
        assert!(
            (0.89..=0.995).contains(&coverage),
            "coverage={coverage}"
        );
    }

    #[test]
    fn coverage_needs_estimates() {
        let reps = Repetitions::new(2, 0, 0).unwrap();
        let report = reps
            .run(|seed| Ok(UniformSampler::unit(seed)), &oscillating)
            .unwrap();
        assert!(matches!(
            report.coverage(1.0),
            Err(McError::InsufficientData(_))
        ));
    }
}
