use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::time::Instant;

use tracing::{debug, warn};

use crate::error::{McError, ObjectiveError, Result};
use crate::estimation::{
    Accumulator, ConfidenceBand, Estimate, RecursiveAccumulator, Snapshot, Trajectory,
    UncertaintyBand,
};
use crate::objective::Objective;
use crate::sampling::Sampler;

/// Sequential Monte Carlo estimator of `E[f(X)]`.
///
/// Draws one sample at a time, evaluates the objective to completion, and
/// updates the running accumulator before drawing again. Every observation
/// appends one [`Estimate`] to the trajectory, so the entry for `n` samples
/// never depends on later draws.
///
/// The trajectory lives inside the estimator: if a run aborts (objective
/// failure, cancellation, exhausted sampler) the entries already produced
/// remain available through [`trajectory`](Self::trajectory).
///
/// One instance is one independent run. Concurrent or repeated runs must
/// use separate instances.
pub struct SequentialEstimator<A: Accumulator = RecursiveAccumulator> {
    accumulator: A,
    trajectory: Trajectory,
    band: UncertaintyBand,

    sample_frequency: u64,
    start_time: Instant,

    progress_tx: Option<Sender<Snapshot>>,
    cancel: Option<Arc<AtomicBool>>,
}

impl SequentialEstimator<RecursiveAccumulator> {
    pub fn new() -> Self {
        Self::with_accumulator(RecursiveAccumulator::new())
    }
}

impl Default for SequentialEstimator<RecursiveAccumulator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Accumulator> SequentialEstimator<A> {
    pub fn with_accumulator(accumulator: A) -> Self {
        Self {
            accumulator,
            trajectory: Trajectory::default(),
            band: UncertaintyBand::two_sigma(),
            sample_frequency: 1000,
            start_time: Instant::now(),
            progress_tx: None,
            cancel: None,
        }
    }

    pub fn with_band(mut self, band: UncertaintyBand) -> Self {
        self.band = band;
        self
    }

    /// Emit a progress [`Snapshot`] every `sample_frequency` samples.
    pub fn with_sample_frequency(mut self, sample_frequency: u64) -> Result<Self> {
        if sample_frequency == 0 {
            return Err(McError::invalid("sample_frequency must be > 0"));
        }
        self.sample_frequency = sample_frequency;
        Ok(self)
    }

    pub fn with_progress(mut self, tx: Sender<Snapshot>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    /// Flag checked between samples; raising it stops the run.
    pub fn with_cancellation(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Feeds one realization of the objective.
    pub fn observe(&mut self, y: f64) -> Estimate {
        let estimate = self.accumulator.observe(y);
        self.trajectory.push(estimate);
        estimate
    }

    /// Draws `max_n` samples, evaluating `objective` once per draw.
    ///
    /// `max_n = 0` draws nothing and is not an error.
    ///
    /// # Returns
    /// The estimator's whole trajectory, one entry per sample observed so far.
    /// On a fresh estimator that is exactly the entries for `n = 1..=max_n`.
    /// Calling `run` again continues the same estimate, so the result is
    /// cumulative; use [`estimate`] for an independent run.
    ///
    /// # Errors
    /// - The objective's own failure, unchanged (see [`McError::objective_source`]).
    /// - `Cancelled` if the cancellation flag was raised between samples.
    /// - `InsufficientData` if a finite sampler runs out before `max_n` draws.
    pub fn run<S, O>(&mut self, sampler: &mut S, objective: &O, max_n: u64) -> Result<&Trajectory>
    where
        S: Sampler,
        O: Objective<S::Sample, Output = f64> + ?Sized,
    {
        self.start_time = Instant::now();
        let first = self.accumulator.count();
        debug!(max_n, already_seen = first, "sequential run started");

        for drawn in 0..max_n {
            if self.is_cancelled() {
                let completed = self.accumulator.count();
                warn!(completed, "sequential run cancelled");
                self.push_snapshot();
                return Err(McError::Cancelled { completed });
            }
            let Some(sample) = sampler.next_sample() else {
                self.push_snapshot();
                return Err(McError::insufficient(format!(
                    "sampler exhausted after {drawn} of {max_n} draws"
                )));
            };
            let y = objective.evaluate(&sample).map_err(|e| {
                warn!(completed = self.accumulator.count(), error = %e, "objective failed");
                unwrap_objective_error(e)
            })?;
            self.observe(y);

            if self.accumulator.count() % self.sample_frequency == 0 {
                self.push_snapshot();
            }
        }

        if self.accumulator.count() % self.sample_frequency != 0 {
            self.push_snapshot();
        }
        debug!(
            samples = self.accumulator.count() - first,
            seconds = self.start_time.elapsed().as_secs_f64(),
            "sequential run finished"
        );
        Ok(&self.trajectory)
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn into_trajectory(self) -> Trajectory {
        self.trajectory
    }

    pub fn accumulator(&self) -> &A {
        &self.accumulator
    }

    pub fn band(&self) -> &UncertaintyBand {
        &self.band
    }

    pub fn latest(&self) -> Option<Estimate> {
        self.trajectory.latest()
    }

    /// Band around the latest estimate; unbounded before the first sample.
    pub fn latest_band(&self) -> ConfidenceBand {
        match self.trajectory.latest() {
            Some(e) => self.band.around(&e),
            None => ConfidenceBand::unbounded(),
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    fn push_snapshot(&mut self) {
        let Some(tx) = &self.progress_tx else {
            return;
        };
        let seconds = self.start_time.elapsed().as_secs_f64();
        let snapshot = match self.trajectory.latest() {
            Some(e) => Snapshot {
                samples_seen: e.n,
                mean: e.mean,
                variance: e.variance,
                half_width: self.band.half_width(e.variance, e.n),
                seconds,
            },
            None => Snapshot {
                samples_seen: 0,
                mean: f64::NAN,
                variance: f64::NAN,
                half_width: f64::INFINITY,
                seconds,
            },
        };
        debug!(%snapshot, "progress");
        let _ = tx.send(snapshot);
    }
}

/// Runs a fresh estimator over `max_n` samples and returns its trajectory.
pub fn estimate<S, O>(sampler: &mut S, objective: &O, max_n: u64) -> Result<Trajectory>
where
    S: Sampler,
    O: Objective<S::Sample, Output = f64> + ?Sized,
{
    let mut estimator = SequentialEstimator::new();
    estimator.run(sampler, objective, max_n)?;
    Ok(estimator.into_trajectory())
}

/// Crate errors raised inside an objective keep their kind; anything else is
/// an objective failure carrying the original error.
pub(crate) fn unwrap_objective_error(e: ObjectiveError) -> McError {
    match e.downcast::<McError>() {
        Ok(inner) => *inner,
        Err(other) => McError::Objective(other),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::sampling::UniformSampler;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn no_look_ahead(seed in 0_u64..10_000, n in 1_u64..400, cut in 0_u64..400) {
            let cut = cut.min(n);
            let f = |x: &f64| (3.0 * x).sin();
            let full = estimate(&mut UniformSampler::unit(seed), &f, n).unwrap();
            let prefix = estimate(&mut UniformSampler::unit(seed), &f, cut).unwrap();
            prop_assert_eq!(&full.as_slice()[..cut as usize], prefix.as_slice());
        }
    }
}
