use std::convert::TryFrom;

use crate::config::parameters::*;
use crate::error::{McError, Result};
use crate::estimation::UncertaintyBand;
use crate::fields::{KarhunenLoeveField, uniform_grid};
use crate::objective::Objective;
use crate::sampling::{FieldSampler, Sampler, StandardNormalSampler, UniformSampler};
use crate::summary::{EmpiricalBatch, Exceedance, PercentileBand};
use crate::tasks::{Repetitions, SequentialEstimator, collect_batch};

impl TryFrom<&FieldParameters> for KarhunenLoeveField {
    type Error = McError;

    fn try_from(parameters: &FieldParameters) -> Result<Self> {
        KarhunenLoeveField::new(parameters.dimension, parameters.sigma)
    }
}

impl TryFrom<FieldParameters> for StandardNormalSampler {
    type Error = McError;

    fn try_from(parameters: FieldParameters) -> Result<Self> {
        StandardNormalSampler::new(parameters.dimension, parameters.seed)
    }
}

impl TryFrom<FieldParameters> for FieldSampler {
    type Error = McError;

    fn try_from(parameters: FieldParameters) -> Result<Self> {
        let field = KarhunenLoeveField::try_from(&parameters)?;
        let points = uniform_grid(parameters.grid_points)?;
        FieldSampler::new(field, points, parameters.seed)
    }
}

impl TryFrom<UniformParameters> for UniformSampler {
    type Error = McError;

    fn try_from(parameters: UniformParameters) -> Result<Self> {
        let max_samples = parameters
            .max_samples
            .map(|v| {
                usize::try_from(v)
                    .map_err(|_| McError::invalid("max_samples too large for usize"))
            })
            .transpose()?;

        UniformSampler::new(parameters.low, parameters.high, max_samples, parameters.seed)
    }
}

impl RunParameters {
    pub fn band(&self) -> Result<UncertaintyBand> {
        match self.confidence {
            Some(level) => UncertaintyBand::with_confidence(level),
            None => Ok(UncertaintyBand::two_sigma()),
        }
    }

    pub fn estimator(&self) -> Result<SequentialEstimator> {
        SequentialEstimator::new()
            .with_band(self.band()?)
            .with_sample_frequency(self.sample_frequency)
    }

    pub fn repetitions(&self) -> Result<Repetitions> {
        Ok(Repetitions::new(self.repetitions, self.max_samples, self.seed)?.with_band(self.band()?))
    }
}

/// Prediction band and optional exceedance profile of a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    pub band: PercentileBand,
    pub exceedance: Option<Vec<Exceedance>>,
}

impl SummaryParameters {
    /// Draws `realizations` profiles of `objective` into a batch.
    pub fn collect<S, O>(&self, sampler: &mut S, objective: &O) -> Result<EmpiricalBatch>
    where
        S: Sampler,
        O: Objective<S::Sample, Output = Vec<f64>> + ?Sized,
    {
        collect_batch(sampler, objective, self.realizations)
    }

    pub fn summarize(&self, batch: &EmpiricalBatch) -> Result<BatchSummary> {
        let band = batch.prediction_band(self.lower_percentile, self.upper_percentile)?;
        let exceedance = self
            .threshold
            .map(|t| batch.exceedance_profile(t))
            .transpose()?;
        Ok(BatchSummary { band, exceedance })
    }
}
