use crate::error::Result;
use crate::fields::KarhunenLoeveField;
use crate::sampling::{Sampler, StandardNormalSampler};

/// One realization of the random field on a fixed grid.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSample {
    pub coefficients: Vec<f64>,
    pub values: Vec<f64>,
}

/// Draws `ξ ~ N(0, I_d)` and evaluates the truncated expansion on a fixed grid.
#[derive(Debug)]
pub struct FieldSampler {
    field: KarhunenLoeveField,
    points: Vec<f64>,
    coefficients: StandardNormalSampler,
}

impl FieldSampler {
    pub fn new(field: KarhunenLoeveField, points: Vec<f64>, seed: u64) -> Result<Self> {
        // Validate the grid once so that per-draw evaluation cannot fail.
        field.evaluate(&points, &vec![0.0; field.dimension()])?;
        let coefficients = StandardNormalSampler::new(field.dimension(), seed)?;
        Ok(Self {
            field,
            points,
            coefficients,
        })
    }

    pub fn field(&self) -> &KarhunenLoeveField {
        &self.field
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }
}

impl Sampler for FieldSampler {
    type Sample = FieldSample;

    fn next_sample(&mut self) -> Option<FieldSample> {
        let coefficients = self.coefficients.next_sample()?;
        let values = self.field.evaluate(&self.points, &coefficients).ok()?;
        Some(FieldSample {
            coefficients,
            values,
        })
    }

    fn restart(&mut self) -> Result<()> {
        self.coefficients.restart()
    }
}
