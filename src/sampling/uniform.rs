use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{McError, Result};
use crate::sampling::Sampler;

/// Scalar draws from `Uniform[low, high)`.
#[derive(Debug)]
pub struct UniformSampler {
    seed: u64,
    rng: StdRng,
    low: f64,
    high: f64,
    max_samples: Option<usize>,
    produced: usize,
}

impl UniformSampler {
    pub fn new(low: f64, high: f64, max_samples: Option<usize>, seed: u64) -> Result<Self> {
        if !(low.is_finite() && high.is_finite()) || low >= high {
            return Err(McError::invalid(format!(
                "uniform bounds must be finite with low < high, got [{low}, {high})"
            )));
        }
        Ok(Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
            low,
            high,
            max_samples,
            produced: 0,
        })
    }

    /// `Uniform[0, 1)` without a sample limit.
    pub fn unit(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
            low: 0.0,
            high: 1.0,
            max_samples: None,
            produced: 0,
        }
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.low, self.high)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Sampler for UniformSampler {
    type Sample = f64;

    fn has_more_samples(&self) -> bool {
        self.max_samples.map_or(true, |max| self.produced < max)
    }

    fn next_sample(&mut self) -> Option<f64> {
        if !self.has_more_samples() {
            return None;
        }
        self.produced += 1;
        Some(self.rng.random_range(self.low..self.high))
    }

    fn restart(&mut self) -> Result<()> {
        self.rng = StdRng::seed_from_u64(self.seed);
        self.produced = 0;
        Ok(())
    }
}
