use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use crate::error::{McError, Result};
use crate::sampling::Sampler;

/// Coefficient vectors `ξ` of `dimension` independent standard normals.
#[derive(Debug)]
pub struct StandardNormalSampler {
    seed: u64,
    rng: StdRng,
    dimension: usize,
}

impl StandardNormalSampler {
    pub fn new(dimension: usize, seed: u64) -> Result<Self> {
        if dimension == 0 {
            return Err(McError::invalid("coefficient dimension must be > 0"));
        }
        Ok(Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
            dimension,
        })
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Fills `out` with fresh coefficients instead of allocating.
    pub fn fill(&mut self, out: &mut [f64]) -> Result<()> {
        if out.len() != self.dimension {
            return Err(McError::DimensionMismatch {
                expected: self.dimension,
                found: out.len(),
            });
        }
        for c in out.iter_mut() {
            *c = self.rng.sample(StandardNormal);
        }
        Ok(())
    }
}

impl Sampler for StandardNormalSampler {
    type Sample = Vec<f64>;

    fn next_sample(&mut self) -> Option<Vec<f64>> {
        Some(
            (0..self.dimension)
                .map(|_| self.rng.sample(StandardNormal))
                .collect(),
        )
    }

    fn restart(&mut self) -> Result<()> {
        self.rng = StdRng::seed_from_u64(self.seed);
        Ok(())
    }
}
