use crate::error::Result;
use crate::sampling::Sampler;

/// Replays a fixed list of draws, then reports exhaustion.
pub struct VecSampler<T> {
    pub values: Vec<T>,
    idx: usize,
}

impl<T: Clone> VecSampler<T> {
    pub fn new(values: Vec<T>) -> Self {
        Self { values, idx: 0 }
    }
}

impl<T: Clone> Sampler for VecSampler<T> {
    type Sample = T;

    fn has_more_samples(&self) -> bool {
        self.idx < self.values.len()
    }

    fn next_sample(&mut self) -> Option<T> {
        if !self.has_more_samples() {
            return None;
        }
        let v = self.values[self.idx].clone();
        self.idx += 1;
        Some(v)
    }

    fn restart(&mut self) -> Result<()> {
        self.idx = 0;
        Ok(())
    }
}
