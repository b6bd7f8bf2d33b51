use crate::estimation::{ConfidenceBand, Estimate, UncertaintyBand};

/// Append-only record of running estimates, one entry per consumed sample.
///
/// Entry `k` (0-based) holds the estimate after `k + 1` samples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    entries: Vec<Estimate>,
}

impl Trajectory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, estimate: Estimate) {
        self.entries.push(estimate)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<Estimate> {
        self.entries.last().copied()
    }

    /// Estimate after exactly `n` samples (1-based).
    pub fn at(&self, n: u64) -> Option<Estimate> {
        let idx = usize::try_from(n).ok()?.checked_sub(1)?;
        self.entries.get(idx).copied()
    }

    pub fn as_slice(&self) -> &[Estimate] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Estimate> {
        self.entries.iter()
    }

    pub fn means(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.mean).collect()
    }

    pub fn variances(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.variance).collect()
    }

    /// Band around every entry.
    pub fn bands(&self, band: &UncertaintyBand) -> Vec<ConfidenceBand> {
        self.entries.iter().map(|e| band.around(e)).collect()
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a Estimate;
    type IntoIter = std::slice::Iter<'a, Estimate>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
