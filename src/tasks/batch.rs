use tracing::debug;

use crate::error::{McError, Result};
use crate::objective::Objective;
use crate::sampling::Sampler;
use crate::summary::EmpiricalBatch;
use crate::tasks::sequential_estimator::unwrap_objective_error;

/// Evaluates a vector-valued objective on `k` independent draws.
///
/// Every output must have the same length as the first; a model whose grid
/// changes within a run yields `DimensionMismatch`.
pub fn collect_batch<S, O>(sampler: &mut S, objective: &O, k: usize) -> Result<EmpiricalBatch>
where
    S: Sampler,
    O: Objective<S::Sample, Output = Vec<f64>> + ?Sized,
{
    if k == 0 {
        return Err(McError::insufficient("batch needs at least one realization"));
    }
    let mut realizations: Vec<Vec<f64>> = Vec::with_capacity(k);
    for drawn in 0..k {
        let sample = sampler.next_sample().ok_or_else(|| {
            McError::insufficient(format!("sampler exhausted after {drawn} of {k} draws"))
        })?;
        let profile = objective
            .evaluate(&sample)
            .map_err(unwrap_objective_error)?;
        if let Some(first) = realizations.first() {
            if profile.len() != first.len() {
                return Err(McError::DimensionMismatch {
                    expected: first.len(),
                    found: profile.len(),
                });
            }
        }
        realizations.push(profile);
    }
    debug!(realizations = k, "batch collected");
    EmpiricalBatch::new(realizations)
}
