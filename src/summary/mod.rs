mod empirical_batch;

pub use empirical_batch::{EmpiricalBatch, Exceedance, PercentileBand};
