mod accumulators;
pub mod band;
mod estimate;
mod preview;

pub use accumulators::{Accumulator, RecursiveAccumulator, WelfordAccumulator};
pub use band::{ConfidenceBand, UncertaintyBand, bandwidth, interval};
pub use estimate::Estimate;
pub use preview::{Snapshot, Trajectory};
