mod batch;
mod repetitions;
mod sequential_estimator;

pub use batch::collect_batch;
pub use repetitions::{RepetitionReport, Repetitions};
pub use sequential_estimator::{SequentialEstimator, estimate};
