mod build;
mod parameters;
mod study;

pub use build::BatchSummary;
pub use parameters::{FieldParameters, RunParameters, SummaryParameters, UniformParameters};
pub use study::{InputChoice, StudyConfig};
