mod field;
mod normal;
mod sampler;
mod uniform;

pub use field::{FieldSample, FieldSampler};
pub use normal::StandardNormalSampler;
pub use sampler::Sampler;
pub use uniform::UniformSampler;
