pub mod spy_objective;
pub mod vec_sampler;

pub use spy_objective::{SpyHandle, SpyObjective, StubFailure};
pub use vec_sampler::VecSampler;
