mod accumulator;
mod recursive;
mod welford;

pub use accumulator::Accumulator;
pub use recursive::RecursiveAccumulator;
pub use welford::WelfordAccumulator;
