pub mod solvers;
pub mod stubs;

pub use solvers::{DiffusionSolver, DiffusionSolverBuilder};
pub use stubs::{SpyHandle, SpyObjective, StubFailure, VecSampler};
