mod diffusion;

pub use diffusion::{DiffusionSolver, DiffusionSolverBuilder};
