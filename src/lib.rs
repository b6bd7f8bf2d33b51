pub mod config;
pub mod error;
pub mod estimation;
pub mod fields;
pub mod objective;
pub mod sampling;
pub mod summary;
pub mod tasks;
pub mod utils;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;
