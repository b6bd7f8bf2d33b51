pub mod math;

pub use math::{normal_probability, normal_quantile};
