mod objective;
mod profile;

pub use objective::{Fallible, Objective};
pub use profile::{Profile, ProfileModel, ProfileObjective, ProfilePoint};
