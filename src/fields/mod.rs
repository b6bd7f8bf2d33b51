mod karhunen_loeve;

pub use karhunen_loeve::{KarhunenLoeveField, uniform_grid};
