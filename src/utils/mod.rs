//! Utility functions shared by the feature builder, models and engine.

pub mod linalg;
pub mod stats;
pub mod trend;

pub use linalg::solve_symmetric;
pub use stats::{clamp_to, mean, population_variance, round_to};
pub use trend::linear_slope;
