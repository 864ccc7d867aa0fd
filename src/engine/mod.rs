//! Forecast engine.
//!
//! Validates and sorts the history, fits a regressor on engineered
//! features, then produces one score per future day. Each step's channels
//! come from a seeded linear extrapolation, and each prediction becomes the
//! lag input of the next step.

mod config;
mod extrapolate;
mod forecaster;
mod validate;

pub use config::EngineConfig;
pub use extrapolate::ChannelExtrapolator;
pub use forecaster::{FitSummary, ScoreForecaster};
pub use validate::{normalize_observations, normalize_records, validate_horizon};
