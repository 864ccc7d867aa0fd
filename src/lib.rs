//! # quality-forecast
//!
//! Multi-day forecasting of composite quality-inspection scores.
//!
//! A regressor (a seeded random forest by default) is fitted on engineered
//! features of the history: raw channels, calendar attributes, a time
//! index, and lag and moving-average columns when the history is long
//! enough. It is then rolled forward one day at a time. Each future day's
//! channels come from a noisy linear extrapolation, and each prediction
//! feeds the next day's lag features.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use quality_forecast::dataset::{DatasetSource, SyntheticConfig, SyntheticDataset};
//! use quality_forecast::produce_forecast;
//!
//! let end = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let history = SyntheticDataset::new(SyntheticConfig::default().ending_at(end))
//!     .observations()
//!     .unwrap();
//!
//! let result = produce_forecast(&history, 7).unwrap();
//! assert_eq!(result.history.len(), 30);
//! assert_eq!(result.forecast.len(), 7);
//! assert!(result.forecast.get("2024-07-01 00:00:00").is_some());
//! ```

#![allow(clippy::needless_range_loop)]

pub mod core;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod features;
pub mod models;
pub mod transform;
pub mod utils;

pub use error::{ErrorKind, ForecastError, Result};

use crate::core::{ForecastResult, Observation};
use crate::engine::ScoreForecaster;

/// Forecast `horizon_days` daily scores with the default engine.
///
/// `history` need not be sorted. Fails with a validation error when it is
/// empty or `horizon_days < 1`.
pub fn produce_forecast(history: &[Observation], horizon_days: i64) -> Result<ForecastResult> {
    ScoreForecaster::default().produce(history, horizon_days)
}

pub mod prelude {
    pub use crate::core::{ForecastResult, Observation, RawObservation, ScoreSeries};
    pub use crate::dataset::{DatasetSource, SyntheticConfig, SyntheticDataset};
    pub use crate::engine::{EngineConfig, FitSummary, ScoreForecaster};
    pub use crate::error::{ErrorKind, ForecastError, Result};
    pub use crate::models::{Regressor, RegressorSpec};
    pub use crate::produce_forecast;
}
