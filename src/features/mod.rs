//! Feature engineering for score regression.
//!
//! Turns a sorted observation sequence into a numeric feature matrix:
//! raw channels, calendar attributes and a time index, plus lag and
//! trailing moving-average columns when the history is long enough.
//!
//! # Example
//!
//! ```
//! use chrono::{Duration, NaiveDate};
//! use quality_forecast::core::Observation;
//! use quality_forecast::features::{build_training_set, FeatureConfig, FeatureSchema};
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let history: Vec<Observation> = (0..10)
//!     .map(|i| {
//!         let v = 40.0 + i as f64;
//!         Observation::new(start + Duration::days(i), v, v, v, v)
//!     })
//!     .collect();
//!
//! let set = build_training_set(&history, &FeatureConfig::default()).unwrap();
//! assert_eq!(set.schema, FeatureSchema::Autoregressive);
//! assert_eq!(set.len(), 8);
//! ```

mod builder;
mod calendar;
mod schema;

pub use builder::{build_feature_rows, build_training_set, FeatureConfig, TrainingSet};
pub use calendar::CalendarFeatures;
pub use schema::{FeatureColumn, FeatureRow, FeatureSchema, LagFeatures};
