//! Data transformations for feature construction.
//!
//! Provides column standardization and lag/window functions.
//!
//! # Example
//!
//! ```
//! use quality_forecast::transform::{rolling_mean, shift, StandardScaler};
//!
//! let series = vec![1.0, 2.0, 3.0, 4.0, 5.0];
//!
//! // Lag-1 copy of the series
//! let lagged = shift(&series, 1);
//! assert!(lagged[0].is_nan());
//!
//! // Trailing mean over 3 values, shorter windows allowed at the head
//! let ma = rolling_mean(&series, 3, 1);
//! assert_eq!(ma[0], 1.0);
//!
//! // Standardize a feature matrix
//! let rows = vec![vec![1.0, 10.0], vec![3.0, 30.0]];
//! let scaler = StandardScaler::fit(&rows).unwrap();
//! assert_eq!(scaler.transform_row(&[2.0, 20.0]).unwrap(), vec![0.0, 0.0]);
//! ```

pub mod scale;
pub mod window;

pub use scale::StandardScaler;
pub use window::{rolling_mean, shift, tail_mean};
