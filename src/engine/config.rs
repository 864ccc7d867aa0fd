//! Forecast engine configuration.

use crate::error::{ForecastError, Result};
use crate::features::FeatureConfig;
use serde::{Deserialize, Serialize};

/// Configuration of a [`ScoreForecaster`](super::ScoreForecaster).
///
/// Deserializes from partial documents; missing fields take their defaults.
///
/// # Example
///
/// ```
/// use quality_forecast::engine::EngineConfig;
///
/// let config = EngineConfig::default().with_seed(7).with_trend_window(4);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.base_seed, 7);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Base seed; step `i` of the horizon draws noise from `base_seed + i`.
    pub base_seed: u64,
    /// Number of trailing history rows used to fit channel trends.
    pub trend_window: usize,
    /// Standard deviation of the noise added to extrapolated channels.
    pub trend_noise_std: f64,
    /// Standard deviation of the noise used when no trend can be fitted.
    pub fallback_noise_std: f64,
    /// Lower bound for channel values and forecast scores.
    pub lower_bound: f64,
    /// Upper bound for channel values and forecast scores.
    pub upper_bound: f64,
    /// Decimal places kept in reported scores.
    pub decimals: u32,
    /// Feature construction parameters.
    pub features: FeatureConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_seed: 42,
            trend_window: 5,
            trend_noise_std: 2.0,
            fallback_noise_std: 1.0,
            lower_bound: 0.0,
            upper_bound: 100.0,
            decimals: 2,
            features: FeatureConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.base_seed = seed;
        self
    }

    pub fn with_trend_window(mut self, window: usize) -> Self {
        self.trend_window = window;
        self
    }

    pub fn with_noise(mut self, trend_std: f64, fallback_std: f64) -> Self {
        self.trend_noise_std = trend_std;
        self.fallback_noise_std = fallback_std;
        self
    }

    pub fn with_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.lower_bound = lower;
        self.upper_bound = upper;
        self
    }

    pub fn with_features(mut self, features: FeatureConfig) -> Self {
        self.features = features;
        self
    }

    /// Check parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if self.trend_window < 2 {
            return Err(ForecastError::InvalidParameter(format!(
                "trend_window must be at least 2, got {}",
                self.trend_window
            )));
        }
        for (name, std) in [
            ("trend_noise_std", self.trend_noise_std),
            ("fallback_noise_std", self.fallback_noise_std),
        ] {
            if !std.is_finite() || std < 0.0 {
                return Err(ForecastError::InvalidParameter(format!(
                    "{} must be finite and non-negative, got {}",
                    name, std
                )));
            }
        }
        if !self.lower_bound.is_finite()
            || !self.upper_bound.is_finite()
            || self.lower_bound >= self.upper_bound
        {
            return Err(ForecastError::InvalidParameter(format!(
                "bounds must be finite with lower < upper, got [{}, {}]",
                self.lower_bound, self.upper_bound
            )));
        }
        if self.decimals > 15 {
            return Err(ForecastError::InvalidParameter(format!(
                "decimals must be at most 15, got {}",
                self.decimals
            )));
        }
        self.features.validate()
    }
}
