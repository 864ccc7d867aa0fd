//! Dataset sources feeding the forecast engine.
//!
//! The engine only needs a sequence of [`Observation`]s; ordering is not
//! required. [`SyntheticDataset`] generates a reproducible noisy upward
//! trend for demos, tests and benchmarks.

use crate::core::Observation;
use crate::error::{ForecastError, Result};
use crate::utils::{clamp_to, round_to};
use chrono::{Duration, Local, NaiveDateTime, Timelike};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Anything that can supply historical observations.
pub trait DatasetSource: Send + Sync {
    /// Source name for logs.
    fn name(&self) -> &str;

    /// Load the observations.
    fn observations(&self) -> Result<Vec<Observation>>;
}

impl DatasetSource for Vec<Observation> {
    fn name(&self) -> &str {
        "in-memory"
    }

    fn observations(&self) -> Result<Vec<Observation>> {
        Ok(self.clone())
    }
}

/// Shape of one synthetic channel: linear trend, sine wave, Gaussian noise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelProfile {
    pub trend_start: f64,
    pub trend_end: f64,
    pub wave_amplitude: f64,
    /// Phase at the first row, in radians; the wave spans two full periods.
    pub wave_phase: f64,
    pub noise_std: f64,
}

impl ChannelProfile {
    fn generate(&self, rows: usize, rng: &mut ChaCha8Rng) -> Result<Vec<f64>> {
        let noise = Normal::new(0.0, self.noise_std).map_err(|e| {
            ForecastError::InvalidParameter(format!("noise std {}: {}", self.noise_std, e))
        })?;
        let trend = linspace(self.trend_start, self.trend_end, rows);
        let phase = linspace(self.wave_phase, self.wave_phase + 4.0 * PI, rows);
        Ok(trend
            .iter()
            .zip(&phase)
            .map(|(base, angle)| base + self.wave_amplitude * angle.sin() + noise.sample(rng))
            .collect())
    }
}

/// Parameters of [`SyntheticDataset`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntheticConfig {
    pub rows: usize,
    pub seed: u64,
    /// Timestamp of the last row; `None` uses the current local time.
    pub end: Option<NaiveDateTime>,
    pub x: ChannelProfile,
    pub y: ChannelProfile,
    pub z: ChannelProfile,
    /// Score weights for `x`, `y` and `z`.
    pub weights: [f64; 3],
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            rows: 30,
            seed: 42,
            end: None,
            x: ChannelProfile {
                trend_start: 20.0,
                trend_end: 80.0,
                wave_amplitude: 10.0,
                wave_phase: 0.0,
                noise_std: 8.0,
            },
            y: ChannelProfile {
                trend_start: 15.0,
                trend_end: 85.0,
                wave_amplitude: 12.0,
                wave_phase: 0.5 * PI,
                noise_std: 6.0,
            },
            z: ChannelProfile {
                trend_start: 25.0,
                trend_end: 75.0,
                wave_amplitude: 15.0,
                wave_phase: PI,
                noise_std: 10.0,
            },
            weights: [0.3, 0.3, 0.4],
        }
    }
}

impl SyntheticConfig {
    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn ending_at(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 {
            return Err(ForecastError::InvalidParameter(
                "rows must be positive".into(),
            ));
        }
        for profile in [&self.x, &self.y, &self.z] {
            if !profile.noise_std.is_finite() || profile.noise_std < 0.0 {
                return Err(ForecastError::InvalidParameter(format!(
                    "noise_std must be finite and non-negative, got {}",
                    profile.noise_std
                )));
            }
        }
        Ok(())
    }
}

/// Daily observations following a noisy upward trend.
///
/// Channels are clipped to `[0, 100]` and rounded to two decimals. The
/// score is the weighted sum of the clipped channels, rounded the same way.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use quality_forecast::dataset::{DatasetSource, SyntheticConfig, SyntheticDataset};
///
/// let end = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap().and_hms_opt(9, 0, 0).unwrap();
/// let data = SyntheticDataset::new(SyntheticConfig::default().ending_at(end));
/// let rows = data.observations().unwrap();
/// assert_eq!(rows.len(), 30);
/// assert_eq!(rows[29].t, end);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SyntheticDataset {
    config: SyntheticConfig,
}

impl SyntheticDataset {
    pub fn new(config: SyntheticConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SyntheticConfig {
        &self.config
    }
}

impl DatasetSource for SyntheticDataset {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn observations(&self) -> Result<Vec<Observation>> {
        let config = &self.config;
        config.validate()?;

        let end = match config.end {
            Some(end) => end,
            None => {
                let now = Local::now().naive_local();
                now.with_nanosecond(0).unwrap_or(now)
            }
        };
        let span = i64::try_from(config.rows - 1)
            .ok()
            .and_then(Duration::try_days)
            .ok_or_else(|| ForecastError::InvalidParameter("rows out of range".into()))?;
        let start = end
            .checked_sub_signed(span)
            .ok_or_else(|| ForecastError::InvalidParameter("rows out of range".into()))?;

        // Channels draw their noise in x, y, z order from one generator
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let xs = config.x.generate(config.rows, &mut rng)?;
        let ys = config.y.generate(config.rows, &mut rng)?;
        let zs = config.z.generate(config.rows, &mut rng)?;

        let [wx, wy, wz] = config.weights;
        let mut rows = Vec::with_capacity(config.rows);
        let mut t = start;
        for i in 0..config.rows {
            let x = clamp_to(xs[i], 0.0, 100.0);
            let y = clamp_to(ys[i], 0.0, 100.0);
            let z = clamp_to(zs[i], 0.0, 100.0);
            let score = wx * x + wy * y + wz * z;
            rows.push(Observation::new(
                t,
                round_to(x, 2),
                round_to(y, 2),
                round_to(z, 2),
                round_to(score, 2),
            ));
            t += Duration::days(1);
        }
        Ok(rows)
    }
}

/// `n` evenly spaced values from `start` to `end` inclusive.
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}
