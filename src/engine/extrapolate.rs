//! Raw channel extrapolation for future steps.
//!
//! Each channel is continued along the least-squares line through the last
//! `trend_window` observations, with Gaussian noise drawn from a generator
//! seeded per step. A step's values depend only on the history and the
//! step number, so any step can be recomputed on demand.

use super::config::EngineConfig;
use crate::core::{Channel, Observation};
use crate::error::{ForecastError, Result};
use crate::utils::{clamp_to, linear_slope};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

/// Deterministic generator of future channel values.
#[derive(Debug, Clone)]
pub struct ChannelExtrapolator {
    last: [f64; 3],
    /// Per-channel slopes; `None` when the history is too short for a trend
    slopes: Option<[f64; 3]>,
    noise: Normal<f64>,
    base_seed: u64,
    lower: f64,
    upper: f64,
}

impl ChannelExtrapolator {
    /// Fit channel trends on the tail of a sorted, non-empty history.
    pub fn new(history: &[Observation], config: &EngineConfig) -> Result<Self> {
        let last = history.last().ok_or(ForecastError::EmptyData)?;

        let start = history.len().saturating_sub(config.trend_window);
        let tail = &history[start..];
        let slopes = if tail.len() >= 2 {
            let mut slopes = [0.0; 3];
            for (slot, &channel) in Channel::ALL.iter().enumerate() {
                let values: Vec<f64> = tail.iter().map(|o| o.channel(channel)).collect();
                slopes[slot] = linear_slope(&values).unwrap_or(0.0);
            }
            Some(slopes)
        } else {
            None
        };

        let std = if slopes.is_some() {
            config.trend_noise_std
        } else {
            config.fallback_noise_std
        };
        let noise = Normal::new(0.0, std)
            .map_err(|e| ForecastError::InvalidParameter(format!("noise std {}: {}", std, e)))?;

        Ok(Self {
            last: [last.x, last.y, last.z],
            slopes,
            noise,
            base_seed: config.base_seed,
            lower: config.lower_bound,
            upper: config.upper_bound,
        })
    }

    /// Whether a linear trend is being followed.
    pub fn has_trend(&self) -> bool {
        self.slopes.is_some()
    }

    /// Channel values at 1-based `step`, in [`Channel::ALL`] order.
    pub fn at(&self, step: usize) -> [f64; 3] {
        let mut rng = ChaCha8Rng::seed_from_u64(self.base_seed.wrapping_add(step as u64));
        let mut values = [0.0; 3];
        for slot in 0..3 {
            let drift = self.slopes.map_or(0.0, |s| s[slot] * step as f64);
            let noise = self.noise.sample(&mut rng);
            values[slot] = clamp_to(self.last[slot] + drift + noise, self.lower, self.upper);
        }
        values
    }
}
