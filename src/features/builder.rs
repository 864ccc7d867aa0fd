//! Training-set construction from sorted observations.

use super::calendar::CalendarFeatures;
use super::schema::{FeatureRow, FeatureSchema, LagFeatures};
use crate::core::{Channel, Observation};
use crate::error::{ForecastError, Result};
use crate::transform::{rolling_mean, shift};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Parameters of feature construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// History length at which lag and moving-average columns are computed.
    pub conditional_min_rows: usize,
    /// Trailing window of the moving-average columns.
    pub moving_average_window: usize,
    /// Fewest complete rows needed to train with lag columns.
    pub min_training_rows: usize,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            conditional_min_rows: 3,
            moving_average_window: 3,
            min_training_rows: 3,
        }
    }
}

impl FeatureConfig {
    pub fn validate(&self) -> Result<()> {
        if self.moving_average_window == 0 {
            return Err(ForecastError::InvalidParameter(
                "moving_average_window must be positive".into(),
            ));
        }
        if self.min_training_rows == 0 {
            return Err(ForecastError::InvalidParameter(
                "min_training_rows must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Supervised training data for one engine call.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSet {
    pub schema: FeatureSchema,
    /// Feature rows kept for training, in chronological order.
    pub rows: Vec<FeatureRow>,
    /// Unscaled feature matrix, row-major in schema column order.
    pub features: Vec<Vec<f64>>,
    pub targets: Vec<f64>,
}

impl TrainingSet {
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Compute a feature row for every observation.
///
/// `observations` must already be sorted. Lag inputs are attached only when
/// the series is long enough and the row has full lag history.
pub fn build_feature_rows(observations: &[Observation], config: &FeatureConfig) -> Vec<FeatureRow> {
    let n = observations.len();
    let with_lags = n >= config.conditional_min_rows;

    let scores: Vec<f64> = observations.iter().map(|o| o.score).collect();
    let channels: Vec<Vec<f64>> = Channel::ALL
        .iter()
        .map(|&c| observations.iter().map(|o| o.channel(c)).collect())
        .collect();

    let window = config.moving_average_window;
    let (score_lag1, score_lag2, score_ma) = if with_lags {
        (
            shift(&scores, 1),
            shift(&scores, 2),
            rolling_mean(&scores, window, 1),
        )
    } else {
        (Vec::new(), Vec::new(), Vec::new())
    };
    let channel_lag1: Vec<Vec<f64>> = if with_lags {
        channels.iter().map(|c| shift(c, 1)).collect()
    } else {
        Vec::new()
    };
    let channel_ma: Vec<Vec<f64>> = if with_lags {
        channels.iter().map(|c| rolling_mean(c, window, 1)).collect()
    } else {
        Vec::new()
    };

    observations
        .iter()
        .enumerate()
        .map(|(i, obs)| {
            let lags = if with_lags {
                LagFeatures {
                    score_lag1: score_lag1[i],
                    score_lag2: score_lag2[i],
                    channel_lag1: [channel_lag1[0][i], channel_lag1[1][i], channel_lag1[2][i]],
                    score_ma: score_ma[i],
                    channel_ma: [channel_ma[0][i], channel_ma[1][i], channel_ma[2][i]],
                }
                .complete()
            } else {
                None
            };
            FeatureRow {
                channels: [obs.x, obs.y, obs.z],
                calendar: CalendarFeatures::from_timestamp(&obs.t),
                time_index: i,
                lags,
            }
        })
        .collect()
}

/// Build the training set and pick the column schema.
///
/// With lag columns enabled, rows lacking lag history are dropped. If fewer
/// than `min_training_rows` rows survive, the whole call falls back to the
/// basic schema over every row.
pub fn build_training_set(
    observations: &[Observation],
    config: &FeatureConfig,
) -> Result<TrainingSet> {
    if observations.is_empty() {
        return Err(ForecastError::EmptyData);
    }
    config.validate()?;

    let all_rows = build_feature_rows(observations, config);
    let complete: Vec<usize> = all_rows
        .iter()
        .enumerate()
        .filter(|(_, r)| r.lags.is_some())
        .map(|(i, _)| i)
        .collect();

    let lags_enabled = observations.len() >= config.conditional_min_rows;
    let (schema, selected): (FeatureSchema, Vec<usize>) =
        if lags_enabled && complete.len() >= config.min_training_rows {
            (FeatureSchema::Autoregressive, complete)
        } else {
            if lags_enabled {
                debug!(
                    complete_rows = complete.len(),
                    required = config.min_training_rows,
                    "too few complete rows, falling back to basic features"
                );
            }
            (FeatureSchema::Basic, (0..observations.len()).collect())
        };

    let mut rows = Vec::with_capacity(selected.len());
    let mut features = Vec::with_capacity(selected.len());
    let mut targets = Vec::with_capacity(selected.len());
    for i in selected {
        let row = &all_rows[i];
        features.push(row.assemble(schema)?);
        targets.push(observations[i].score);
        rows.push(row.clone());
    }

    debug!(
        ?schema,
        training_rows = targets.len(),
        history_rows = observations.len(),
        "built training set"
    );

    Ok(TrainingSet {
        schema,
        rows,
        features,
        targets,
    })
}
