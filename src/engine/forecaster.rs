//! Iterative multi-day score forecasting.

use super::config::EngineConfig;
use super::extrapolate::ChannelExtrapolator;
use super::validate::{normalize_observations, normalize_records, validate_horizon};
use crate::core::{ForecastResult, Observation, RawObservation, ScoreSeries};
use crate::error::{ErrorKind, ForecastError, Result};
use crate::features::{
    build_training_set, CalendarFeatures, FeatureRow, FeatureSchema, LagFeatures,
};
use crate::models::{BoxedRegressor, RegressorSpec};
use crate::transform::{tail_mean, StandardScaler};
use crate::utils::{clamp_to, round_to};
use chrono::Duration;
use serde::Serialize;
use tracing::{debug, info, trace};

/// Diagnostics about the model fitted during one engine call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitSummary {
    pub model: String,
    pub schema: FeatureSchema,
    pub feature_names: Vec<&'static str>,
    pub history_rows: usize,
    pub training_rows: usize,
    /// Normalized importances in `feature_names` order, when the model has them
    pub feature_importances: Option<Vec<f64>>,
}

/// Forecast engine: fits a regressor on the history, then rolls it forward
/// one day at a time, feeding each prediction back as a lag input.
///
/// Each call is independent. Nothing fitted in one call is kept for the next.
///
/// # Example
///
/// ```
/// use chrono::{Duration, NaiveDate};
/// use quality_forecast::core::Observation;
/// use quality_forecast::engine::ScoreForecaster;
/// use quality_forecast::models::{RegressorSpec, RidgeConfig};
///
/// let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let history: Vec<Observation> = (0..12)
///     .map(|i| {
///         let v = 50.0 + i as f64;
///         Observation::new(start + Duration::days(i), v, v, v, v)
///     })
///     .collect();
///
/// let engine = ScoreForecaster::default().with_regressor(RegressorSpec::ridge(RidgeConfig::default()));
/// let result = engine.produce(&history, 3).unwrap();
/// assert_eq!(result.history.len(), 12);
/// assert_eq!(result.forecast.len(), 3);
/// assert!(result.forecast.get("2024-03-13 00:00:00").is_some());
/// ```
#[derive(Debug, Default)]
pub struct ScoreForecaster {
    config: EngineConfig,
    regressor: RegressorSpec,
}

/// Fitted state for one call.
struct FittedModel {
    schema: FeatureSchema,
    scaler: StandardScaler,
    model: BoxedRegressor,
}

impl ScoreForecaster {
    /// Create an engine with the default random forest.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            regressor: RegressorSpec::default(),
        }
    }

    /// Use a different regressor.
    pub fn with_regressor(mut self, regressor: RegressorSpec) -> Self {
        self.regressor = regressor;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn regressor(&self) -> &RegressorSpec {
        &self.regressor
    }

    /// Forecast `horizon_days` daily scores after the last observation.
    pub fn produce(&self, history: &[Observation], horizon_days: i64) -> Result<ForecastResult> {
        self.produce_with_summary(history, horizon_days)
            .map(|(result, _)| result)
    }

    /// Like [`produce`](Self::produce), for records whose fields may be
    /// absent or whose timestamps are still text.
    pub fn produce_raw(
        &self,
        records: &[RawObservation],
        horizon_days: i64,
    ) -> Result<ForecastResult> {
        let horizon = validate_horizon(horizon_days)?;
        self.config.validate()?;
        let sorted = normalize_records(records)?;
        self.run(&sorted, horizon).map(|(result, _)| result)
    }

    /// Forecast and also report what was fitted.
    pub fn produce_with_summary(
        &self,
        history: &[Observation],
        horizon_days: i64,
    ) -> Result<(ForecastResult, FitSummary)> {
        let horizon = validate_horizon(horizon_days)?;
        self.config.validate()?;
        let sorted = normalize_observations(history)?;
        self.run(&sorted, horizon)
    }

    fn run(&self, sorted: &[Observation], horizon: usize) -> Result<(ForecastResult, FitSummary)> {
        let (fitted, summary) = self.fit(sorted)?;
        let extrapolator = ChannelExtrapolator::new(sorted, &self.config)?;
        debug!(
            model = %summary.model,
            schema = ?fitted.schema,
            trend = extrapolator.has_trend(),
            horizon,
            "starting forecast loop"
        );

        let forecast = self.roll_forward(sorted, &fitted, &extrapolator, horizon)?;

        let mut history = ScoreSeries::with_capacity(sorted.len());
        for obs in sorted {
            history.push(obs.t, round_to(obs.score, self.config.decimals));
        }

        info!(
            history_rows = history.len(),
            forecast_rows = forecast.len(),
            model = %summary.model,
            "forecast produced"
        );
        Ok((ForecastResult { history, forecast }, summary))
    }

    fn fit(&self, sorted: &[Observation]) -> Result<(FittedModel, FitSummary)> {
        let training = build_training_set(sorted, &self.config.features)?;
        let scaler = StandardScaler::fit(&training.features)?;
        let scaled = scaler.transform(&training.features)?;

        let mut model = self.regressor.create();
        model
            .fit(&scaled, &training.targets)
            .map_err(|e| as_fit_error(model.name(), e))?;

        let summary = FitSummary {
            model: model.name().to_string(),
            schema: training.schema,
            feature_names: training.schema.column_names(),
            history_rows: sorted.len(),
            training_rows: training.len(),
            feature_importances: model.feature_importances().map(<[f64]>::to_vec),
        };
        debug!(
            model = %summary.model,
            training_rows = summary.training_rows,
            "regressor fitted"
        );

        Ok((
            FittedModel {
                schema: training.schema,
                scaler,
                model,
            },
            summary,
        ))
    }

    fn roll_forward(
        &self,
        sorted: &[Observation],
        fitted: &FittedModel,
        extrapolator: &ChannelExtrapolator,
        horizon: usize,
    ) -> Result<ScoreSeries> {
        let last = sorted.last().ok_or(ForecastError::EmptyData)?;
        let n = sorted.len();

        let mut forecast = ScoreSeries::new();
        let mut predicted: Vec<f64> = Vec::new();

        for step in 1..=horizon {
            let t = Duration::try_days(step as i64)
                .and_then(|d| last.t.checked_add_signed(d))
                .ok_or_else(|| ForecastError::InvalidTimestamp {
                    row: n - 1,
                    value: format!("{} plus {} days", last.t, step),
                })?;

            let lags = if fitted.schema.uses_lags() {
                Some(self.step_lags(sorted, extrapolator, &predicted, step)?)
            } else {
                None
            };
            let row = FeatureRow {
                channels: extrapolator.at(step),
                calendar: CalendarFeatures::from_timestamp(&t),
                time_index: n - 1 + step,
                lags,
            };

            let features = row.assemble(fitted.schema)?;
            let scaled = fitted
                .scaler
                .transform_row(&features)
                .map_err(as_assembly_error)?;
            let raw = fitted
                .model
                .predict_row(&scaled)
                .map_err(as_assembly_error)?;
            let score = round_to(
                clamp_to(raw, self.config.lower_bound, self.config.upper_bound),
                self.config.decimals,
            );
            trace!(step, raw, score, "forecast step");

            predicted.push(score);
            forecast.push(t, score);
        }

        Ok(forecast)
    }

    /// Lag inputs for a future step.
    ///
    /// Each lag reads from the history followed by the values of the steps
    /// already produced: predicted scores, and the extrapolated channels.
    /// Channel lag-1 at step `i > 1` is therefore step `i - 1`'s extrapolated
    /// value, never step `i`'s own. Feeding the current step's channel into
    /// `x_lag1` or `x_ma3` would let a lag column see the value it lags.
    fn step_lags(
        &self,
        sorted: &[Observation],
        extrapolator: &ChannelExtrapolator,
        predicted: &[f64],
        step: usize,
    ) -> Result<LagFeatures> {
        let window = self.config.features.moving_average_window;
        let keep = window.max(2);
        let start = sorted.len().saturating_sub(keep);
        let tail = &sorted[start..];

        let mut scores: Vec<f64> = tail.iter().map(|o| o.score).collect();
        scores.extend_from_slice(predicted);

        let earlier_steps = step.saturating_sub(keep).max(1)..step;
        let past_channels: Vec<[f64; 3]> = earlier_steps.map(|s| extrapolator.at(s)).collect();

        let mut channel_lag1 = [0.0; 3];
        let mut channel_ma = [0.0; 3];
        for slot in 0..3 {
            let mut trail: Vec<f64> = tail.iter().map(|o| [o.x, o.y, o.z][slot]).collect();
            trail.extend(past_channels.iter().map(|c| c[slot]));
            channel_lag1[slot] = trail.last().copied().ok_or_else(missing_lag)?;
            channel_ma[slot] = tail_mean(&trail, window).ok_or_else(missing_lag)?;
        }

        let score_lag1 = scores.last().copied().ok_or_else(missing_lag)?;
        let score_lag2 = scores
            .len()
            .checked_sub(2)
            .map(|i| scores[i])
            .ok_or_else(missing_lag)?;
        let score_ma = tail_mean(&scores, window).ok_or_else(missing_lag)?;

        Ok(LagFeatures {
            score_lag1,
            score_lag2,
            channel_lag1,
            score_ma,
            channel_ma,
        })
    }
}

fn missing_lag() -> ForecastError {
    ForecastError::FeatureAssembly("not enough history for lag features".into())
}

fn as_fit_error(model: &str, err: ForecastError) -> ForecastError {
    match err.kind() {
        ErrorKind::ModelFit => err,
        _ => ForecastError::model_fit(model, err.to_string()),
    }
}

fn as_assembly_error(err: ForecastError) -> ForecastError {
    match err.kind() {
        ErrorKind::FeatureAssembly => err,
        _ => ForecastError::FeatureAssembly(err.to_string()),
    }
}
