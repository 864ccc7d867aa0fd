//! Error types for the quality-forecast library.

use thiserror::Error;

/// Result type alias for forecast operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Coarse classification of a [`ForecastError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller supplied unusable input or configuration.
    Validation,
    /// The regressor could not be fitted.
    ModelFit,
    /// A feature vector could not be built in the training column order.
    FeatureAssembly,
}

/// Errors that can occur while producing a forecast.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Input history is empty.
    #[error("empty input data")]
    EmptyData,

    /// A required observation field is absent.
    #[error("missing required field `{field}` in row {row}")]
    MissingField { field: &'static str, row: usize },

    /// A timestamp could not be parsed or shifted.
    #[error("invalid timestamp in row {row}: {value}")]
    InvalidTimestamp { row: usize, value: String },

    /// Requested horizon is below one step.
    #[error("horizon must be at least 1 day, got {0}")]
    InvalidHorizon(i64),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The regressor failed to fit.
    #[error("model fit failed for {model}: {reason}")]
    ModelFit { model: String, reason: String },

    /// Model has not been fitted yet.
    #[error("model must be fitted before prediction")]
    FitRequired,

    /// Dimension mismatch between data structures.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// A forecast-step feature vector could not be assembled.
    #[error("feature assembly failed: {0}")]
    FeatureAssembly(String),
}

impl ForecastError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ForecastError::EmptyData
            | ForecastError::MissingField { .. }
            | ForecastError::InvalidTimestamp { .. }
            | ForecastError::InvalidHorizon(_)
            | ForecastError::InvalidParameter(_) => ErrorKind::Validation,
            ForecastError::ModelFit { .. } => ErrorKind::ModelFit,
            ForecastError::FitRequired
            | ForecastError::DimensionMismatch { .. }
            | ForecastError::FeatureAssembly(_) => ErrorKind::FeatureAssembly,
        }
    }

    /// Whether the caller's input was rejected.
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    pub(crate) fn model_fit(model: &str, reason: impl Into<String>) -> Self {
        ForecastError::ModelFit {
            model: model.to_string(),
            reason: reason.into(),
        }
    }
}
