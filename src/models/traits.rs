//! Regressor trait defining the common interface for all score models.

use crate::error::{ForecastError, Result};

/// Common interface for regression models used by the forecast engine.
///
/// A regressor is fitted once on a feature matrix and then answers
/// single-row queries. Output is unconstrained; range clamping is the
/// caller's job.
///
/// This trait is object-safe and can be used with `Box<dyn Regressor>`.
pub trait Regressor: Send + Sync {
    /// Fit the model on row-major features and their targets.
    fn fit(&mut self, features: &[Vec<f64>], targets: &[f64]) -> Result<()>;

    /// Predict the target for a single feature row.
    fn predict_row(&self, row: &[f64]) -> Result<f64>;

    /// Predict targets for many rows.
    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>> {
        rows.iter().map(|r| self.predict_row(r)).collect()
    }

    /// Normalized per-feature importances, if the model tracks them.
    fn feature_importances(&self) -> Option<&[f64]> {
        None
    }

    /// Get the model name.
    fn name(&self) -> &str;

    /// Check if the model has been fitted.
    fn is_fitted(&self) -> bool;
}

/// Type alias for boxed regressor trait objects.
///
/// # Example
///
/// ```
/// use quality_forecast::models::{BoxedRegressor, RandomForestRegressor, Regressor};
///
/// let model: BoxedRegressor = Box::new(RandomForestRegressor::default());
/// assert_eq!(model.name(), "RandomForest");
/// assert!(!model.is_fitted());
/// ```
pub type BoxedRegressor = Box<dyn Regressor>;

/// Named factory producing a fresh, unfitted regressor for every call.
///
/// # Example
///
/// ```
/// use quality_forecast::models::{RegressorSpec, RidgeConfig};
///
/// let spec = RegressorSpec::ridge(RidgeConfig::default());
/// let model = spec.create();
/// assert_eq!(model.name(), spec.name);
/// assert!(!model.is_fitted());
/// ```
pub struct RegressorSpec {
    /// Display name of the model
    pub name: &'static str,
    /// Factory function to create a new instance
    factory: Box<dyn Fn() -> BoxedRegressor + Send + Sync>,
}

impl RegressorSpec {
    /// Create a spec from a factory.
    pub fn new<F>(name: &'static str, factory: F) -> Self
    where
        F: Fn() -> BoxedRegressor + Send + Sync + 'static,
    {
        Self {
            name,
            factory: Box::new(factory),
        }
    }

    /// Random forest with the given configuration.
    pub fn random_forest(config: super::ForestConfig) -> Self {
        Self::new("RandomForest", move || {
            Box::new(super::RandomForestRegressor::new(config.clone()))
        })
    }

    /// Single regression tree with the given configuration.
    pub fn decision_tree(config: super::TreeConfig) -> Self {
        Self::new("DecisionTree", move || {
            Box::new(super::DecisionTreeRegressor::new(config.clone()))
        })
    }

    /// Ridge regression with the given configuration.
    pub fn ridge(config: super::RidgeConfig) -> Self {
        Self::new("Ridge", move || Box::new(super::RidgeRegressor::new(config.clone())))
    }

    /// Create a new model instance.
    pub fn create(&self) -> BoxedRegressor {
        (self.factory)()
    }
}

impl Default for RegressorSpec {
    fn default() -> Self {
        Self::random_forest(super::ForestConfig::default())
    }
}

impl std::fmt::Debug for RegressorSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegressorSpec")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Check a training set before fitting and return its feature width.
pub(crate) fn check_training_set(
    model: &str,
    features: &[Vec<f64>],
    targets: &[f64],
) -> Result<usize> {
    if features.is_empty() {
        return Err(ForecastError::model_fit(model, "no training rows"));
    }
    if features.len() != targets.len() {
        return Err(ForecastError::model_fit(
            model,
            format!(
                "{} feature rows but {} targets",
                features.len(),
                targets.len()
            ),
        ));
    }
    let width = features[0].len();
    if width == 0 {
        return Err(ForecastError::model_fit(model, "feature rows are empty"));
    }
    for (i, row) in features.iter().enumerate() {
        if row.len() != width {
            return Err(ForecastError::model_fit(
                model,
                format!("row {} has {} features, expected {}", i, row.len(), width),
            ));
        }
        if row.iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::model_fit(
                model,
                format!("row {} contains non-finite features", i),
            ));
        }
    }
    if let Some(i) = targets.iter().position(|v| !v.is_finite()) {
        return Err(ForecastError::model_fit(
            model,
            format!("target {} is not finite", i),
        ));
    }
    Ok(width)
}

/// Check a query row against the fitted width.
pub(crate) fn check_query_row(expected: usize, row: &[f64]) -> Result<()> {
    if row.len() != expected {
        return Err(ForecastError::DimensionMismatch {
            expected,
            got: row.len(),
        });
    }
    Ok(())
}
