//! Ridge regression solved through the normal equations.

use super::traits::{check_query_row, check_training_set, Regressor};
use crate::error::{ForecastError, Result};
use crate::utils::solve_symmetric;
use serde::{Deserialize, Serialize};

/// Ridge regression configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RidgeConfig {
    /// L2 penalty added to the coefficient diagonal (not the intercept).
    pub alpha: f64,
}

impl Default for RidgeConfig {
    fn default() -> Self {
        Self { alpha: 1e-3 }
    }
}

impl RidgeConfig {
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }
}

/// Linear model y = intercept + X @ coefficients with an L2 penalty.
///
/// With `alpha == 0` this is ordinary least squares, and a rank-deficient
/// design fails to fit.
#[derive(Debug, Clone, Default)]
pub struct RidgeRegressor {
    config: RidgeConfig,
    coefficients: Option<Vec<f64>>,
    intercept: f64,
}

impl RidgeRegressor {
    pub fn new(config: RidgeConfig) -> Self {
        Self {
            config,
            coefficients: None,
            intercept: 0.0,
        }
    }

    pub fn coefficients(&self) -> Option<&[f64]> {
        self.coefficients.as_deref()
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

impl Regressor for RidgeRegressor {
    fn fit(&mut self, features: &[Vec<f64>], targets: &[f64]) -> Result<()> {
        let k = check_training_set(self.name(), features, targets)?;
        if !(self.config.alpha >= 0.0) || !self.config.alpha.is_finite() {
            return Err(ForecastError::model_fit(
                self.name(),
                format!("alpha must be finite and non-negative, got {}", self.config.alpha),
            ));
        }

        // Design matrix has k+1 columns: [1, x1, x2, ...]
        let num_params = k + 1;
        let mut xtx = vec![vec![0.0; num_params]; num_params];
        let mut xty = vec![0.0; num_params];

        for (row, &y) in features.iter().zip(targets) {
            xtx[0][0] += 1.0;
            xty[0] += y;
            for j in 0..k {
                xtx[0][j + 1] += row[j];
                xtx[j + 1][0] += row[j];
                xty[j + 1] += row[j] * y;
                for i in 0..k {
                    xtx[i + 1][j + 1] += row[i] * row[j];
                }
            }
        }

        for i in 1..num_params {
            xtx[i][i] += self.config.alpha;
        }

        let beta = solve_symmetric(&xtx, &xty).ok_or_else(|| {
            ForecastError::model_fit(self.name(), "normal equations are not positive definite")
        })?;

        self.intercept = beta[0];
        self.coefficients = Some(beta[1..].to_vec());
        Ok(())
    }

    fn predict_row(&self, row: &[f64]) -> Result<f64> {
        let coefficients = self.coefficients.as_ref().ok_or(ForecastError::FitRequired)?;
        check_query_row(coefficients.len(), row)?;
        Ok(self.intercept + coefficients.iter().zip(row).map(|(c, x)| c * x).sum::<f64>())
    }

    fn name(&self) -> &str {
        "Ridge"
    }

    fn is_fitted(&self) -> bool {
        self.coefficients.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use approx::assert_relative_eq;

    #[test]
    fn ols_recovers_exact_plane() {
        // y = 1 + 2*x1 + 3*x2
        let x = vec![
            vec![1.0, 0.5],
            vec![2.0, 1.5],
            vec![3.0, 1.0],
            vec![4.0, 3.0],
            vec![5.0, 2.0],
        ];
        let y: Vec<f64> = x.iter().map(|r| 1.0 + 2.0 * r[0] + 3.0 * r[1]).collect();

        let mut model = RidgeRegressor::new(RidgeConfig::default().with_alpha(0.0));
        model.fit(&x, &y).unwrap();

        assert_relative_eq!(model.intercept(), 1.0, epsilon = 1e-6);
        let coef = model.coefficients().unwrap();
        assert_relative_eq!(coef[0], 2.0, epsilon = 1e-6);
        assert_relative_eq!(coef[1], 3.0, epsilon = 1e-6);
        assert_relative_eq!(model.predict_row(&[10.0, 10.0]).unwrap(), 51.0, epsilon = 1e-5);
    }

    #[test]
    fn penalty_shrinks_coefficients() {
        let x: Vec<Vec<f64>> = (0..10).map(|i| vec![i as f64]).collect();
        let y: Vec<f64> = (0..10).map(|i| 4.0 * i as f64).collect();

        let mut ols = RidgeRegressor::new(RidgeConfig::default().with_alpha(0.0));
        let mut ridge = RidgeRegressor::new(RidgeConfig::default().with_alpha(50.0));
        ols.fit(&x, &y).unwrap();
        ridge.fit(&x, &y).unwrap();

        assert!(ridge.coefficients().unwrap()[0] < ols.coefficients().unwrap()[0]);
    }

    #[test]
    fn zero_column_without_penalty_fails_to_fit() {
        let x: Vec<Vec<f64>> = (0..6).map(|i| vec![i as f64, 0.0]).collect();
        let y: Vec<f64> = (0..6).map(|i| i as f64).collect();

        let mut ols = RidgeRegressor::new(RidgeConfig::default().with_alpha(0.0));
        let err = ols.fit(&x, &y).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ModelFit);
        assert!(!ols.is_fitted());

        let mut ridge = RidgeRegressor::default();
        assert!(ridge.fit(&x, &y).is_ok());
    }

    #[test]
    fn negative_alpha_is_rejected() {
        let mut model = RidgeRegressor::new(RidgeConfig::default().with_alpha(-1.0));
        let err = model.fit(&[vec![1.0]], &[1.0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ModelFit);
    }

    #[test]
    fn predict_before_fit_fails() {
        let model = RidgeRegressor::default();
        assert_eq!(model.predict_row(&[1.0]), Err(ForecastError::FitRequired));
    }
}
