//! Column-wise standardization of feature matrices.

use crate::error::{ForecastError, Result};
use crate::utils::{mean, population_variance};

/// Per-column z-score scaler.
///
/// x_scaled = (x - mean) / std
///
/// Uses the population standard deviation. Columns with (near) zero spread
/// keep a scale of 1 so they map to 0 instead of dividing by zero.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    /// Column means
    center: Vec<f64>,
    /// Column standard deviations (1.0 for constant columns)
    scale: Vec<f64>,
}

impl StandardScaler {
    /// Fit the scaler on row-major data.
    pub fn fit(rows: &[Vec<f64>]) -> Result<Self> {
        let first = rows.first().ok_or(ForecastError::EmptyData)?;
        let width = first.len();
        for row in rows {
            if row.len() != width {
                return Err(ForecastError::DimensionMismatch {
                    expected: width,
                    got: row.len(),
                });
            }
        }

        let mut center = vec![0.0; width];
        let mut scale = vec![1.0; width];

        for col in 0..width {
            let column: Vec<f64> = rows.iter().map(|r| r[col]).collect();
            let std = population_variance(&column).sqrt();
            center[col] = mean(&column);
            scale[col] = if std < 1e-10 { 1.0 } else { std };
        }

        Ok(Self { center, scale })
    }

    /// Number of columns the scaler was fitted on.
    pub fn width(&self) -> usize {
        self.center.len()
    }

    pub fn means(&self) -> &[f64] {
        &self.center
    }

    pub fn scales(&self) -> &[f64] {
        &self.scale
    }

    /// Transform a single row using the fitted parameters.
    pub fn transform_row(&self, row: &[f64]) -> Result<Vec<f64>> {
        if row.len() != self.width() {
            return Err(ForecastError::DimensionMismatch {
                expected: self.width(),
                got: row.len(),
            });
        }
        Ok(row
            .iter()
            .zip(self.center.iter().zip(&self.scale))
            .map(|(&x, (&c, &s))| (x - c) / s)
            .collect())
    }

    /// Transform many rows.
    pub fn transform(&self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        rows.iter().map(|r| self.transform_row(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn matrix() -> Vec<Vec<f64>> {
        vec![
            vec![1.0, 10.0, 7.0],
            vec![2.0, 20.0, 7.0],
            vec![3.0, 30.0, 7.0],
            vec![4.0, 40.0, 7.0],
            vec![5.0, 50.0, 7.0],
        ]
    }

    #[test]
    fn fit_uses_population_std() {
        let scaler = StandardScaler::fit(&matrix()).unwrap();

        assert_relative_eq!(scaler.means()[0], 3.0, epsilon = 1e-10);
        assert_relative_eq!(scaler.scales()[0], 2.0_f64.sqrt(), epsilon = 1e-10);
        assert_relative_eq!(scaler.means()[1], 30.0, epsilon = 1e-10);
        assert_relative_eq!(scaler.scales()[1], 200.0_f64.sqrt(), epsilon = 1e-10);
    }

    #[test]
    fn transformed_columns_have_zero_mean_unit_variance() {
        let data = matrix();
        let scaler = StandardScaler::fit(&data).unwrap();
        let scaled = scaler.transform(&data).unwrap();

        for col in 0..2 {
            let values: Vec<f64> = scaled.iter().map(|r| r[col]).collect();
            let mean = values.iter().sum::<f64>() / values.len() as f64;
            let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
            assert_relative_eq!(mean, 0.0, epsilon = 1e-10);
            assert_relative_eq!(var, 1.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn constant_column_maps_to_zero() {
        let scaler = StandardScaler::fit(&matrix()).unwrap();
        assert_relative_eq!(scaler.scales()[2], 1.0, epsilon = 1e-10);

        let row = scaler.transform_row(&[3.0, 30.0, 7.0]).unwrap();
        assert_relative_eq!(row[2], 0.0, epsilon = 1e-10);

        // Unseen values are shifted but not rescaled
        let row = scaler.transform_row(&[3.0, 30.0, 9.0]).unwrap();
        assert_relative_eq!(row[2], 2.0, epsilon = 1e-10);
    }


    #[test]
    fn single_row_fit_is_identity_shift() {
        let scaler = StandardScaler::fit(&[vec![4.0, -1.0]]).unwrap();
        let row = scaler.transform_row(&[5.0, -1.0]).unwrap();
        assert_relative_eq!(row[0], 1.0, epsilon = 1e-10);
        assert_relative_eq!(row[1], 0.0, epsilon = 1e-10);
    }

    #[test]
    fn rejects_empty_and_ragged_input() {
        assert_eq!(StandardScaler::fit(&[]), Err(ForecastError::EmptyData));
        assert!(matches!(
            StandardScaler::fit(&[vec![1.0, 2.0], vec![1.0]]),
            Err(ForecastError::DimensionMismatch { expected: 2, got: 1 })
        ));

        let scaler = StandardScaler::fit(&matrix()).unwrap();
        assert!(matches!(
            scaler.transform_row(&[1.0]),
            Err(ForecastError::DimensionMismatch { expected: 3, got: 1 })
        ));
    }
}
