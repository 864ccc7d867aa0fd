//! Statistical utility functions.

/// Calculate the mean of a slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Calculate the population variance of a slice.
pub fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}

/// Round half away from zero to the given number of decimals.
///
/// # Example
/// ```
/// use quality_forecast::utils::round_to;
///
/// assert_eq!(round_to(41.236, 2), 41.24);
/// assert_eq!(round_to(-0.125, 1), -0.1);
/// ```
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Clamp into `[lower, upper]`, mapping NaN to `lower`.
pub fn clamp_to(value: f64, lower: f64, upper: f64) -> f64 {
    if value.is_nan() {
        return lower;
    }
    value.max(lower).min(upper)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn mean_and_variance() {
        assert_relative_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), 2.5);
        assert_relative_eq!(population_variance(&[1.0, 2.0, 3.0, 4.0]), 1.25);
        assert!(mean(&[]).is_nan());
        assert!(population_variance(&[]).is_nan());
    }

    #[test]
    fn round_to_two_decimals() {
        assert_eq!(round_to(12.345_678, 2), 12.35);
        assert_eq!(round_to(99.994, 2), 99.99);
        assert_eq!(round_to(50.0, 2), 50.0);
        assert_eq!(round_to(7.5, 0), 8.0);
    }

    #[test]
    fn clamp_handles_bounds_and_nan() {
        assert_eq!(clamp_to(120.0, 0.0, 100.0), 100.0);
        assert_eq!(clamp_to(-3.0, 0.0, 100.0), 0.0);
        assert_eq!(clamp_to(55.5, 0.0, 100.0), 55.5);
        assert_eq!(clamp_to(f64::NAN, 0.0, 100.0), 0.0);
    }
}
