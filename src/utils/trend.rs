//! First-degree trend fitting against a local index.

use super::stats::mean;

/// Least-squares slope of `series` against the index 0, 1, 2, ...
///
/// Returns `None` for fewer than two points.
pub fn linear_slope(series: &[f64]) -> Option<f64> {
    if series.len() < 2 {
        return None;
    }

    let mean_x = (series.len() as f64 - 1.0) / 2.0;
    let mean_y = mean(series);

    let mut ss_xx = 0.0;
    let mut ss_xy = 0.0;
    for (i, &y) in series.iter().enumerate() {
        let dx = i as f64 - mean_x;
        ss_xx += dx * dx;
        ss_xy += dx * (y - mean_y);
    }

    Some(ss_xy / ss_xx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn exact_line_is_recovered() {
        let slope = linear_slope(&[3.0, 5.0, 7.0, 9.0, 11.0]).unwrap();
        assert_relative_eq!(slope, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn two_points_give_difference() {
        let slope = linear_slope(&[10.0, 4.0]).unwrap();
        assert_relative_eq!(slope, -6.0, epsilon = 1e-12);
    }

    #[test]
    fn noisy_series_matches_least_squares() {
        // polyfit([0,1,2,3], [1,3,2,5], 1) -> slope 1.1
        let slope = linear_slope(&[1.0, 3.0, 2.0, 5.0]).unwrap();
        assert_relative_eq!(slope, 1.1, epsilon = 1e-12);
    }

    #[test]
    fn constant_series_has_zero_slope() {
        let slope = linear_slope(&[7.0; 5]).unwrap();
        assert_relative_eq!(slope, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn too_short_series() {
        assert!(linear_slope(&[]).is_none());
        assert!(linear_slope(&[1.0]).is_none());
    }
}
