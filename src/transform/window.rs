//! Lag and trailing-window functions.
//!
//! Missing positions are reported as `NaN`.

/// Shift a series forward by `periods`, filling the head with `NaN`.
///
/// `shift(&[1, 2, 3], 1) == [NaN, 1, 2]`
pub fn shift(series: &[f64], periods: usize) -> Vec<f64> {
    let n = series.len();
    let mut result = vec![f64::NAN; n];
    for i in periods..n {
        result[i] = series[i - periods];
    }
    result
}

/// Compute a trailing rolling mean.
///
/// Each position averages up to `window` values ending at (and including)
/// that position. Positions that see fewer than `min_periods` values are
/// `NaN`, so `min_periods == 1` lets early rows use a shorter window.
pub fn rolling_mean(series: &[f64], window: usize, min_periods: usize) -> Vec<f64> {
    if series.is_empty() || window == 0 {
        return vec![f64::NAN; series.len()];
    }

    let n = series.len();
    let mut result = vec![f64::NAN; n];

    for i in 0..n {
        let start = (i + 1).saturating_sub(window);
        let count = i + 1 - start;
        if count < min_periods.max(1) {
            continue;
        }
        let sum: f64 = series[start..=i].iter().sum();
        result[i] = sum / count as f64;
    }

    result
}

/// Mean of the last `window` values (fewer if the series is shorter).
///
/// Returns `None` for an empty series.
pub fn tail_mean(series: &[f64], window: usize) -> Option<f64> {
    if series.is_empty() || window == 0 {
        return None;
    }
    let start = series.len().saturating_sub(window);
    let tail = &series[start..];
    Some(tail.iter().sum::<f64>() / tail.len() as f64)
}
