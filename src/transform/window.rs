//! Shift and rolling window functions.
//!
//! All functions return a vector of the input length, with `NaN` where
//! the window or shift reaches outside the series.

/// Shift a series by `periods` positions.
///
/// A positive shift moves values forward in time (`out[i] = x[i - periods]`,
/// leading positions missing). A negative shift moves them backward
/// (`out[i] = x[i + |periods|]`, trailing positions missing).
///
/// # Example
/// ```
/// use anofox_tsfeatures::transform::shift;
///
/// let lagged = shift(&[1.0, 2.0, 3.0], 1);
/// assert!(lagged[0].is_nan());
/// assert_eq!(&lagged[1..], &[1.0, 2.0]);
/// ```
pub fn shift(series: &[f64], periods: isize) -> Vec<f64> {
    let n = series.len();
    let mut result = vec![f64::NAN; n];
    let k = periods.unsigned_abs();
    if k >= n {
        return result;
    }

    if periods >= 0 {
        result[k..].copy_from_slice(&series[..n - k]);
    } else {
        result[..n - k].copy_from_slice(&series[k..]);
    }
    result
}

/// Shift a series backward by `lag` positions (`out[i] = x[i + lag]`).
pub fn lead(series: &[f64], lag: usize) -> Vec<f64> {
    shift(series, -(lag.min(isize::MAX as usize) as isize))
}

/// Compute rolling mean (moving average).
///
/// # Arguments
/// * `series` - Input time series
/// * `window` - Window size
/// * `center` - If true, center the window (default: false, trailing window)
pub fn rolling_mean(series: &[f64], window: usize, center: bool) -> Vec<f64> {
    rolling_apply(series, window, center, |s| {
        s.iter().sum::<f64>() / s.len() as f64
    })
}

/// Compute rolling variance.
pub fn rolling_var(series: &[f64], window: usize, center: bool) -> Vec<f64> {
    if window < 2 {
        return vec![f64::NAN; series.len()];
    }
    rolling_apply(series, window, center, |s| {
        if s.len() < 2 {
            return f64::NAN;
        }
        let mean = s.iter().sum::<f64>() / s.len() as f64;
        s.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (s.len() - 1) as f64
    })
}

/// Compute rolling standard deviation.
pub fn rolling_std(series: &[f64], window: usize, center: bool) -> Vec<f64> {
    rolling_var(series, window, center)
        .iter()
        .map(|v| v.sqrt())
        .collect()
}

/// Generic rolling window application.
fn rolling_apply<F>(series: &[f64], window: usize, center: bool, f: F) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    if series.is_empty() || window == 0 {
        return vec![f64::NAN; series.len()];
    }

    let n = series.len();
    let mut result = vec![f64::NAN; n];

    for i in 0..n {
        let (start, end) = if center {
            let half = window / 2;
            let start = i.saturating_sub(half);
            let end = (i + window - half).min(n);
            (start, end)
        } else {
            if i + 1 < window {
                continue;
            }
            (i + 1 - window, i + 1)
        };

        if end > start {
            result[i] = f(&series[start..end]);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ==================== shift ====================

    #[test]
    fn shift_forward() {
        let out = shift(&[1.0, 2.0, 3.0, 4.0], 2);
        assert!(out[0].is_nan() && out[1].is_nan());
        assert_eq!(&out[2..], &[1.0, 2.0]);
    }

    #[test]
    fn shift_backward() {
        let out = shift(&[1.0, 2.0, 3.0, 4.0], -1);
        assert_eq!(&out[..3], &[2.0, 3.0, 4.0]);
        assert!(out[3].is_nan());
    }

    #[test]
    fn shift_zero_is_identity() {
        assert_eq!(shift(&[1.0, 2.0], 0), vec![1.0, 2.0]);
    }

    #[test]
    fn shift_beyond_length() {
        assert!(shift(&[1.0, 2.0], 5).iter().all(|v| v.is_nan()));
        assert!(shift(&[1.0, 2.0], -2).iter().all(|v| v.is_nan()));
        assert!(shift(&[], 1).is_empty());
    }

    #[test]
    fn lead_matches_negative_shift() {
        let series = [5.0, 6.0, 7.0, 8.0, 9.0];
        let a = lead(&series, 2);
        let b = shift(&series, -2);
        assert_eq!(&a[..3], &b[..3]);
        assert_eq!(&a[..3], &[7.0, 8.0, 9.0]);
    }

    // ==================== rolling ====================

    #[test]
    fn rolling_mean_basic() {
        let series = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = rolling_mean(&series, 3, false);

        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert_relative_eq!(result[2], 2.0, epsilon = 1e-10);
        assert_relative_eq!(result[3], 3.0, epsilon = 1e-10);
        assert_relative_eq!(result[4], 4.0, epsilon = 1e-10);
    }

    #[test]
    fn rolling_mean_window_1() {
        let series = vec![1.0, 2.0, 3.0];
        assert_eq!(rolling_mean(&series, 1, false), series);
    }

    #[test]
    fn rolling_mean_empty() {
        assert!(rolling_mean(&[], 3, false).is_empty());
        assert!(rolling_mean(&[1.0, 2.0], 0, false).iter().all(|v| v.is_nan()));
    }

    #[test]
    fn rolling_mean_centered() {
        let series = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = rolling_mean(&series, 3, true);
        assert_relative_eq!(result[1], 2.0, epsilon = 1e-10);
        assert_relative_eq!(result[2], 3.0, epsilon = 1e-10);
    }

    #[test]
    fn rolling_mean_propagates_missing() {
        let series = vec![1.0, f64::NAN, 3.0, 4.0, 5.0];
        let result = rolling_mean(&series, 2, false);
        assert!(result[1].is_nan());
        assert!(result[2].is_nan());
        assert_relative_eq!(result[3], 3.5, epsilon = 1e-10);
    }

    #[test]
    fn rolling_std_basic() {
        let series = vec![2.0, 4.0, 4.0, 4.0, 5.0];
        let result = rolling_std(&series, 2, false);
        assert!(result[0].is_nan());
        assert_relative_eq!(result[1], 2.0_f64.sqrt(), epsilon = 1e-10);
        assert_relative_eq!(result[2], 0.0, epsilon = 1e-10);
    }

    #[test]
    fn rolling_var_window_too_small() {
        assert!(rolling_var(&[1.0, 2.0, 3.0], 1, false)
            .iter()
            .all(|v| v.is_nan()));
    }
}
