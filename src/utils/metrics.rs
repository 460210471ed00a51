//! Loss functions for fitting and evaluating trend models.
//!
//! Pairs where either side is missing are ignored. All functions return
//! `NaN` when no valid pair remains.

use crate::utils::stats::valid_pairs;

/// A loss over `(actual, predicted)` slices, lower is better.
pub type LossFn = fn(&[f64], &[f64]) -> f64;

/// Mean squared error.
pub fn mean_squared_error(actual: &[f64], predicted: &[f64]) -> f64 {
    let (a, p) = valid_pairs(actual, predicted);
    if a.is_empty() {
        return f64::NAN;
    }
    a.iter().zip(p.iter()).map(|(x, y)| (x - y).powi(2)).sum::<f64>() / a.len() as f64
}

/// Root mean squared error.
pub fn root_mean_squared_error(actual: &[f64], predicted: &[f64]) -> f64 {
    mean_squared_error(actual, predicted).sqrt()
}

/// Mean absolute error.
pub fn mean_absolute_error(actual: &[f64], predicted: &[f64]) -> f64 {
    let (a, p) = valid_pairs(actual, predicted);
    if a.is_empty() {
        return f64::NAN;
    }
    a.iter().zip(p.iter()).map(|(x, y)| (x - y).abs()).sum::<f64>() / a.len() as f64
}
