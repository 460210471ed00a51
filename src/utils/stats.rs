//! Statistical utility functions.
//!
//! Correlation statistics here operate on clean, equal-length slices.
//! Use [`valid_pairs`] to drop missing observations pairwise first.

use crate::core::is_valid;
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Variance below this fraction of the raw sum of squares is treated as zero.
const DEGENERATE_TOL: f64 = 1e-24;

/// A correlation statistic over two clean, equal-length slices.
pub type CorrelationFn = fn(&[f64], &[f64]) -> f64;

/// Calculate the mean of a slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Calculate the variance of a slice (sample variance with n-1 denominator).
pub fn variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|x| (x - m).powi(2)).sum();
    sum_sq / (values.len() - 1) as f64
}

/// Calculate the standard deviation of a slice.
pub fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

/// Keep only positions where both `x` and `y` hold a valid value.
///
/// Slices of different lengths are compared over their common prefix.
pub fn valid_pairs(x: &[f64], y: &[f64]) -> (Vec<f64>, Vec<f64>) {
    x.iter()
        .zip(y.iter())
        .filter(|(&a, &b)| is_valid(a) && is_valid(b))
        .map(|(&a, &b)| (a, b))
        .unzip()
}

/// Pearson product-moment correlation.
///
/// Returns `NaN` when the slices differ in length, hold fewer than two
/// observations, or either side has zero variance.
///
/// # Example
/// ```
/// use anofox_tsfeatures::utils::stats::pearson;
///
/// let x = [1.0, 2.0, 3.0, 4.0];
/// let y = [2.0, 4.0, 6.0, 8.0];
/// assert!((pearson(&x, &y) - 1.0).abs() < 1e-12);
/// ```
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len();
    if n != y.len() || n < 2 {
        return f64::NAN;
    }

    let mx = mean(x);
    let my = mean(y);

    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut sxy = 0.0;
    let mut raw_xx = 0.0;
    let mut raw_yy = 0.0;

    for (&a, &b) in x.iter().zip(y.iter()) {
        let dx = a - mx;
        let dy = b - my;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
        raw_xx += a * a;
        raw_yy += b * b;
    }

    if sxx <= DEGENERATE_TOL * raw_xx || syy <= DEGENERATE_TOL * raw_yy {
        return f64::NAN;
    }

    (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
}

/// Spearman rank correlation (Pearson correlation of average ranks).
pub fn spearman(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.len() < 2 {
        return f64::NAN;
    }
    pearson(&ranks(x), &ranks(y))
}

/// 1-based ranks, ties receive the average of the ranks they span.
fn ranks(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        values[a]
            .partial_cmp(&values[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut result = vec![0.0; n];
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && values[order[j + 1]] == values[order[i]] {
            j += 1;
        }
        let avg_rank = (i + j) as f64 / 2.0 + 1.0;
        for &idx in &order[i..=j] {
            result[idx] = avg_rank;
        }
        i = j + 1;
    }
    result
}

/// Two-sided p-value of a correlation coefficient under H0: rho = 0.
///
/// Uses the Student t statistic `r * sqrt((n - 2) / (1 - r^2))` with
/// `n - 2` degrees of freedom. Exact for Pearson on normal data,
/// approximate otherwise.
pub fn correlation_t_test(r: f64, n: usize) -> f64 {
    if r.is_nan() || n <= 2 {
        return f64::NAN;
    }
    if r.abs() >= 1.0 {
        return 0.0;
    }

    let df = (n - 2) as f64;
    let t = r * (df / (1.0 - r * r)).sqrt();

    match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => (2.0 * (1.0 - dist.cdf(t.abs()))).clamp(0.0, 1.0),
        Err(_) => f64::NAN,
    }
}
