//! Ordinary Least Squares (OLS) regression utilities.
//!
//! Used by the polynomial trend and detrending features. Missing
//! observations are skipped when fitting.

use crate::core::is_valid;
use crate::error::{FeatureError, Result};

/// OLS regression coefficients and intercept.
#[derive(Debug, Clone, PartialEq)]
pub struct OLSResult {
    /// Regression coefficients (one per regressor).
    pub coefficients: Vec<f64>,
    /// Intercept term.
    pub intercept: f64,
}

impl OLSResult {
    /// Predict a single observation from its regressor values.
    pub fn predict_one(&self, x: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(x.iter())
                .map(|(b, v)| b * v)
                .sum::<f64>()
    }
}

/// Fit OLS regression: y = intercept + X @ coefficients
///
/// Uses Cholesky decomposition to solve the normal equations. Rows where
/// `y` or any regressor is missing are skipped.
///
/// # Arguments
/// * `y` - Target values (length n)
/// * `regressors` - Regressor columns (each length n)
pub fn ols_fit(y: &[f64], regressors: &[Vec<f64>]) -> Result<OLSResult> {
    let n = y.len();
    let k = regressors.len();

    for values in regressors {
        if values.len() != n {
            return Err(FeatureError::DimensionMismatch {
                expected: n,
                got: values.len(),
            });
        }
    }

    let rows: Vec<usize> = (0..n)
        .filter(|&i| is_valid(y[i]) && regressors.iter().all(|c| is_valid(c[i])))
        .collect();

    let num_params = k + 1;
    if rows.len() < num_params {
        return Err(FeatureError::InsufficientData {
            column: "ols".to_string(),
            needed: num_params,
            got: rows.len(),
        });
    }

    // Design matrix has k+1 columns: [1, x1, x2, ...]
    let mut xtx = vec![vec![0.0; num_params]; num_params];
    let mut xty = vec![0.0; num_params];
    let mut x_full = vec![1.0; num_params];

    for &obs in &rows {
        for j in 0..k {
            x_full[j + 1] = regressors[j][obs];
        }
        for i in 0..num_params {
            for j in 0..num_params {
                xtx[i][j] += x_full[i] * x_full[j];
            }
            xty[i] += x_full[i] * y[obs];
        }
    }

    // Small ridge for numerical stability
    for (i, row) in xtx.iter_mut().enumerate() {
        row[i] += 1e-10;
    }

    let beta = solve_symmetric(&xtx, &xty).ok_or_else(|| {
        FeatureError::ComputationError(
            "OLS regression failed: matrix not positive definite".into(),
        )
    })?;

    Ok(OLSResult {
        intercept: beta[0],
        coefficients: beta[1..].to_vec(),
    })
}

/// Solve symmetric positive definite system using Cholesky decomposition.
///
/// Solves A @ x = b where A is symmetric positive definite.
fn solve_symmetric(a: &[Vec<f64>], b: &[f64]) -> Option<Vec<f64>> {
    let n = b.len();
    if n == 0 || a.len() != n {
        return None;
    }

    // Cholesky decomposition A = L @ L'
    let mut l = vec![vec![0.0; n]; n];

    for i in 0..n {
        for j in 0..=i {
            let mut sum = a[i][j];
            for k in 0..j {
                sum -= l[i][k] * l[j][k];
            }

            if i == j {
                if sum <= 0.0 {
                    return None;
                }
                l[i][j] = sum.sqrt();
            } else {
                l[i][j] = sum / l[j][j];
            }
        }
    }

    // Forward substitution: L @ y = b
    let mut y = vec![0.0; n];
    for i in 0..n {
        let mut sum = b[i];
        for j in 0..i {
            sum -= l[i][j] * y[j];
        }
        y[i] = sum / l[i][i];
    }

    // Backward substitution: L' @ x = y
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = y[i];
        for j in (i + 1)..n {
            sum -= l[j][i] * x[j];
        }
        x[i] = sum / l[i][i];
    }

    Some(x)
}

/// A polynomial in a rescaled time variable, fitted by OLS.
///
/// Time positions are divided by `scale` before raising to powers so the
/// normal equations stay well conditioned for long series.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialFit {
    /// Polynomial degree.
    pub degree: usize,
    /// Divisor applied to positions.
    pub scale: f64,
    /// Underlying OLS fit over the powers `t, t^2, ..., t^degree`.
    pub ols: OLSResult,
}

impl PolynomialFit {
    /// Evaluate the fitted polynomial at a (possibly fractional) position.
    pub fn evaluate(&self, position: f64) -> f64 {
        self.ols.predict_one(&powers(position / self.scale, self.degree))
    }
}

fn powers(t: f64, degree: usize) -> Vec<f64> {
    (1..=degree).map(|p| t.powi(p as i32)).collect()
}

/// Fit a polynomial trend of the given degree against positions `0..n`.
pub fn polyfit(values: &[f64], degree: usize) -> Result<PolynomialFit> {
    let n = values.len();
    let scale = (n.max(2) - 1) as f64;
    let regressors: Vec<Vec<f64>> = (1..=degree)
        .map(|p| {
            (0..n)
                .map(|i| (i as f64 / scale).powi(p as i32))
                .collect()
        })
        .collect();

    let ols = ols_fit(values, &regressors)?;
    Ok(PolynomialFit { degree, scale, ols })
}
