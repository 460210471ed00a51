//! Parametric trend forecaster fitted by direct loss minimisation.

use tracing::{debug, warn};

use crate::core::{is_valid, TimeFrame};
use crate::error::{FeatureError, Result};
use crate::utils::{mean_squared_error, nelder_mead, LossFn, NelderMeadConfig};

/// Number of Nelder-Mead runs, each restarted from the previous optimum.
const RESTARTS: usize = 3;

/// Trend families supported by [`TrendForecaster`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    /// `w_0 + w_1 t + ... + w_d t^d`, one parameter per power.
    Polynomial,
    /// `w_0 * exp(w_1 t)`, exactly two parameters.
    Exponential,
}

impl Trend {
    /// Evaluate the trend at time `t`.
    pub fn evaluate(&self, t: f64, params: &[f64]) -> f64 {
        match self {
            Trend::Polynomial => params.iter().rev().fold(0.0, |acc, &w| acc * t + w),
            Trend::Exponential => params[0] * (params[1] * t).exp(),
        }
    }

    fn check_params(&self, params: &[f64]) -> Result<()> {
        let ok = match self {
            Trend::Polynomial => !params.is_empty(),
            Trend::Exponential => params.len() == 2,
        };
        if ok {
            Ok(())
        } else {
            Err(FeatureError::InvalidConfiguration(format!(
                "{:?} trend cannot use {} parameters",
                self,
                params.len()
            )))
        }
    }
}

/// Forecasts a single series by extrapolating a fitted trend.
///
/// # Example
/// ```
/// use anofox_tsfeatures::core::TimeFrameBuilder;
/// use anofox_tsfeatures::forecasting::{Trend, TrendForecaster};
///
/// let frame = TimeFrameBuilder::new()
///     .column("value", (0..30).map(|t| 1.0 + 2.0 * t as f64).collect())
///     .build()
///     .unwrap();
///
/// let mut model = TrendForecaster::new(Trend::Polynomial, vec![0.0, 0.0]);
/// model.fit(&frame).unwrap();
///
/// let ahead = model.predict_ahead(2).unwrap();
/// assert!((ahead[0] - 61.0).abs() < 1e-2);
/// assert!((ahead[1] - 63.0).abs() < 1e-2);
/// ```
#[derive(Debug, Clone)]
pub struct TrendForecaster {
    trend: Trend,
    init: Vec<f64>,
    loss: LossFn,
    optimizer: NelderMeadConfig,
    params: Option<Vec<f64>>,
    n_obs: usize,
}

impl TrendForecaster {
    /// Create a forecaster starting the search from `init`.
    pub fn new(trend: Trend, init: Vec<f64>) -> Self {
        Self {
            trend,
            init,
            loss: mean_squared_error,
            optimizer: NelderMeadConfig::default()
                .with_max_iter(5000)
                .with_tolerance(1e-14),
            params: None,
            n_obs: 0,
        }
    }

    /// Set the loss minimised during `fit` (default: mean squared error).
    pub fn with_loss(mut self, loss: LossFn) -> Self {
        self.loss = loss;
        self
    }

    /// Set the optimizer configuration.
    pub fn with_optimizer(mut self, optimizer: NelderMeadConfig) -> Self {
        self.optimizer = optimizer;
        self
    }

    pub fn trend(&self) -> Trend {
        self.trend
    }

    /// Fitted parameters, if `fit` has run.
    pub fn params(&self) -> Option<&[f64]> {
        self.params.as_deref()
    }

    pub fn is_fitted(&self) -> bool {
        self.params.is_some()
    }

    /// Fit the trend to the first column of `frame` over `t = 0..n`.
    ///
    /// Missing observations are ignored by the loss.
    pub fn fit(&mut self, frame: &TimeFrame) -> Result<&mut Self> {
        self.trend.check_params(&self.init)?;
        let values = frame.column_at(0).ok_or(FeatureError::EmptyData)?;
        if values.is_empty() {
            return Err(FeatureError::EmptyData);
        }
        let n_valid = values.iter().filter(|&&v| is_valid(v)).count();
        if n_valid == 0 {
            return Err(FeatureError::InsufficientData {
                column: frame.column_names()[0].clone(),
                needed: 1,
                got: 0,
            });
        }

        let trend = self.trend;
        let loss = self.loss;
        let objective = |params: &[f64]| {
            let fitted: Vec<f64> = (0..values.len())
                .map(|t| trend.evaluate(t as f64, params))
                .collect();
            if fitted.iter().any(|v| !v.is_finite()) {
                return f64::INFINITY;
            }
            loss(values, &fitted)
        };

        let mut best = self.init.clone();
        let mut best_value = objective(&best);
        for run in 0..RESTARTS {
            let result = nelder_mead(&objective, &best, &self.optimizer);
            debug!(
                run,
                iterations = result.iterations,
                loss = result.optimal_value,
                converged = result.converged,
                "trend optimisation"
            );
            let improved = best_value - result.optimal_value;
            if result.optimal_value <= best_value {
                best = result.optimal_point;
                best_value = result.optimal_value;
            }
            if improved.abs() <= self.optimizer.tolerance {
                break;
            }
        }

        if !best_value.is_finite() {
            warn!(trend = ?self.trend, "trend loss is not finite at the optimum");
        }

        self.params = Some(best);
        self.n_obs = values.len();
        Ok(self)
    }

    /// Evaluate the fitted trend at arbitrary times.
    pub fn predict(&self, times: &[f64]) -> Result<Vec<f64>> {
        let params = self.params.as_deref().ok_or(FeatureError::NotFitted)?;
        Ok(times
            .iter()
            .map(|&t| self.trend.evaluate(t, params))
            .collect())
    }

    /// Forecast the `horizon` positions following the fitted sample.
    pub fn predict_ahead(&self, horizon: usize) -> Result<Vec<f64>> {
        let times: Vec<f64> = (self.n_obs..self.n_obs + horizon)
            .map(|t| t as f64)
            .collect();
        self.predict(&times)
    }

    /// In-sample fitted values at `t = 0..n`.
    pub fn fitted_values(&self) -> Result<Vec<f64>> {
        let times: Vec<f64> = (0..self.n_obs).map(|t| t as f64).collect();
        self.predict(&times)
    }
}
