//! Shifted-correlation lag selection.
//!
//! For every column of a frame, searches the lag in `[min_shift, max_shift]`
//! whose backward-shifted series correlates most strongly (in absolute
//! value) with a target column, and optionally tests that correlation with
//! a bootstrap null distribution.

use super::tables::{BestShiftsTable, PValuesTable, ShiftRecord};
use crate::core::TimeFrame;
use crate::error::{FeatureError, Result};
use crate::transform::lead;
use crate::utils::bootstrap::{bootstrap_p_value, BootstrapConfig};
use crate::utils::stats::{correlation_t_test, pearson, valid_pairs, CorrelationFn};
use tracing::{debug, info, warn};

/// Configuration for [`ShiftedCorrelation`].
#[derive(Debug, Clone)]
pub struct ShiftedCorrelationConfig {
    /// Column every other column is correlated against.
    pub target_col: String,
    /// Smallest lag tested (default: 1).
    pub min_shift: usize,
    /// Largest lag tested.
    pub max_shift: usize,
    /// Correlation statistic (default: Pearson).
    pub correlation: CorrelationFn,
    /// Significance testing (disabled by default).
    pub bootstrap: BootstrapConfig,
}

impl ShiftedCorrelationConfig {
    /// Create a config searching lags `1..=max_shift` against `target_col`.
    pub fn new(target_col: impl Into<String>, max_shift: usize) -> Self {
        Self {
            target_col: target_col.into(),
            min_shift: 1,
            max_shift,
            correlation: pearson,
            bootstrap: BootstrapConfig::default(),
        }
    }

    /// Set the smallest lag tested.
    pub fn with_min_shift(mut self, min_shift: usize) -> Self {
        self.min_shift = min_shift;
        self
    }

    /// Use a different correlation statistic.
    pub fn with_correlation(mut self, correlation: CorrelationFn) -> Self {
        self.correlation = correlation;
        self
    }

    /// Enable bootstrap p-values with `iterations` resamples of `samples` draws.
    pub fn with_bootstrap(mut self, iterations: usize, samples: usize) -> Self {
        self.bootstrap.iterations = iterations;
        self.bootstrap.samples = samples;
        self
    }

    /// Seed the bootstrap random source.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.bootstrap.seed = Some(seed);
        self
    }

    /// Check shift bounds and bootstrap sizes.
    pub fn validate(&self) -> Result<()> {
        if self.min_shift == 0 || self.max_shift == 0 {
            return Err(FeatureError::InvalidConfiguration(format!(
                "shift bounds must be positive, got [{}, {}]",
                self.min_shift, self.max_shift
            )));
        }
        if self.min_shift > self.max_shift {
            return Err(FeatureError::InvalidConfiguration(format!(
                "min_shift ({}) must be <= max_shift ({})",
                self.min_shift, self.max_shift
            )));
        }
        if self.bootstrap.is_enabled() && self.bootstrap.samples == 0 {
            return Err(FeatureError::InvalidConfiguration(
                "bootstrap samples must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Fitted state of a [`ShiftedCorrelation`] estimator.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FitState {
    #[default]
    Unfitted,
    Fitted {
        best_shifts: BestShiftsTable,
        p_values: Option<PValuesTable>,
    },
}

/// Best lag found for one (reference, candidate) pair.
#[derive(Debug, Clone)]
struct LagSearch {
    correlations: Vec<f64>,
    best: Option<(usize, f64, usize)>,
    max_pairs: usize,
}

/// Correlation of `candidate` shifted backward by every lag against `reference`.
///
/// Lags with fewer than two valid pairs or an undefined statistic are
/// skipped by the argmax. Only a strictly larger `|r|` replaces the
/// current best, so ties resolve to the smallest lag.
fn search_lags(
    candidate: &[f64],
    reference: &[f64],
    min_shift: usize,
    max_shift: usize,
    correlation: CorrelationFn,
) -> LagSearch {
    let mut correlations = Vec::with_capacity(max_shift.saturating_sub(min_shift) + 1);
    let mut best: Option<(usize, f64, usize)> = None;
    let mut max_pairs = 0;

    for lag in min_shift..=max_shift {
        let (x, y) = valid_pairs(&lead(candidate, lag), reference);
        max_pairs = max_pairs.max(x.len());

        let r = if x.len() < 2 {
            f64::NAN
        } else {
            correlation(&x, &y)
        };
        correlations.push(r);

        if r.is_nan() {
            continue;
        }
        match best {
            Some((_, current, _)) if r.abs() <= current.abs() => {}
            _ => best = Some((lag, r, x.len())),
        }
    }

    LagSearch {
        correlations,
        best,
        max_pairs,
    }
}

/// Lag selection by shifted correlation against a target column.
///
/// # Example
/// ```
/// use anofox_tsfeatures::causality::ShiftedCorrelation;
/// use anofox_tsfeatures::core::TimeFrameBuilder;
///
/// let target: Vec<f64> = (0..60).map(|i| (i as f64 * 0.9).sin() + 0.01 * i as f64).collect();
/// let mut lagged = vec![f64::NAN; 3];
/// lagged.extend_from_slice(&target[..57]);
///
/// let frame = TimeFrameBuilder::new()
///     .column("target", target)
///     .column("lagged", lagged)
///     .build()
///     .unwrap();
///
/// let mut estimator = ShiftedCorrelation::new("target", 6);
/// estimator.fit(&frame).unwrap();
/// assert_eq!(estimator.best_shifts().unwrap().best_shift("lagged"), Some(3));
/// ```
#[derive(Debug, Clone)]
pub struct ShiftedCorrelation {
    config: ShiftedCorrelationConfig,
    state: FitState,
}

impl ShiftedCorrelation {
    /// Create an estimator searching lags `1..=max_shift` against `target_col`.
    pub fn new(target_col: impl Into<String>, max_shift: usize) -> Self {
        Self::from_config(ShiftedCorrelationConfig::new(target_col, max_shift))
    }

    /// Create an estimator from a full configuration.
    pub fn from_config(config: ShiftedCorrelationConfig) -> Self {
        Self {
            config,
            state: FitState::Unfitted,
        }
    }

    /// Set the smallest lag tested.
    pub fn with_min_shift(self, min_shift: usize) -> Self {
        Self::from_config(self.config.with_min_shift(min_shift))
    }

    /// Use a different correlation statistic.
    pub fn with_correlation(self, correlation: CorrelationFn) -> Self {
        Self::from_config(self.config.with_correlation(correlation))
    }

    /// Enable bootstrap p-values.
    pub fn with_bootstrap(self, iterations: usize, samples: usize) -> Self {
        Self::from_config(self.config.with_bootstrap(iterations, samples))
    }

    /// Seed the bootstrap random source.
    pub fn with_seed(self, seed: u64) -> Self {
        Self::from_config(self.config.with_seed(seed))
    }

    pub fn config(&self) -> &ShiftedCorrelationConfig {
        &self.config
    }

    pub fn state(&self) -> &FitState {
        &self.state
    }

    pub fn is_fitted(&self) -> bool {
        matches!(self.state, FitState::Fitted { .. })
    }

    /// Best lag table, available after a successful fit.
    pub fn best_shifts(&self) -> Option<&BestShiftsTable> {
        match &self.state {
            FitState::Fitted { best_shifts, .. } => Some(best_shifts),
            FitState::Unfitted => None,
        }
    }

    /// Bootstrap p-values, available after a fit with bootstrapping enabled.
    pub fn p_values(&self) -> Option<&PValuesTable> {
        match &self.state {
            FitState::Fitted { p_values, .. } => p_values.as_ref(),
            FitState::Unfitted => None,
        }
    }

    /// Search the best lag of every column against the target.
    ///
    /// On error the previous fitted state is kept unchanged.
    pub fn fit(&mut self, frame: &TimeFrame) -> Result<&mut Self> {
        self.config.validate()?;
        let target = frame.column(&self.config.target_col)?;

        let ShiftedCorrelationConfig {
            min_shift,
            max_shift,
            correlation,
            ..
        } = self.config;

        // Lags leaving fewer than two overlapping rows are never defined.
        let search_max = max_shift.min(frame.len().saturating_sub(2));
        if search_max < max_shift {
            debug!(max_shift, search_max, rows = frame.len(), "lag range capped by frame length");
        }

        let mut records = Vec::with_capacity(frame.n_columns());
        for (name, values) in frame.iter() {
            let search = search_lags(values, target, min_shift, search_max, correlation);
            let (best_shift, r, n_obs) = match search.best {
                Some(best) => best,
                None => {
                    if search.max_pairs >= 2 {
                        warn!(column = name, "zero variance at every lag");
                    }
                    return Err(FeatureError::InsufficientData {
                        column: name.to_string(),
                        needed: 2,
                        got: search.max_pairs,
                    });
                }
            };

            let undefined = search.correlations.iter().filter(|r| r.is_nan()).count();
            if undefined > 0 {
                warn!(
                    column = name,
                    undefined, "correlation undefined for some lags, excluded from search"
                );
            }
            debug!(column = name, best_shift, correlation = r, n_obs, "best shift");

            records.push(ShiftRecord {
                column: name.to_string(),
                best_shift,
                correlation: r,
                n_obs,
                t_test_p_value: correlation_t_test(r, n_obs),
                correlations: search.correlations,
            });
        }

        let best_shifts = BestShiftsTable::new(min_shift, search_max, records);
        let p_values = if self.config.bootstrap.is_enabled() {
            Some(self.bootstrap_p_values(frame, search_max))
        } else {
            None
        };

        info!(
            target = %self.config.target_col,
            columns = best_shifts.len(),
            min_shift,
            max_shift = search_max,
            bootstrap = p_values.is_some(),
            "shifted correlation fitted"
        );

        self.state = FitState::Fitted {
            best_shifts,
            p_values,
        };
        Ok(self)
    }

    /// Bootstrap p-value of every ordered column pair at its best lag.
    fn bootstrap_p_values(&self, frame: &TimeFrame, max_shift: usize) -> PValuesTable {
        let config = &self.config;
        let mut rng = config.bootstrap.rng();
        let n = frame.n_columns();
        let mut values = vec![vec![0.0; n]; n];

        for (i, (reference_name, reference)) in frame.iter().enumerate() {
            for (j, (candidate_name, candidate)) in frame.iter().enumerate() {
                if i == j {
                    continue;
                }

                let search = search_lags(
                    candidate,
                    reference,
                    config.min_shift,
                    max_shift,
                    config.correlation,
                );
                values[i][j] = match search.best {
                    Some((lag, r, _)) => {
                        let (x, y) = valid_pairs(&lead(candidate, lag), reference);
                        bootstrap_p_value(&x, &y, r, config.correlation, &config.bootstrap, &mut rng)
                    }
                    None => {
                        warn!(
                            reference = reference_name,
                            candidate = candidate_name,
                            "no lag with a defined correlation, p-value undefined"
                        );
                        f64::NAN
                    }
                };
            }
            debug!(reference = reference_name, "bootstrap row done");
        }

        PValuesTable::new(frame.column_names().to_vec(), values)
    }

    /// Shift every column of `frame` backward by its fitted best lag.
    ///
    /// Every column must have been present at fit time. Trailing values
    /// that fall outside the series become `NaN` and are not dropped.
    pub fn transform(&self, frame: &TimeFrame) -> Result<TimeFrame> {
        let best_shifts = self.best_shifts().ok_or(FeatureError::NotFitted)?;

        frame.try_map_columns(|name, values| {
            let lag = best_shifts
                .best_shift(name)
                .ok_or_else(|| FeatureError::UnknownColumn(name.to_string()))?;
            Ok(lead(values, lag))
        })
    }

    /// Fit on `frame`, then transform it.
    pub fn fit_transform(&mut self, frame: &TimeFrame) -> Result<TimeFrame> {
        self.fit(frame)?;
        self.transform(frame)
    }
}
