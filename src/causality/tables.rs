//! Result tables produced by the shifted-correlation estimator.

use std::ops::RangeInclusive;

/// Lag search outcome for one candidate column against the target.
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftRecord {
    /// Candidate column name.
    pub column: String,
    /// Lag with the largest absolute correlation (smallest lag on ties).
    pub best_shift: usize,
    /// Signed correlation at `best_shift`.
    pub correlation: f64,
    /// Number of valid paired observations at `best_shift`.
    pub n_obs: usize,
    /// Two-sided Student t p-value of `correlation` over `n_obs` pairs.
    pub t_test_p_value: f64,
    /// Correlation at every tested lag, `NaN` where undefined.
    pub correlations: Vec<f64>,
}

/// Best lag and correlation for every column of a fitted frame.
///
/// Rows follow the fitted frame's column order and include the target
/// column itself (its autocorrelation search).
#[derive(Debug, Clone, PartialEq)]
pub struct BestShiftsTable {
    min_shift: usize,
    max_shift: usize,
    records: Vec<ShiftRecord>,
}

impl BestShiftsTable {
    pub(crate) fn new(min_shift: usize, max_shift: usize, records: Vec<ShiftRecord>) -> Self {
        Self {
            min_shift,
            max_shift,
            records,
        }
    }

    /// The tested lags, in the order of `ShiftRecord::correlations`.
    ///
    /// The upper bound is the configured `max_shift`, capped so that every
    /// tested lag leaves at least two overlapping rows.
    pub fn lags(&self) -> RangeInclusive<usize> {
        self.min_shift..=self.max_shift
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over rows in column order.
    pub fn iter(&self) -> impl Iterator<Item = &ShiftRecord> {
        self.records.iter()
    }

    /// Column names in row order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.column.as_str())
    }

    /// Row for a column.
    pub fn get(&self, column: &str) -> Option<&ShiftRecord> {
        self.records.iter().find(|r| r.column == column)
    }

    /// Best lag for a column.
    pub fn best_shift(&self, column: &str) -> Option<usize> {
        self.get(column).map(|r| r.best_shift)
    }

    /// Correlation at the best lag for a column.
    pub fn correlation(&self, column: &str) -> Option<f64> {
        self.get(column).map(|r| r.correlation)
    }

    /// Correlation of a column at a specific tested lag.
    pub fn correlation_at(&self, column: &str, lag: usize) -> Option<f64> {
        if !self.lags().contains(&lag) {
            return None;
        }
        self.get(column)
            .and_then(|r| r.correlations.get(lag - self.min_shift).copied())
    }

    /// Best lags in row order.
    pub fn best_shifts(&self) -> Vec<usize> {
        self.records.iter().map(|r| r.best_shift).collect()
    }
}

/// Square matrix of bootstrap p-values.
///
/// Entry `(reference, candidate)` is the p-value of the best-lag
/// correlation of `candidate` against `reference`. Diagonal entries are 0.
#[derive(Debug, Clone, PartialEq)]
pub struct PValuesTable {
    columns: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl PValuesTable {
    pub(crate) fn new(columns: Vec<String>, values: Vec<Vec<f64>>) -> Self {
        Self { columns, values }
    }

    /// Row and column labels.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows (and columns).
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    fn index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// P-value of `candidate` against `reference`.
    pub fn get(&self, reference: &str, candidate: &str) -> Option<f64> {
        let i = self.index(reference)?;
        let j = self.index(candidate)?;
        Some(self.values[i][j])
    }

    /// All p-values with `reference` as the row.
    pub fn row(&self, reference: &str) -> Option<&[f64]> {
        self.index(reference).map(|i| self.values[i].as_slice())
    }

    /// Entry by position.
    pub fn at(&self, row: usize, column: usize) -> Option<f64> {
        self.values.get(row).and_then(|r| r.get(column)).copied()
    }

    /// Diagonal entries in column order.
    pub fn diagonal(&self) -> Vec<f64> {
        (0..self.len()).map(|i| self.values[i][i]).collect()
    }
}
