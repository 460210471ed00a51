//! TimeFrame data structure: named numeric columns over a shared index.

use crate::error::{FeatureError, Result};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Returns true if the value counts as an observation (not NaN/Inf).
#[inline]
pub fn is_valid(value: f64) -> bool {
    value.is_finite()
}

/// A multivariate time series with uniquely named columns.
///
/// All columns share one ordered index, which is either positional
/// (`0..len`) or a strictly increasing list of timestamps. Missing values
/// are stored as `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeFrame {
    timestamps: Option<Vec<DateTime<Utc>>>,
    /// Values stored column-major: columns[column][observation]
    columns: Vec<Vec<f64>>,
    names: Vec<String>,
    len: usize,
}

/// Builder for constructing a TimeFrame column by column.
#[derive(Debug, Clone, Default)]
pub struct TimeFrameBuilder {
    timestamps: Option<Vec<DateTime<Utc>>>,
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl TimeFrameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timestamps(mut self, timestamps: Vec<DateTime<Utc>>) -> Self {
        self.timestamps = Some(timestamps);
        self
    }

    pub fn column(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.names.push(name.into());
        self.columns.push(values);
        self
    }

    pub fn build(self) -> Result<TimeFrame> {
        match self.timestamps {
            Some(ts) => TimeFrame::with_timestamps(ts, self.names, self.columns),
            None => TimeFrame::new(self.names, self.columns),
        }
    }
}

impl TimeFrame {
    /// Create a positionally indexed frame.
    ///
    /// # Arguments
    /// * `names` - Column names, must be unique
    /// * `columns` - Column values, all of the same length
    pub fn new(names: Vec<String>, columns: Vec<Vec<f64>>) -> Result<Self> {
        let len = columns.first().map(|c| c.len()).unwrap_or(0);
        Self::validated(None, names, columns, len)
    }

    /// Create a frame indexed by strictly increasing timestamps.
    pub fn with_timestamps(
        timestamps: Vec<DateTime<Utc>>,
        names: Vec<String>,
        columns: Vec<Vec<f64>>,
    ) -> Result<Self> {
        for i in 1..timestamps.len() {
            if timestamps[i] <= timestamps[i - 1] {
                return Err(FeatureError::TimestampError(
                    "timestamps must be strictly increasing".to_string(),
                ));
            }
        }
        let len = timestamps.len();
        Self::validated(Some(timestamps), names, columns, len)
    }

    /// Create a frame with the same index as `other` and no columns.
    pub fn empty_like(other: &TimeFrame) -> Self {
        Self {
            timestamps: other.timestamps.clone(),
            columns: Vec::new(),
            names: Vec::new(),
            len: other.len,
        }
    }

    fn validated(
        timestamps: Option<Vec<DateTime<Utc>>>,
        names: Vec<String>,
        columns: Vec<Vec<f64>>,
        len: usize,
    ) -> Result<Self> {
        if names.len() != columns.len() {
            return Err(FeatureError::DimensionMismatch {
                expected: columns.len(),
                got: names.len(),
            });
        }

        for column in &columns {
            if column.len() != len {
                return Err(FeatureError::DimensionMismatch {
                    expected: len,
                    got: column.len(),
                });
            }
        }

        let mut seen = HashSet::with_capacity(names.len());
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(FeatureError::DuplicateColumn(name.clone()));
            }
        }

        Ok(Self {
            timestamps,
            columns,
            names,
            len,
        })
    }

    /// Get the number of observations.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the frame has no observations.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the number of columns.
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Get column names in frame order.
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Check whether a column exists.
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Position of a column in frame order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Get the values of a column by name.
    pub fn column(&self, name: &str) -> Result<&[f64]> {
        self.position(name)
            .map(|i| self.columns[i].as_slice())
            .ok_or_else(|| FeatureError::MissingColumn(name.to_string()))
    }

    /// Get the values of a column by position.
    pub fn column_at(&self, index: usize) -> Option<&[f64]> {
        self.columns.get(index).map(|c| c.as_slice())
    }

    /// Iterate over `(name, values)` pairs in frame order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.names
            .iter()
            .map(|n| n.as_str())
            .zip(self.columns.iter().map(|c| c.as_slice()))
    }

    /// Get timestamps, if the frame is timestamp indexed.
    pub fn timestamps(&self) -> Option<&[DateTime<Utc>]> {
        self.timestamps.as_deref()
    }

    /// Get a row (observation at index across all columns).
    pub fn row(&self, index: usize) -> Result<Vec<f64>> {
        if index >= self.len {
            return Err(FeatureError::DimensionMismatch {
                expected: self.len,
                got: index,
            });
        }
        Ok(self.columns.iter().map(|c| c[index]).collect())
    }

    /// Append a column.
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<()> {
        let name = name.into();
        if values.len() != self.len {
            return Err(FeatureError::DimensionMismatch {
                expected: self.len,
                got: values.len(),
            });
        }
        if self.contains(&name) {
            return Err(FeatureError::DuplicateColumn(name));
        }
        self.names.push(name);
        self.columns.push(values);
        Ok(())
    }

    /// Concatenate the columns of `other` to the right of this frame.
    ///
    /// The index of `self` is kept; both frames must have the same length
    /// and disjoint column names.
    pub fn hstack(&self, other: &TimeFrame) -> Result<TimeFrame> {
        if other.len != self.len {
            return Err(FeatureError::DimensionMismatch {
                expected: self.len,
                got: other.len,
            });
        }
        let mut out = self.clone();
        for (name, values) in other.iter() {
            out.push_column(name, values.to_vec())?;
        }
        Ok(out)
    }

    /// Return a copy with the given column names.
    pub fn renamed(&self, names: Vec<String>) -> Result<TimeFrame> {
        Self::validated(self.timestamps.clone(), names, self.columns.clone(), self.len)
    }

    /// Apply `f` to every column, keeping names and index.
    ///
    /// `f` must return a vector of the same length as its input.
    pub fn map_columns<F>(&self, f: F) -> Result<TimeFrame>
    where
        F: Fn(&[f64]) -> Vec<f64>,
    {
        self.try_map_columns(|_, values| Ok(f(values)))
    }

    /// Apply a fallible function to every `(name, values)` column.
    ///
    /// Stops at the first error. Names and index are kept.
    pub fn try_map_columns<F>(&self, f: F) -> Result<TimeFrame>
    where
        F: Fn(&str, &[f64]) -> Result<Vec<f64>>,
    {
        let columns = self
            .iter()
            .map(|(name, values)| f(name, values))
            .collect::<Result<Vec<_>>>()?;
        Self::validated(self.timestamps.clone(), self.names.clone(), columns, self.len)
    }

    /// Extract rows `start..end`.
    pub fn slice(&self, start: usize, end: usize) -> Result<TimeFrame> {
        if start > end {
            return Err(FeatureError::InvalidConfiguration(
                "start must be <= end".to_string(),
            ));
        }
        if end > self.len {
            return Err(FeatureError::DimensionMismatch {
                expected: self.len,
                got: end,
            });
        }
        let rows: Vec<usize> = (start..end).collect();
        Ok(self.take_rows(&rows))
    }

    /// Build a frame from the given row positions (in the given order).
    ///
    /// Positions must be in bounds.
    pub fn take_rows(&self, rows: &[usize]) -> TimeFrame {
        TimeFrame {
            timestamps: self
                .timestamps
                .as_ref()
                .map(|ts| rows.iter().map(|&i| ts[i]).collect()),
            columns: self
                .columns
                .iter()
                .map(|c| rows.iter().map(|&i| c[i]).collect())
                .collect(),
            names: self.names.clone(),
            len: rows.len(),
        }
    }

    /// For every row, whether all columns hold a valid value.
    pub fn complete_rows(&self) -> Vec<bool> {
        (0..self.len)
            .map(|i| self.columns.iter().all(|c| is_valid(c[i])))
            .collect()
    }

    /// Check if the frame has missing values (NaN or Inf).
    pub fn has_missing_values(&self) -> bool {
        self.columns.iter().any(|c| c.iter().any(|&v| !is_valid(v)))
    }

    /// Return a copy without rows that contain a missing value.
    pub fn drop_missing(&self) -> TimeFrame {
        let rows: Vec<usize> = self
            .complete_rows()
            .iter()
            .enumerate()
            .filter(|(_, &complete)| complete)
            .map(|(i, _)| i)
            .collect();
        self.take_rows(&rows)
    }
}
