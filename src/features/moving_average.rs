//! Trailing rolling-window features.

use super::{rename_columns, Feature};
use crate::core::TimeFrame;
use crate::error::{FeatureError, Result};
use crate::transform::{rolling_mean, rolling_std};

/// Trailing moving average of every column.
///
/// The first `window_size - 1` positions are missing.
#[derive(Debug, Clone, PartialEq)]
pub struct MovingAverageFeature {
    window_size: usize,
    output_name: String,
}

impl MovingAverageFeature {
    pub fn new(window_size: usize, output_name: impl Into<String>) -> Result<Self> {
        if window_size == 0 {
            return Err(FeatureError::InvalidConfiguration(
                "window_size must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            window_size,
            output_name: output_name.into(),
        })
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }
}

impl Feature for MovingAverageFeature {
    fn output_name(&self) -> &str {
        &self.output_name
    }

    fn transform(&self, frame: &TimeFrame) -> Result<TimeFrame> {
        let averaged = frame.map_columns(|values| rolling_mean(values, self.window_size, false))?;
        rename_columns(&averaged, &self.output_name)
    }
}

/// Trailing moving sample standard deviation of every column.
#[derive(Debug, Clone, PartialEq)]
pub struct MovingStdFeature {
    window_size: usize,
    output_name: String,
}

impl MovingStdFeature {
    /// Requires `window_size >= 2`.
    pub fn new(window_size: usize, output_name: impl Into<String>) -> Result<Self> {
        if window_size < 2 {
            return Err(FeatureError::InvalidConfiguration(
                "window_size must be at least 2 for a sample standard deviation".to_string(),
            ));
        }
        Ok(Self {
            window_size,
            output_name: output_name.into(),
        })
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }
}

impl Feature for MovingStdFeature {
    fn output_name(&self) -> &str {
        &self.output_name
    }

    fn transform(&self, frame: &TimeFrame) -> Result<TimeFrame> {
        let spread = frame.map_columns(|values| rolling_std(values, self.window_size, false))?;
        rename_columns(&spread, &self.output_name)
    }
}
