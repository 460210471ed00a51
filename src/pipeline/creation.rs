use std::collections::HashSet;

use tracing::debug;

use crate::core::TimeFrame;
use crate::error::{FeatureError, Result};
use crate::features::Feature;
use crate::transform::shift;

/// Builds a design matrix `X` from a list of features and a multi-horizon
/// target matrix `y` from one column of the input frame.
#[derive(Debug)]
pub struct FeatureCreation {
    horizon: usize,
    features: Vec<Box<dyn Feature>>,
    target: Option<String>,
}

impl FeatureCreation {
    /// Create a pipeline predicting `horizon` steps ahead.
    ///
    /// Feature output names must be unique and `horizon` must be positive.
    pub fn new(horizon: usize, features: Vec<Box<dyn Feature>>) -> Result<Self> {
        if horizon == 0 {
            return Err(FeatureError::InvalidConfiguration(
                "horizon must be at least 1".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(features.len());
        for feature in &features {
            if !seen.insert(feature.output_name()) {
                return Err(FeatureError::DuplicateColumn(
                    feature.output_name().to_string(),
                ));
            }
        }

        Ok(Self {
            horizon,
            features,
            target: None,
        })
    }

    /// Use `name` as the target column instead of the first column.
    pub fn with_target(mut self, name: impl Into<String>) -> Self {
        self.target = Some(name.into());
        self
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    pub fn features(&self) -> &[Box<dyn Feature>] {
        &self.features
    }

    /// Fit every feature on `frame` and return `(X, y)`.
    ///
    /// `X` holds the feature outputs side by side in feature order. `y` has
    /// columns `y_0 .. y_{horizon-1}` with `y_k[i] = target[i + k]`.
    pub fn fit_transform(&mut self, frame: &TimeFrame) -> Result<(TimeFrame, TimeFrame)> {
        let y = self.target_matrix(frame)?;

        let mut x = TimeFrame::empty_like(frame);
        for feature in self.features.iter_mut() {
            let output = feature.fit_transform(frame)?;
            debug!(
                feature = feature.output_name(),
                columns = output.n_columns(),
                "feature computed"
            );
            x = x.hstack(&output)?;
        }
        Ok((x, y))
    }

    /// Compute `X` with the already fitted features.
    pub fn transform(&self, frame: &TimeFrame) -> Result<TimeFrame> {
        let mut x = TimeFrame::empty_like(frame);
        for feature in &self.features {
            x = x.hstack(&feature.transform(frame)?)?;
        }
        Ok(x)
    }

    fn target_matrix(&self, frame: &TimeFrame) -> Result<TimeFrame> {
        let target = match &self.target {
            Some(name) => frame.column(name)?,
            None => frame.column_at(0).ok_or(FeatureError::EmptyData)?,
        };

        let mut y = TimeFrame::empty_like(frame);
        for k in 0..self.horizon {
            y.push_column(format!("y_{}", k), shift(target, -(k as isize)))?;
        }
        Ok(y)
    }
}
