use tracing::debug;

use crate::core::TimeFrame;
use crate::error::{FeatureError, Result};

/// Train and test partitions of a design matrix and its targets.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitResult {
    pub x_train: TimeFrame,
    pub y_train: TimeFrame,
    pub x_test: TimeFrame,
    pub y_test: TimeFrame,
}

/// Splits `(X, y)` produced by a feature pipeline into train and test sets.
///
/// Rows up to and including the last row with a complete `y` are train
/// candidates; of those, only rows where both `X` and `y` are complete are
/// kept. All later rows form the test set, whose targets are not (fully)
/// known yet.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FeatureSplitter;

impl FeatureSplitter {
    pub fn new() -> Self {
        Self
    }

    pub fn split(&self, x: &TimeFrame, y: &TimeFrame) -> Result<SplitResult> {
        if x.len() != y.len() {
            return Err(FeatureError::DimensionMismatch {
                expected: x.len(),
                got: y.len(),
            });
        }

        let y_complete = y.complete_rows();
        let x_complete = x.complete_rows();
        let boundary = y_complete
            .iter()
            .rposition(|&complete| complete)
            .map_or(0, |last| last + 1);

        let train_rows: Vec<usize> = (0..boundary)
            .filter(|&i| x_complete[i] && y_complete[i])
            .collect();
        let test_rows: Vec<usize> = (boundary..x.len()).collect();

        debug!(
            train = train_rows.len(),
            dropped = boundary - train_rows.len(),
            test = test_rows.len(),
            "split computed"
        );

        Ok(SplitResult {
            x_train: x.take_rows(&train_rows),
            y_train: y.take_rows(&train_rows),
            x_test: x.take_rows(&test_rows),
            y_test: y.take_rows(&test_rows),
        })
    }
}
