//! Error types for the anofox-tsfeatures library.

use thiserror::Error;

/// Result type alias for feature engineering operations.
pub type Result<T> = std::result::Result<T, FeatureError>;

/// Errors that can occur while building features or fitting estimators.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeatureError {
    /// Input data is empty.
    #[error("empty input data")]
    EmptyData,

    /// A required column is not present in the frame.
    #[error("missing column: {0}")]
    MissingColumn(String),

    /// A column was not seen when the estimator was fitted.
    #[error("unknown column: {0} was not present at fit time")]
    UnknownColumn(String),

    /// Two columns (or features) share the same name.
    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),

    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Not enough valid observations to compute a statistic for a column.
    #[error("insufficient data for column '{column}': need at least {needed}, got {got}")]
    InsufficientData {
        column: String,
        needed: usize,
        got: usize,
    },

    /// Dimension mismatch between data structures.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Timestamp-related error.
    #[error("timestamp error: {0}")]
    TimestampError(String),

    /// Estimator has not been fitted yet.
    #[error("estimator must be fitted before transform")]
    NotFitted,

    /// Computation error (e.g., numerical issues).
    #[error("computation error: {0}")]
    ComputationError(String),
}
