//! Column-level transformations for time series.
//!
//! Provides shifting and rolling window statistics used by the feature
//! builders and the shifted-correlation estimator.
//!
//! # Example
//!
//! ```
//! use anofox_tsfeatures::transform::{rolling_mean, shift};
//!
//! let series = vec![1.0, 2.0, 3.0, 4.0, 5.0];
//!
//! // Previous observation at every position
//! let lag1 = shift(&series, 1);
//!
//! // Rolling mean with window 3
//! let rm = rolling_mean(&series, 3, false);
//! assert_eq!(rm[4], 4.0);
//! ```

pub mod window;

pub use window::{lead, rolling_mean, rolling_std, rolling_var, shift};
