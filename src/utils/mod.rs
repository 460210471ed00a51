//! Utility functions shared by features and estimators.

pub mod bootstrap;
pub mod metrics;
pub mod ols;
pub mod optimization;
pub mod stats;

pub use bootstrap::{bootstrap_p_value, BootstrapConfig};
pub use metrics::{mean_absolute_error, mean_squared_error, root_mean_squared_error, LossFn};
pub use ols::{ols_fit, polyfit, OLSResult, PolynomialFit};
pub use optimization::{nelder_mead, NelderMeadConfig, NelderMeadResult};
pub use stats::{correlation_t_test, pearson, spearman, valid_pairs, CorrelationFn};
