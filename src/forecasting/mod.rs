//! Trend-based forecasting.

mod trend;

pub use trend::{Trend, TrendForecaster};
