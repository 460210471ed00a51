//! Core data structures for time series feature engineering.

mod frame;

pub use frame::{is_valid, TimeFrame, TimeFrameBuilder};
