//! # anofox-tsfeatures
//!
//! Time series feature engineering.
//!
//! Provides lag and rolling-window features, supervised `(X, y)` matrix
//! construction for multi-step forecasting, train/test splitting, parametric
//! trend forecasting, and shifted-correlation lag selection with bootstrap
//! p-values.

// Allow some clippy warnings for cleaner code in specific cases
#![allow(clippy::upper_case_acronyms)]
#![allow(clippy::needless_range_loop)]

pub mod causality;
pub mod core;
pub mod error;
pub mod features;
pub mod forecasting;
pub mod model_selection;
pub mod pipeline;
pub mod transform;
pub mod utils;

pub use error::{FeatureError, Result};

pub mod prelude {
    pub use crate::causality::{ShiftedCorrelation, ShiftedCorrelationConfig};
    pub use crate::core::{TimeFrame, TimeFrameBuilder};
    pub use crate::error::{FeatureError, Result};
    pub use crate::features::{
        DetrendedFeature, Feature, MovingAverageFeature, MovingStdFeature, PolynomialTrendFeature,
        ShiftFeature,
    };
    pub use crate::forecasting::{Trend, TrendForecaster};
    pub use crate::model_selection::{FeatureSplitter, SplitResult};
    pub use crate::pipeline::FeatureCreation;
}
