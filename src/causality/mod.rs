//! Causality-style lag diagnostics.
//!
//! [`ShiftedCorrelation`] finds, for every column of a frame, the lag that
//! best aligns it with a target column, and can attach bootstrap p-values
//! to the selected correlations.
//!
//! # Example
//!
//! ```
//! use anofox_tsfeatures::causality::ShiftedCorrelation;
//! use anofox_tsfeatures::core::TimeFrameBuilder;
//!
//! let sales: Vec<f64> = (0..80).map(|i| (i as f64 * 0.37).sin() * 10.0 + (i % 7) as f64).collect();
//! let mut ads = vec![f64::NAN; 2];
//! ads.extend_from_slice(&sales[..78]);
//!
//! let frame = TimeFrameBuilder::new()
//!     .column("sales", sales)
//!     .column("ads", ads)
//!     .build()
//!     .unwrap();
//!
//! let mut estimator = ShiftedCorrelation::new("sales", 5)
//!     .with_bootstrap(100, 50)
//!     .with_seed(7);
//! estimator.fit(&frame).unwrap();
//!
//! assert_eq!(estimator.best_shifts().unwrap().best_shift("ads"), Some(2));
//! assert_eq!(estimator.p_values().unwrap().get("sales", "sales"), Some(0.0));
//!
//! let shifted = estimator.transform(&frame).unwrap();
//! let sales = frame.column("sales").unwrap();
//! assert_eq!(&shifted.column("ads").unwrap()[..78], &sales[..78]);
//! ```

mod shifted_correlation;
mod tables;

pub use crate::utils::stats::{pearson, spearman, CorrelationFn};
pub use shifted_correlation::{FitState, ShiftedCorrelation, ShiftedCorrelationConfig};
pub use tables::{BestShiftsTable, PValuesTable, ShiftRecord};
