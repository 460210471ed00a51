//! Supervised learning matrices from raw time series.
//!
//! # Example
//!
//! ```
//! use anofox_tsfeatures::core::TimeFrameBuilder;
//! use anofox_tsfeatures::features::{Feature, ShiftFeature};
//! use anofox_tsfeatures::pipeline::FeatureCreation;
//!
//! let frame = TimeFrameBuilder::new()
//!     .column("value", (0..20).map(|i| i as f64).collect())
//!     .build()
//!     .unwrap();
//!
//! let features: Vec<Box<dyn Feature>> = vec![
//!     Box::new(ShiftFeature::new(0, "shift_0")),
//!     Box::new(ShiftFeature::new(1, "shift_1")),
//! ];
//! let mut creation = FeatureCreation::new(3, features).unwrap();
//! let (x, y) = creation.fit_transform(&frame).unwrap();
//!
//! assert_eq!(x.n_columns(), 2);
//! assert_eq!(y.n_columns(), 3);
//! assert_eq!(y.column("y_2").unwrap()[0], 2.0);
//! ```

mod creation;

pub use creation::FeatureCreation;
