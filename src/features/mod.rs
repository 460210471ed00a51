//! Column-wise time series features.
//!
//! A [`Feature`] turns a frame into a new frame of the same length whose
//! columns are named after the feature. Stateless features ignore `fit`;
//! trend features learn per-column coefficients during `fit`.
//!
//! # Example
//!
//! ```
//! use anofox_tsfeatures::core::TimeFrameBuilder;
//! use anofox_tsfeatures::features::{Feature, MovingAverageFeature, ShiftFeature};
//!
//! let frame = TimeFrameBuilder::new()
//!     .column("value", vec![1.0, 2.0, 3.0, 4.0])
//!     .build()
//!     .unwrap();
//!
//! let mut lag = ShiftFeature::new(1, "lag_1");
//! let lagged = lag.fit_transform(&frame).unwrap();
//! assert_eq!(lagged.column_names(), &["lag_1".to_string()]);
//! assert!(lagged.column("lag_1").unwrap()[0].is_nan());
//!
//! let mut ma = MovingAverageFeature::new(2, "ma_2").unwrap();
//! let smoothed = ma.fit_transform(&frame).unwrap();
//! assert_eq!(&smoothed.column("ma_2").unwrap()[1..], &[1.5, 2.5, 3.5]);
//! ```

mod moving_average;
mod shift;
mod trend;

pub use moving_average::{MovingAverageFeature, MovingStdFeature};
pub use shift::ShiftFeature;
pub use trend::{DetrendedFeature, PolynomialTrendFeature};

use crate::core::TimeFrame;
use crate::error::Result;

/// A transformation from a frame to a frame of derived columns.
pub trait Feature: std::fmt::Debug {
    /// Name used for the output column(s).
    fn output_name(&self) -> &str;

    /// Learn any state needed by `transform`. Stateless features do nothing.
    fn fit(&mut self, _frame: &TimeFrame) -> Result<()> {
        Ok(())
    }

    /// Compute the feature columns for `frame`.
    fn transform(&self, frame: &TimeFrame) -> Result<TimeFrame>;

    /// Fit on `frame`, then transform it.
    fn fit_transform(&mut self, frame: &TimeFrame) -> Result<TimeFrame> {
        self.fit(frame)?;
        self.transform(frame)
    }
}

/// Rename the columns of a feature output after the feature.
///
/// A single column becomes `output_name`; several columns become
/// `output_name_0`, `output_name_1`, ...
pub fn rename_columns(frame: &TimeFrame, output_name: &str) -> Result<TimeFrame> {
    let names = match frame.n_columns() {
        1 => vec![output_name.to_string()],
        n => (0..n).map(|i| format!("{}_{}", output_name, i)).collect(),
    };
    frame.renamed(names)
}
