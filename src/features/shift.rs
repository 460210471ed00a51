use super::{rename_columns, Feature};
use crate::core::TimeFrame;
use crate::error::Result;
use crate::transform::shift;

/// Shift every column by a fixed number of periods.
///
/// Positive shifts produce lagged values (leading positions missing),
/// negative shifts produce future values (trailing positions missing).
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftFeature {
    shift: isize,
    output_name: String,
}

impl ShiftFeature {
    pub fn new(shift: isize, output_name: impl Into<String>) -> Self {
        Self {
            shift,
            output_name: output_name.into(),
        }
    }

    /// Number of periods to shift by.
    pub fn shift(&self) -> isize {
        self.shift
    }
}

impl Feature for ShiftFeature {
    fn output_name(&self) -> &str {
        &self.output_name
    }

    fn transform(&self, frame: &TimeFrame) -> Result<TimeFrame> {
        let shifted = frame.map_columns(|values| shift(values, self.shift))?;
        rename_columns(&shifted, &self.output_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TimeFrameBuilder;

    fn frame() -> TimeFrame {
        TimeFrameBuilder::new()
            .column("a", vec![1.0, 2.0, 3.0, 4.0, 5.0])
            .column("b", vec![10.0, 20.0, 30.0, 40.0, 50.0])
            .build()
            .unwrap()
    }

    #[test]
    fn positive_shift_lags_values() {
        let out = ShiftFeature::new(2, "lag").transform(&frame()).unwrap();
        let lag0 = out.column("lag_0").unwrap();
        assert!(lag0[0].is_nan() && lag0[1].is_nan());
        assert_eq!(&lag0[2..], &[1.0, 2.0, 3.0]);
        assert_eq!(&out.column("lag_1").unwrap()[2..], &[10.0, 20.0, 30.0]);
    }

    #[test]
    fn negative_shift_leads_values() {
        let out = ShiftFeature::new(-1, "lead").transform(&frame()).unwrap();
        let lead0 = out.column("lead_0").unwrap();
        assert_eq!(&lead0[..4], &[2.0, 3.0, 4.0, 5.0]);
        assert!(lead0[4].is_nan());
    }

    #[test]
    fn zero_shift_is_identity() {
        let data = frame();
        let out = ShiftFeature::new(0, "same").transform(&data).unwrap();
        assert_eq!(out.column("same_0").unwrap(), data.column("a").unwrap());
    }

    #[test]
    fn shift_past_length_is_all_missing() {
        let out = ShiftFeature::new(9, "far").transform(&frame()).unwrap();
        assert!(out.column("far_1").unwrap().iter().all(|v| v.is_nan()));
    }
}
