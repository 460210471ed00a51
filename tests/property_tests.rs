//! Property-based tests for lag selection and feature construction.
//!
//! These tests verify invariants that should hold for all valid inputs,
//! using randomly generated series.

use anofox_tsfeatures::causality::ShiftedCorrelation;
use anofox_tsfeatures::core::{TimeFrame, TimeFrameBuilder};
use anofox_tsfeatures::features::{Feature, MovingAverageFeature, ShiftFeature};
use anofox_tsfeatures::model_selection::FeatureSplitter;
use anofox_tsfeatures::pipeline::FeatureCreation;
use anofox_tsfeatures::transform::shift;
use proptest::prelude::*;

/// Strategy for generating series with non-zero variance.
fn valid_values_strategy(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    (min_len..max_len).prop_flat_map(|len| {
        prop::collection::vec(-100.0..100.0_f64, len).prop_map(|mut v| {
            // Break ties so ranks and variances are never degenerate
            for (i, val) in v.iter_mut().enumerate() {
                *val += (i as f64) * 1e-3;
            }
            v
        })
    })
}

fn lag_forward(series: &[f64], s: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; s];
    out.extend_from_slice(&series[..series.len() - s]);
    out
}

fn single(name: &str, values: Vec<f64>) -> TimeFrame {
    TimeFrameBuilder::new().column(name, values).build().unwrap()
}

// =============================================================================
// Property: the lag of a shifted copy is recovered
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(40))]

    #[test]
    fn shifted_copy_lag_recovered(
        values in valid_values_strategy(60, 150),
        lag in 1usize..8
    ) {
        let frame = TimeFrameBuilder::new()
            .column("target", values.clone())
            .column("copy", lag_forward(&values, lag))
            .build()
            .unwrap();

        let mut estimator = ShiftedCorrelation::new("target", 10);
        estimator.fit(&frame).unwrap();
        let record = estimator.best_shifts().unwrap().get("copy").unwrap().clone();

        prop_assert!((record.correlation.abs() - 1.0).abs() < 1e-9);
        prop_assert_eq!(record.best_shift, lag);
        prop_assert_eq!(record.correlations.len(), 10);
    }

    #[test]
    fn correlations_are_bounded(
        a in valid_values_strategy(30, 80),
        seed in 0u64..1000
    ) {
        let b: Vec<f64> = a
            .iter()
            .enumerate()
            .map(|(i, v)| v * ((i as u64 * 31 + seed) % 7) as f64 - (seed % 13) as f64)
            .collect();
        let frame = TimeFrameBuilder::new()
            .column("a", a)
            .column("b", b)
            .build()
            .unwrap();

        let mut estimator = ShiftedCorrelation::new("a", 5);
        if estimator.fit(&frame).is_ok() {
            for record in estimator.best_shifts().unwrap().iter() {
                prop_assert!(record.correlation.abs() <= 1.0);
                for r in record.correlations.iter().filter(|r| !r.is_nan()) {
                    prop_assert!(r.abs() <= record.correlation.abs());
                }
            }
        }
    }
}

// =============================================================================
// Property: shifting preserves length and values
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn shift_preserves_length(
        values in valid_values_strategy(1, 60),
        periods in -70isize..70
    ) {
        let shifted = shift(&values, periods);
        prop_assert_eq!(shifted.len(), values.len());
        let valid = shifted.iter().filter(|v| !v.is_nan()).count();
        prop_assert_eq!(valid, values.len().saturating_sub(periods.unsigned_abs()));
    }

    #[test]
    fn shift_feature_fit_transform_equals_transform(
        values in valid_values_strategy(5, 60),
        periods in -10isize..10
    ) {
        let frame = single("x", values);
        let mut feature = ShiftFeature::new(periods, "lagged");
        let combined = feature.fit_transform(&frame).unwrap();
        let direct = feature.transform(&frame).unwrap();
        prop_assert_eq!(combined.drop_missing(), direct.drop_missing());
    }

    #[test]
    fn moving_average_within_window_range(
        values in valid_values_strategy(10, 60),
        window in 1usize..10
    ) {
        let frame = single("x", values.clone());
        let out = MovingAverageFeature::new(window, "ma").unwrap().transform(&frame).unwrap();
        let ma = out.column("ma").unwrap();
        for i in (window - 1)..values.len() {
            let slice = &values[i + 1 - window..=i];
            let lo = slice.iter().cloned().fold(f64::INFINITY, f64::min);
            let hi = slice.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(ma[i] >= lo - 1e-9 && ma[i] <= hi + 1e-9);
        }
    }
}

// =============================================================================
// Property: y layout and split partition
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(40))]

    #[test]
    fn y_columns_are_future_targets(
        values in valid_values_strategy(10, 60),
        horizon in 1usize..6
    ) {
        let frame = single("target", values.clone());
        let features: Vec<Box<dyn Feature>> = vec![Box::new(ShiftFeature::new(1, "lag_1"))];
        let mut creation = FeatureCreation::new(horizon, features).unwrap();
        let (_, y) = creation.fit_transform(&frame).unwrap();

        for k in 0..horizon {
            let column = y.column(&format!("y_{}", k)).unwrap();
            for i in 0..values.len() {
                if i + k < values.len() {
                    prop_assert_eq!(column[i], values[i + k]);
                } else {
                    prop_assert!(column[i].is_nan());
                }
            }
        }
    }

    #[test]
    fn split_partitions_rows(
        values in valid_values_strategy(12, 60),
        horizon in 1usize..5,
        lag in 0isize..4
    ) {
        let frame = single("target", values.clone());
        let features: Vec<Box<dyn Feature>> = vec![Box::new(ShiftFeature::new(lag, "lag"))];
        let mut creation = FeatureCreation::new(horizon, features).unwrap();
        let (x, y) = creation.fit_transform(&frame).unwrap();
        let split = FeatureSplitter::new().split(&x, &y).unwrap();

        let dropped = lag as usize;
        prop_assert_eq!(split.x_test.len(), horizon - 1);
        prop_assert_eq!(split.x_train.len(), values.len() - (horizon - 1) - dropped);
        prop_assert_eq!(split.x_train.len(), split.y_train.len());
        prop_assert!(!split.x_train.has_missing_values());
        prop_assert!(!split.y_train.has_missing_values());
    }
}
