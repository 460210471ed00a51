//! End-to-end tests for feature creation, splitting and trend forecasting.

use anofox_tsfeatures::prelude::*;
use approx::assert_relative_eq;
use chrono::{Duration, TimeZone, Utc};

fn daily_frame(values: Vec<f64>) -> TimeFrame {
    let base = Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap();
    let timestamps = (0..values.len())
        .map(|i| base + Duration::days(i as i64))
        .collect();
    TimeFrameBuilder::new()
        .timestamps(timestamps)
        .column("demand", values)
        .build()
        .unwrap()
}

fn seasonal_trend(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let t = i as f64;
            20.0 + 0.3 * t + 4.0 * (2.0 * std::f64::consts::PI * t / 7.0).sin()
        })
        .collect()
}

fn standard_features() -> Vec<Box<dyn Feature>> {
    vec![
        Box::new(ShiftFeature::new(0, "shift_0")),
        Box::new(ShiftFeature::new(1, "shift_1")),
        Box::new(ShiftFeature::new(2, "shift_2")),
        Box::new(MovingAverageFeature::new(7, "ma_7").unwrap()),
        Box::new(MovingStdFeature::new(7, "std_7").unwrap()),
        Box::new(DetrendedFeature::new(1, "detrended")),
    ]
}

#[test]
fn creation_then_split() {
    let n = 60;
    let horizon = 4;
    let frame = daily_frame(seasonal_trend(n));

    let mut creation = FeatureCreation::new(horizon, standard_features()).unwrap();
    let (x, y) = creation.fit_transform(&frame).unwrap();

    let names: Vec<&str> = x.column_names().iter().map(|s| s.as_str()).collect();
    assert_eq!(
        names,
        vec!["shift_0", "shift_1", "shift_2", "ma_7", "std_7", "detrended"]
    );
    assert_eq!(x.timestamps(), frame.timestamps());
    assert_eq!(y.n_columns(), horizon);

    let split = FeatureSplitter::new().split(&x, &y).unwrap();

    // Rolling window of 7 drops the first 6 rows, the horizon drops the last 3.
    assert_eq!(split.x_train.len(), n - 6 - (horizon - 1));
    assert_eq!(split.y_train.len(), split.x_train.len());
    assert_eq!(split.x_test.len(), horizon - 1);
    assert!(!split.x_train.has_missing_values());
    assert!(!split.y_train.has_missing_values());

    let first_train = split.x_train.timestamps().unwrap()[0];
    assert_eq!(first_train, frame.timestamps().unwrap()[6]);
    let last_test = *split.x_test.timestamps().unwrap().last().unwrap();
    assert_eq!(last_test, *frame.timestamps().unwrap().last().unwrap());

    // y_k at a train row is the target k steps later.
    let demand = frame.column("demand").unwrap();
    let y3 = split.y_train.column("y_3").unwrap();
    assert_eq!(y3[0], demand[6 + 3]);
}

#[test]
fn refit_features_transform_new_window() {
    let frame = daily_frame(seasonal_trend(80));
    let mut creation = FeatureCreation::new(2, standard_features()).unwrap();
    creation.fit_transform(&frame).unwrap();

    let recent = frame.slice(40, 80).unwrap();
    let x = creation.transform(&recent).unwrap();
    assert_eq!(x.len(), 40);
    assert_eq!(x.column("shift_1").unwrap()[1], recent.column("demand").unwrap()[0]);
}

#[test]
fn trend_forecaster_extrapolates_fitted_series() {
    let values: Vec<f64> = (0..50).map(|t| 10.0 + 0.8 * t as f64).collect();
    let frame = daily_frame(values);

    let mut model = TrendForecaster::new(Trend::Polynomial, vec![1.0, 0.0]);
    model.fit(&frame).unwrap();

    let forecast = model.predict_ahead(5).unwrap();
    for (h, value) in forecast.iter().enumerate() {
        assert_relative_eq!(*value, 10.0 + 0.8 * (50 + h) as f64, epsilon = 1e-2);
    }

    let at = model.predict(&[0.0, 100.0]).unwrap();
    assert_relative_eq!(at[0], 10.0, epsilon = 1e-2);
    assert_relative_eq!(at[1], 90.0, epsilon = 5e-2);
}

#[test]
fn lag_selection_feeds_feature_creation() {
    let driver: Vec<f64> = (0..90)
        .map(|i| ((i * 37 % 23) as f64) - 11.0 + 0.1 * i as f64)
        .collect();
    let mut response = vec![f64::NAN; 3];
    response.extend_from_slice(&driver[..87]);

    let frame = TimeFrameBuilder::new()
        .column("driver", driver)
        .column("response", response)
        .build()
        .unwrap();

    let mut lags = ShiftedCorrelation::new("driver", 6);
    let aligned = lags.fit_transform(&frame).unwrap();
    assert_eq!(lags.best_shifts().unwrap().best_shift("response"), Some(3));

    let features: Vec<Box<dyn Feature>> = vec![Box::new(ShiftFeature::new(1, "lag_1"))];
    let mut creation = FeatureCreation::new(1, features)
        .unwrap()
        .with_target("response");
    let (x, y) = creation.fit_transform(&aligned).unwrap();
    assert_eq!(x.n_columns(), 2);
    assert_eq!(y.len(), aligned.len());
}
