//! Polynomial trend features.

use super::{rename_columns, Feature};
use crate::core::TimeFrame;
use crate::error::{FeatureError, Result};
use crate::utils::{polyfit, PolynomialFit};

/// Fit one polynomial per column of `frame`.
fn fit_trends(frame: &TimeFrame, degree: usize) -> Result<Vec<PolynomialFit>> {
    frame
        .iter()
        .map(|(_, values)| polyfit(values, degree))
        .collect()
}

/// Apply `f(value, trend)` to every column, matching fitted trends by position.
fn map_with_trend<F>(frame: &TimeFrame, trends: Option<&[PolynomialFit]>, f: F) -> Result<TimeFrame>
where
    F: Fn(f64, f64) -> f64,
{
    let trends = trends.ok_or(FeatureError::NotFitted)?;
    if trends.len() != frame.n_columns() {
        return Err(FeatureError::DimensionMismatch {
            expected: trends.len(),
            got: frame.n_columns(),
        });
    }

    let mut out = TimeFrame::empty_like(frame);
    for ((name, values), trend) in frame.iter().zip(trends) {
        let column = values
            .iter()
            .enumerate()
            .map(|(i, &v)| f(v, trend.evaluate(i as f64)))
            .collect();
        out.push_column(name, column)?;
    }
    Ok(out)
}

/// Polynomial trend of each column, evaluated at the row positions.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialTrendFeature {
    degree: usize,
    output_name: String,
    trends: Option<Vec<PolynomialFit>>,
}

impl PolynomialTrendFeature {
    pub fn new(degree: usize, output_name: impl Into<String>) -> Self {
        Self {
            degree,
            output_name: output_name.into(),
            trends: None,
        }
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Fitted trends, one per column, if `fit` has run.
    pub fn trends(&self) -> Option<&[PolynomialFit]> {
        self.trends.as_deref()
    }
}

impl Feature for PolynomialTrendFeature {
    fn output_name(&self) -> &str {
        &self.output_name
    }

    fn fit(&mut self, frame: &TimeFrame) -> Result<()> {
        self.trends = Some(fit_trends(frame, self.degree)?);
        Ok(())
    }

    fn transform(&self, frame: &TimeFrame) -> Result<TimeFrame> {
        let trend = map_with_trend(frame, self.trends(), |_, t| t)?;
        rename_columns(&trend, &self.output_name)
    }
}

/// Each column minus its fitted polynomial trend.
#[derive(Debug, Clone, PartialEq)]
pub struct DetrendedFeature {
    degree: usize,
    output_name: String,
    trends: Option<Vec<PolynomialFit>>,
}

impl DetrendedFeature {
    pub fn new(degree: usize, output_name: impl Into<String>) -> Self {
        Self {
            degree,
            output_name: output_name.into(),
            trends: None,
        }
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn trends(&self) -> Option<&[PolynomialFit]> {
        self.trends.as_deref()
    }
}

impl Feature for DetrendedFeature {
    fn output_name(&self) -> &str {
        &self.output_name
    }

    fn fit(&mut self, frame: &TimeFrame) -> Result<()> {
        self.trends = Some(fit_trends(frame, self.degree)?);
        Ok(())
    }

    fn transform(&self, frame: &TimeFrame) -> Result<TimeFrame> {
        let residuals = map_with_trend(frame, self.trends(), |v, t| v - t)?;
        rename_columns(&residuals, &self.output_name)
    }
}
