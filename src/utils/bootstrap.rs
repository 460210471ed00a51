//! Bootstrap significance testing for correlation statistics.
//!
//! Each resample draws row positions with replacement from the paired
//! observations, so every `(candidate, reference)` pair stays together.
//! The p-value is the fraction of resamples whose absolute statistic
//! reaches the observed one.

use crate::utils::stats::CorrelationFn;
use rand::prelude::*;
use rand::SeedableRng;

/// Configuration for bootstrap significance testing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapConfig {
    /// Number of resamples to draw (0 disables the test).
    pub iterations: usize,
    /// Observations drawn per resample.
    pub samples: usize,
    /// Random seed for reproducibility (None for random).
    pub seed: Option<u64>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            iterations: 0,
            samples: 100,
            seed: None,
        }
    }
}

impl BootstrapConfig {
    /// Create a config drawing `iterations` resamples of `samples` observations.
    pub fn new(iterations: usize, samples: usize) -> Self {
        Self {
            iterations,
            samples,
            ..Default::default()
        }
    }

    /// Set random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Whether resampling is requested at all.
    pub fn is_enabled(&self) -> bool {
        self.iterations > 0
    }

    /// Build the random source described by this config.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Draw `size` row positions in `0..n` with replacement.
fn resample_rows(n: usize, size: usize, rng: &mut impl Rng) -> Vec<usize> {
    (0..size).map(|_| rng.gen_range(0..n)).collect()
}

/// Estimate the p-value of an observed correlation by bootstrap.
///
/// # Arguments
/// * `candidate` - Valid candidate observations, paired by position with `reference`
/// * `reference` - Valid reference observations
/// * `observed` - The observed statistic to test
/// * `statistic` - Correlation function applied to every resample
/// * `config` - Number and size of resamples
/// * `rng` - Random source
///
/// # Returns
/// Fraction of resamples with `|statistic| >= |observed|`. Resamples with
/// an undefined statistic never count as exceeding. `NaN` if the inputs are
/// empty or of different lengths, the observed value is undefined, or no
/// iterations are requested.
pub fn bootstrap_p_value(
    candidate: &[f64],
    reference: &[f64],
    observed: f64,
    statistic: CorrelationFn,
    config: &BootstrapConfig,
    rng: &mut impl Rng,
) -> f64 {
    let n = candidate.len();
    if n == 0 || n != reference.len() || observed.is_nan() || config.iterations == 0 {
        return f64::NAN;
    }

    let threshold = observed.abs();
    let mut exceed = 0usize;

    for _ in 0..config.iterations {
        let rows = resample_rows(n, config.samples, rng);
        let x: Vec<f64> = rows.iter().map(|&i| candidate[i]).collect();
        let y: Vec<f64> = rows.iter().map(|&i| reference[i]).collect();
        let value = statistic(&x, &y);
        if value.abs() >= threshold {
            exceed += 1;
        }
    }

    exceed as f64 / config.iterations as f64
}
