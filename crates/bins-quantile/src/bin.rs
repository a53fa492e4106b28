//! Bin with exact moments and approximate quantiles

use crate::config::QuantileBinConfig;
use crate::finder::{new_quantile_finder, QuantileFinder};
use crate::report;
use crate::traits::{check_phis, QuantileEstimator};
use bins_core::{Bin1D, Error, MightyStaticBin1D, MomentBin1D, Result};
use std::fmt;

/// Tracks the basic scalars and optional moment measures exactly and feeds
/// the same elements to a quantile finder.
///
/// Memory is that of the finder: a Greenwald-Khanna summary of
/// `O((1/ε)·log(εN))` tuples, or every element when exact answers were
/// requested or are cheap. A clone shares the summary built so far and
/// keeps later additions to itself.
///
/// # Example
///
/// ```rust
/// use bins_core::Bin1D;
/// use bins_quantile::{QuantileBin1D, QuantileEstimator};
///
/// let mut bin = QuantileBin1D::new(0.01).unwrap();
/// bin.add_all_of(&(1..=1000).map(f64::from).collect::<Vec<_>>());
///
/// let median = bin.median().unwrap();
/// assert!((median - 500.0).abs() <= 10.0);
/// ```
#[derive(Debug, Clone)]
pub struct QuantileBin1D {
    moments: MightyStaticBin1D,
    finder: Box<dyn QuantileFinder>,
    config: QuantileBinConfig,
}

impl QuantileBin1D {
    /// Create a bin answering quantiles within `epsilon * N` ranks, with
    /// default confidence and an unknown stream size
    pub fn new(epsilon: f64) -> Result<Self> {
        Self::with_config(QuantileBinConfig::default().with_epsilon(epsilon))
    }

    pub fn with_config(config: QuantileBinConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            moments: MightyStaticBin1D::new(config.moments),
            finder: new_quantile_finder(&config),
            config,
        })
    }

    pub fn config(&self) -> &QuantileBinConfig {
        &self.config
    }

    /// Number of values the finder currently retains
    pub fn finder_memory(&self) -> usize {
        self.finder.memory()
    }

    /// Name of the finder implementation in use
    pub fn finder_name(&self) -> &'static str {
        self.finder.name()
    }
}

impl Bin1D for QuantileBin1D {
    fn name(&self) -> &'static str {
        "QuantileBin1D"
    }

    fn add_all_of(&mut self, elements: &[f64]) {
        self.moments.add_all_of(elements);
        self.finder.add_all_of(elements);
    }

    fn clear(&mut self) {
        self.moments.clear();
        self.finder.clear();
    }

    fn size(&self) -> usize {
        self.moments.size()
    }

    fn min(&self) -> f64 {
        self.moments.min()
    }

    fn max(&self) -> f64 {
        self.moments.max()
    }

    fn sum(&self) -> f64 {
        self.moments.sum()
    }

    fn sum_of_squares(&self) -> f64 {
        self.moments.sum_of_squares()
    }

    fn is_rebinnable(&self) -> bool {
        false
    }
}

impl MomentBin1D for QuantileBin1D {
    fn has_sum_of_logarithms(&self) -> bool {
        self.moments.has_sum_of_logarithms()
    }

    fn has_sum_of_inversions(&self) -> bool {
        self.moments.has_sum_of_inversions()
    }

    fn min_order_for_sum_of_powers(&self) -> i32 {
        self.moments.min_order_for_sum_of_powers()
    }

    fn max_order_for_sum_of_powers(&self) -> i32 {
        self.moments.max_order_for_sum_of_powers()
    }

    fn sum_of_logarithms(&self) -> Result<f64> {
        self.moments.sum_of_logarithms()
    }

    fn sum_of_inversions(&self) -> Result<f64> {
        self.moments.sum_of_inversions()
    }

    fn sum_of_powers(&self, k: i32) -> Result<f64> {
        self.moments.sum_of_powers(k)
    }
}

impl QuantileEstimator for QuantileBin1D {
    fn quantiles(&self, phis: &[f64]) -> Result<Vec<f64>> {
        check_phis(phis)?;
        if self.is_empty() {
            return Err(Error::empty_bin());
        }
        Ok(self.finder.quantile_elements(phis))
    }

    fn quantile_inverse(&self, x: f64) -> Result<f64> {
        if self.is_empty() {
            return Err(Error::empty_bin());
        }
        Ok(self.finder.phi(x))
    }
}

impl fmt::Display for QuantileBin1D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        bins_core::report::write_basic(f, self)?;
        bins_core::report::write_moments(f, self)?;
        report::write_quantiles(f, self)
    }
}
