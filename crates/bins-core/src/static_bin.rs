//! Constant-memory bin of the basic scalars

use crate::descriptive::{self, BasicStats};
use crate::report;
use crate::traits::Bin1D;
use std::fmt;

/// Accumulates size, min, max, sum and sum of squares without retaining
/// any element.
///
/// Adding `n` elements costs `O(n)`; every query is `O(1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticBin1D {
    size: usize,
    stats: BasicStats,
}

impl StaticBin1D {
    /// Create an empty bin
    pub fn new() -> Self {
        Self {
            size: 0,
            stats: BasicStats::EMPTY,
        }
    }

    /// Build a bin directly from already aggregated values
    pub fn from_parts(size: usize, stats: BasicStats) -> Self {
        Self { size, stats }
    }

    /// The aggregated scalars
    pub fn stats(&self) -> BasicStats {
        self.stats
    }
}

impl Default for StaticBin1D {
    fn default() -> Self {
        Self::new()
    }
}

impl Bin1D for StaticBin1D {
    fn name(&self) -> &'static str {
        "StaticBin1D"
    }

    fn add_all_of(&mut self, elements: &[f64]) {
        descriptive::incremental_update(elements, &mut self.stats);
        self.size += elements.len();
    }

    fn clear(&mut self) {
        *self = Self::new();
    }

    fn size(&self) -> usize {
        self.size
    }

    fn min(&self) -> f64 {
        self.stats.min
    }

    fn max(&self) -> f64 {
        self.stats.max
    }

    fn sum(&self) -> f64 {
        self.stats.sum
    }

    fn sum_of_squares(&self) -> f64 {
        self.stats.sum_of_squares
    }

    fn is_rebinnable(&self) -> bool {
        false
    }
}

impl fmt::Display for StaticBin1D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        report::write_basic(f, self)
    }
}
