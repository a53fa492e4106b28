//! Configuration of the optional measures a moment bin records

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Optional running sums a bin maintains besides the basic scalars
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Measures: u8 {
        /// `Σ ln(x)`
        const SUM_OF_LOGARITHMS = 1 << 0;
        /// `Σ 1/x`
        const SUM_OF_INVERSIONS = 1 << 1;
    }
}

/// Which extra measures a moment bin computes on every add.
///
/// Each enabled measure adds a running sum to the per-element cost, so
/// disable what you do not need. Orders 0, 1 and 2 of the sums of powers are
/// always available through size, sum and sum of squares.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MomentConfig {
    pub has_sum_of_logarithms: bool,
    pub has_sum_of_inversions: bool,
    pub max_order_for_sum_of_powers: i32,
}

impl Default for MomentConfig {
    fn default() -> Self {
        Self {
            has_sum_of_logarithms: false,
            has_sum_of_inversions: false,
            max_order_for_sum_of_powers: 2,
        }
    }
}

impl MomentConfig {
    /// Create a config recording the given measures
    pub fn new(
        has_sum_of_logarithms: bool,
        has_sum_of_inversions: bool,
        max_order_for_sum_of_powers: i32,
    ) -> Self {
        Self {
            has_sum_of_logarithms,
            has_sum_of_inversions,
            max_order_for_sum_of_powers,
        }
    }

    /// Record every optional measure, with sums of powers up to `max_order`
    pub fn full(max_order: i32) -> Self {
        Self::new(true, true, max_order)
    }

    pub fn with_sum_of_logarithms(mut self, enabled: bool) -> Self {
        self.has_sum_of_logarithms = enabled;
        self
    }

    pub fn with_sum_of_inversions(mut self, enabled: bool) -> Self {
        self.has_sum_of_inversions = enabled;
        self
    }

    pub fn with_max_order(mut self, max_order: i32) -> Self {
        self.max_order_for_sum_of_powers = max_order;
        self
    }

    /// The capability flags this config enables
    pub fn measures(&self) -> Measures {
        let mut measures = Measures::empty();
        measures.set(Measures::SUM_OF_LOGARITHMS, self.has_sum_of_logarithms);
        measures.set(Measures::SUM_OF_INVERSIONS, self.has_sum_of_inversions);
        measures
    }

    /// Highest recorded power order; never below 2
    pub fn effective_max_order(&self) -> i32 {
        self.max_order_for_sum_of_powers.max(2)
    }
}
