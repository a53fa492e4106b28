//! Constant-memory bin with optional moment measures

use crate::config::{Measures, MomentConfig};
use crate::descriptive::{self, BasicStats};
use crate::report;
use crate::static_bin::StaticBin1D;
use crate::traits::{Bin1D, MomentBin1D};
use crate::{Error, Result};
use std::fmt;
use tracing::warn;

/// A [`StaticBin1D`] that additionally records the sum of logarithms, the sum
/// of inversions and sums of powers up to a configured order.
///
/// Each optional measure costs one running sum per added element. Elements
/// outside a measure's domain (`x <= 0` for logarithms, `x == 0` for
/// inversions) are still counted by every other aggregate; the first such
/// element is remembered and queries of the affected measure fail with
/// [`Error::DomainViolation`] until the bin is cleared.
#[derive(Debug, Clone, PartialEq)]
pub struct MightyStaticBin1D {
    base: StaticBin1D,
    measures: Measures,
    sum_of_logarithms: f64,
    sum_of_inversions: f64,
    /// `Σ x^k` for `k = 3..=max_order`
    higher_powers: Vec<f64>,
    logarithm_violation: Option<f64>,
    inversion_violation: Option<f64>,
}

impl MightyStaticBin1D {
    /// Create an empty bin recording the measures of `config`
    pub fn new(config: MomentConfig) -> Self {
        let higher_orders = (config.effective_max_order() - 2) as usize;
        Self {
            base: StaticBin1D::new(),
            measures: config.measures(),
            sum_of_logarithms: 0.0,
            sum_of_inversions: 0.0,
            higher_powers: vec![0.0; higher_orders],
            logarithm_violation: None,
            inversion_violation: None,
        }
    }

    /// Build a bin from already aggregated values.
    ///
    /// `higher_powers[j]` is taken as `Σ x^(j + 3)`; the result records no
    /// logarithms or inversions.
    pub fn from_parts(size: usize, stats: BasicStats, higher_powers: Vec<f64>) -> Self {
        Self {
            base: StaticBin1D::from_parts(size, stats),
            measures: Measures::empty(),
            sum_of_logarithms: 0.0,
            sum_of_inversions: 0.0,
            higher_powers,
            logarithm_violation: None,
            inversion_violation: None,
        }
    }

    /// The configuration this bin records
    pub fn config(&self) -> MomentConfig {
        MomentConfig::new(
            self.measures.contains(Measures::SUM_OF_LOGARITHMS),
            self.measures.contains(Measures::SUM_OF_INVERSIONS),
            self.max_order_for_sum_of_powers(),
        )
    }

    pub fn measures(&self) -> Measures {
        self.measures
    }

    /// The aggregated basic scalars
    pub fn stats(&self) -> BasicStats {
        self.base.stats()
    }

    fn record_violation(slot: &mut Option<f64>, measure: &'static str, value: f64) {
        if slot.is_none() {
            warn!(measure, value, "element outside measure domain");
            *slot = Some(value);
        }
    }
}

impl Default for MightyStaticBin1D {
    fn default() -> Self {
        Self::new(MomentConfig::default())
    }
}

impl Bin1D for MightyStaticBin1D {
    fn name(&self) -> &'static str {
        "MightyStaticBin1D"
    }

    fn add_all_of(&mut self, elements: &[f64]) {
        self.base.add_all_of(elements);

        if self.measures.contains(Measures::SUM_OF_LOGARITHMS) {
            self.sum_of_logarithms += descriptive::sum_of_logarithms(elements);
            if let Some(&bad) = elements.iter().find(|&&x| !(x > 0.0)) {
                Self::record_violation(&mut self.logarithm_violation, "sum of logarithms", bad);
            }
        }
        if self.measures.contains(Measures::SUM_OF_INVERSIONS) {
            self.sum_of_inversions += descriptive::sum_of_inversions(elements);
            if let Some(&bad) = elements.iter().find(|&&x| x == 0.0) {
                Self::record_violation(&mut self.inversion_violation, "sum of inversions", bad);
            }
        }
        descriptive::incremental_update_sums_of_powers(elements, 3, &mut self.higher_powers);
    }

    fn clear(&mut self) {
        self.base.clear();
        self.sum_of_logarithms = 0.0;
        self.sum_of_inversions = 0.0;
        self.higher_powers.iter_mut().for_each(|s| *s = 0.0);
        self.logarithm_violation = None;
        self.inversion_violation = None;
    }

    fn size(&self) -> usize {
        self.base.size()
    }

    fn min(&self) -> f64 {
        self.base.min()
    }

    fn max(&self) -> f64 {
        self.base.max()
    }

    fn sum(&self) -> f64 {
        self.base.sum()
    }

    fn sum_of_squares(&self) -> f64 {
        self.base.sum_of_squares()
    }

    fn is_rebinnable(&self) -> bool {
        false
    }
}

impl MomentBin1D for MightyStaticBin1D {
    fn has_sum_of_logarithms(&self) -> bool {
        self.measures.contains(Measures::SUM_OF_LOGARITHMS)
    }

    fn has_sum_of_inversions(&self) -> bool {
        self.measures.contains(Measures::SUM_OF_INVERSIONS)
    }

    fn min_order_for_sum_of_powers(&self) -> i32 {
        if self.has_sum_of_inversions() {
            -1
        } else {
            0
        }
    }

    fn max_order_for_sum_of_powers(&self) -> i32 {
        2 + self.higher_powers.len() as i32
    }

    fn sum_of_logarithms(&self) -> Result<f64> {
        if !self.has_sum_of_logarithms() {
            return Err(Error::MeasureNotRecorded {
                measure: "sum of logarithms",
            });
        }
        if let Some(value) = self.logarithm_violation {
            return Err(Error::DomainViolation {
                measure: "sum of logarithms",
                value,
            });
        }
        Ok(self.sum_of_logarithms)
    }

    fn sum_of_inversions(&self) -> Result<f64> {
        if !self.has_sum_of_inversions() {
            return Err(Error::MeasureNotRecorded {
                measure: "sum of inversions",
            });
        }
        if let Some(value) = self.inversion_violation {
            return Err(Error::DomainViolation {
                measure: "sum of inversions",
                value,
            });
        }
        Ok(self.sum_of_inversions)
    }

    fn sum_of_powers(&self, k: i32) -> Result<f64> {
        if !self.has_sum_of_powers(k) {
            return Err(Error::PowerOrderOutOfRange {
                order: k,
                min: self.min_order_for_sum_of_powers(),
                max: self.max_order_for_sum_of_powers(),
            });
        }
        match k {
            -1 => self.sum_of_inversions(),
            0 => Ok(self.size() as f64),
            1 => Ok(self.sum()),
            2 => Ok(self.sum_of_squares()),
            _ => Ok(self.higher_powers[(k - 3) as usize]),
        }
    }
}

impl fmt::Display for MightyStaticBin1D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        report::write_basic(f, self)?;
        report::write_moments(f, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn full_bin(data: &[f64]) -> MightyStaticBin1D {
        let mut bin = MightyStaticBin1D::new(MomentConfig::full(5));
        bin.add_all_of(data);
        bin
    }

    #[test]
    fn test_order_range_follows_config() {
        let plain = MightyStaticBin1D::default();
        assert_eq!(plain.min_order_for_sum_of_powers(), 0);
        assert_eq!(plain.max_order_for_sum_of_powers(), 2);
        assert!(!plain.has_sum_of_powers(3));

        let full = full_bin(&[]);
        assert_eq!(full.min_order_for_sum_of_powers(), -1);
        assert_eq!(full.max_order_for_sum_of_powers(), 5);
        assert_eq!(full.config(), MomentConfig::full(5));
    }

    #[test]
    fn test_sums_of_powers() {
        let data = [1.0, 2.0, 3.0];
        let bin = full_bin(&data);
        for k in -1..=5 {
            assert_relative_eq!(
                bin.sum_of_powers(k).unwrap(),
                descriptive::sum_of_powers(&data, k),
                epsilon = 1e-9
            );
        }
        assert!(matches!(
            bin.sum_of_powers(6),
            Err(Error::PowerOrderOutOfRange { order: 6, min: -1, max: 5 })
        ));
    }

    #[test]
    fn test_derived_means() {
        let bin = full_bin(&[1.0, 2.0, 4.0]);
        assert_relative_eq!(bin.geometric_mean().unwrap(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(bin.product().unwrap(), 8.0, epsilon = 1e-12);
        assert_relative_eq!(
            bin.harmonic_mean().unwrap(),
            3.0 / 1.75,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_moments_match_direct_computation() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let bin = full_bin(&data);
        for k in 0..=5 {
            assert_relative_eq!(
                bin.moment(k, bin.mean()).unwrap(),
                descriptive::moment(&data, k, 5.0),
                epsilon = 1e-9
            );
        }
        let sd = bin.standard_deviation();
        assert_relative_eq!(
            bin.skew().unwrap(),
            descriptive::moment(&data, 3, 5.0) / sd.powi(3),
            epsilon = 1e-9
        );
        assert_relative_eq!(
            bin.kurtosis().unwrap(),
            descriptive::moment(&data, 4, 5.0) / sd.powi(4) - 3.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_unrecorded_measures_fail() {
        let mut bin = MightyStaticBin1D::default();
        bin.add_all_of(&[1.0, 2.0]);
        assert!(matches!(
            bin.sum_of_logarithms(),
            Err(Error::MeasureNotRecorded { .. })
        ));
        assert!(bin.harmonic_mean().is_err());
        assert!(bin.skew().is_err());
    }

    #[test]
    fn test_domain_violation_is_reported_until_clear() {
        let mut bin = full_bin(&[1.0, 2.0]);
        bin.add_all_of(&[-3.0, 0.0]);

        assert_eq!(bin.size(), 4);
        assert_eq!(bin.sum(), 0.0);
        assert_eq!(
            bin.sum_of_logarithms(),
            Err(Error::DomainViolation {
                measure: "sum of logarithms",
                value: -3.0
            })
        );
        assert_eq!(
            bin.sum_of_inversions(),
            Err(Error::DomainViolation {
                measure: "sum of inversions",
                value: 0.0
            })
        );
        assert!(bin.geometric_mean().is_err());
        assert!(bin.sum_of_powers(-1).is_err());

        bin.clear();
        bin.add(2.0);
        assert_relative_eq!(bin.sum_of_logarithms().unwrap(), 2.0_f64.ln());
        assert_eq!(bin.sum_of_inversions().unwrap(), 0.5);
    }

    #[test]
    fn test_from_parts_keeps_higher_powers() {
        let data = [1.0, 2.0];
        let bin = MightyStaticBin1D::from_parts(
            2,
            BasicStats::of(&data),
            vec![9.0, 17.0],
        );
        assert_eq!(bin.max_order_for_sum_of_powers(), 4);
        assert_eq!(bin.sum_of_powers(4).unwrap(), 17.0);
        assert!(!bin.has_sum_of_logarithms());
    }

    #[test]
    fn test_display_includes_moments() {
        let bin = full_bin(&[1.0, 2.0, 4.0]);
        let text = bin.to_string();
        assert!(text.starts_with("MightyStaticBin1D\n"));
        assert!(text.contains("Geometric mean: "));
        assert!(text.contains("Sum of powers(5): "));
    }
}
