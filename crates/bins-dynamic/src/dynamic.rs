//! Rebinnable bin retaining every element

use crate::sampling::RandomSamplingAssistant;
use bins_core::descriptive::{self, BasicStats};
use bins_core::{report, Bin1D, Cached, ElementBuffer, Error, MomentBin1D, Result};
use bins_quantile::{check_phis, QuantileEstimator};
use rand::Rng;
use std::fmt;
use tracing::{instrument, trace};

/// Keeps every added element, which makes exact quantiles, sorting,
/// resampling, removal and arbitrary post-hoc statistics possible at the cost
/// of `O(n)` memory.
///
/// Aggregates (basic scalars, sum of logarithms, sum of inversions, sorted
/// view) are computed on first read and cached until the next mutation.
///
/// # Element order
///
/// With `fixed_order` off (the default), [`sort`](Self::sort) sorts the
/// elements in place and insertion order is lost. With `fixed_order` on, a
/// separate sorted copy is kept and [`elements`](Self::elements) always
/// returns insertion order, at twice the memory. Sorted-view queries on a bin
/// that has not been sorted in place build that copy lazily either way.
#[derive(Debug, Clone, Default)]
pub struct DynamicBin1D {
    elements: Vec<f64>,
    fixed_order: bool,
    /// `elements` itself is in ascending order
    is_sorted: bool,
    sorted_shadow: Cached<Vec<f64>>,
    stats: Cached<BasicStats>,
    sum_of_logarithms: Cached<Result<f64>>,
    sum_of_inversions: Cached<Result<f64>>,
}

impl DynamicBin1D {
    /// Create an empty bin
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty bin with room for `capacity` elements
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    pub fn fixed_order(&self) -> bool {
        self.fixed_order
    }

    /// Whether [`elements`](Self::elements) must keep insertion order
    pub fn set_fixed_order(&mut self, fixed_order: bool) {
        self.fixed_order = fixed_order;
    }

    fn invalidate_all(&mut self) {
        self.is_sorted = false;
        self.sorted_shadow.invalidate();
        self.invalidate_aggregates();
    }

    fn invalidate_aggregates(&mut self) {
        self.stats.invalidate();
        self.sum_of_logarithms.invalidate();
        self.sum_of_inversions.invalidate();
    }

    fn basic(&self) -> &BasicStats {
        self.stats.get_or_compute(|| BasicStats::of(&self.elements))
    }

    fn sorted_view(&self) -> &[f64] {
        if self.is_sorted {
            return &self.elements;
        }
        self.sorted_shadow.get_or_compute(|| {
            trace!(size = self.elements.len(), "building sorted view");
            let mut sorted = self.elements.clone();
            sorted.sort_by(f64::total_cmp);
            sorted
        })
    }

    /// Copy of the elements, in insertion order unless the bin was sorted in place
    pub fn elements(&self) -> Vec<f64> {
        self.elements.clone()
    }

    /// Copy of the elements in ascending order
    pub fn sorted_elements(&self) -> Vec<f64> {
        self.sorted_view().to_vec()
    }

    /// The live element buffer, without copying.
    ///
    /// The borrow keeps the bin from being mutated while the slice is in use.
    pub fn elements_slice(&self) -> &[f64] {
        &self.elements
    }

    /// The live sorted view, without copying
    pub fn sorted_elements_slice(&self) -> &[f64] {
        self.sorted_view()
    }

    /// Sort the elements.
    ///
    /// With `fixed_order` the sorted copy is populated and insertion order
    /// kept; otherwise the elements are sorted in place. Cached aggregates are
    /// computed first and stay valid.
    pub fn sort(&mut self) {
        if self.fixed_order {
            self.sorted_view();
            return;
        }
        if self.is_sorted {
            return;
        }
        self.basic();
        self.elements.sort_by(f64::total_cmp);
        self.is_sorted = true;
        self.sorted_shadow.invalidate();
    }

    /// Distinct values and their multiplicities, both ascending by value.
    ///
    /// Both output vectors are overwritten.
    pub fn frequencies(&self, distinct: &mut Vec<f64>, frequencies: &mut Vec<usize>) {
        descriptive::frequencies_sorted(self.sorted_view(), distinct, frequencies);
    }

    /// Remove every occurrence of every value contained in `list`.
    ///
    /// Returns whether the bin changed.
    pub fn remove_all_of(&mut self, list: &[f64]) -> bool {
        if list.is_empty() || self.elements.is_empty() {
            return false;
        }
        let mut doomed = list.to_vec();
        doomed.sort_by(f64::total_cmp);
        let contains = |x: f64| {
            let i = doomed.partition_point(|&d| d < x);
            i < doomed.len() && doomed[i] == x
        };

        let before = self.elements.len();
        self.elements.retain(|&x| !contains(x));
        if self.elements.len() == before {
            return false;
        }
        if let Some(shadow) = self.sorted_shadow.get_mut() {
            shadow.retain(|&x| !contains(x));
        }
        self.invalidate_aggregates();
        true
    }

    /// Replace every element `x` by `(x - mean) / standard_deviation`.
    ///
    /// This overwrites the stored elements; the original values cannot be
    /// recovered.
    pub fn standardize(&mut self, mean: f64, standard_deviation: f64) {
        for x in &mut self.elements {
            *x = (*x - mean) / standard_deviation;
        }
        self.invalidate_all();
    }

    /// Remove the `s` smallest and `l` largest elements.
    ///
    /// The remaining elements are left sorted.
    pub fn trim(&mut self, s: usize, l: usize) -> Result<()> {
        let n = self.elements.len();
        s.checked_add(l)
            .filter(|&trimmed| trimmed <= n)
            .ok_or(Error::InsufficientData {
                expected: s.saturating_add(l),
                actual: n,
            })?;
        if s == 0 && l == 0 {
            return Ok(());
        }
        let kept = self.sorted_view()[s..n - l].to_vec();
        self.elements = kept;
        self.invalidate_all();
        self.is_sorted = true;
        Ok(())
    }

    /// Mean with the `s` smallest and `l` largest elements excluded; the bin
    /// is not modified
    pub fn trimmed_mean(&self, s: usize, l: usize) -> Result<f64> {
        descriptive::trimmed_mean_sorted(self.sorted_view(), self.mean(), s, l)
    }

    /// Draw `n` elements into `buffer`, which is cleared first and flushed
    /// at the end.
    ///
    /// Without replacement, fails with [`Error::SampleTooLarge`] if
    /// `n > size()`; with replacement, fails on an empty bin.
    #[instrument(level = "trace", skip(self, rng, buffer), fields(size = self.elements.len()))]
    pub fn sample<R, E>(
        &self,
        n: usize,
        with_replacement: bool,
        rng: &mut R,
        buffer: &mut E,
    ) -> Result<()>
    where
        R: Rng + ?Sized,
        E: ElementBuffer + ?Sized,
    {
        let size = self.elements.len();
        if with_replacement {
            if n > 0 && size == 0 {
                return Err(Error::empty_bin());
            }
            buffer.clear();
            for _ in 0..n {
                buffer.add(self.elements[rng.gen_range(0..size)]);
            }
        } else {
            let assistant = RandomSamplingAssistant::new(n, size, rng)?;
            buffer.clear();
            assistant.for_each_pick(|i| buffer.add(self.elements[i]));
        }
        buffer.flush();
        Ok(())
    }

    /// Sample covariance with `other`; both bins must have equal size
    pub fn covariance(&self, other: &DynamicBin1D) -> Result<f64> {
        descriptive::covariance(&self.elements, &other.elements)
    }

    /// Pearson correlation with `other`; both bins must have equal size
    pub fn correlation(&self, other: &DynamicBin1D) -> Result<f64> {
        descriptive::correlation(
            &self.elements,
            self.standard_deviation(),
            &other.elements,
            other.standard_deviation(),
        )
    }

    /// Auto-correlation of the elements (in their stored order) at `lag`
    pub fn auto_correlation(&self, lag: usize) -> Result<f64> {
        descriptive::auto_correlation(&self.elements, lag, self.mean(), self.variance())
    }

    /// Fold `map(x)` over all elements with `combine`; NaN for an empty bin
    pub fn aggregate(&self, combine: impl Fn(f64, f64) -> f64, map: impl Fn(f64) -> f64) -> f64 {
        let mut mapped = self.elements.iter().map(|&x| map(x));
        match mapped.next() {
            Some(first) => mapped.fold(first, combine),
            None => f64::NAN,
        }
    }
}

impl Bin1D for DynamicBin1D {
    fn name(&self) -> &'static str {
        "DynamicBin1D"
    }

    fn add_all_of(&mut self, elements: &[f64]) {
        if elements.is_empty() {
            return;
        }
        self.elements.extend_from_slice(elements);
        self.invalidate_all();
    }

    fn clear(&mut self) {
        self.elements.clear();
        self.invalidate_all();
    }

    fn size(&self) -> usize {
        self.elements.len()
    }

    fn min(&self) -> f64 {
        self.basic().min
    }

    fn max(&self) -> f64 {
        self.basic().max
    }

    fn sum(&self) -> f64 {
        self.basic().sum
    }

    fn sum_of_squares(&self) -> f64 {
        self.basic().sum_of_squares
    }

    fn is_rebinnable(&self) -> bool {
        true
    }

    fn trim_to_size(&mut self) {
        self.elements.shrink_to_fit();
    }
}

impl MomentBin1D for DynamicBin1D {
    fn has_sum_of_logarithms(&self) -> bool {
        true
    }

    fn has_sum_of_inversions(&self) -> bool {
        true
    }

    fn min_order_for_sum_of_powers(&self) -> i32 {
        i32::MIN
    }

    fn max_order_for_sum_of_powers(&self) -> i32 {
        i32::MAX
    }

    fn sum_of_logarithms(&self) -> Result<f64> {
        self.sum_of_logarithms
            .get_or_compute(|| match self.elements.iter().find(|&&x| !(x > 0.0)) {
                Some(&value) => Err(Error::DomainViolation {
                    measure: "sum of logarithms",
                    value,
                }),
                None => Ok(descriptive::sum_of_logarithms(&self.elements)),
            })
            .clone()
    }

    fn sum_of_inversions(&self) -> Result<f64> {
        self.sum_of_inversions
            .get_or_compute(|| match self.elements.iter().find(|&&x| x == 0.0) {
                Some(&value) => Err(Error::DomainViolation {
                    measure: "sum of inversions",
                    value,
                }),
                None => Ok(descriptive::sum_of_inversions(&self.elements)),
            })
            .clone()
    }

    fn sum_of_powers(&self, k: i32) -> Result<f64> {
        match k {
            -1 => self.sum_of_inversions(),
            0 => Ok(self.size() as f64),
            1 => Ok(self.sum()),
            2 => Ok(self.sum_of_squares()),
            _ => Ok(descriptive::sum_of_powers(&self.elements, k)),
        }
    }

    /// `Σ(x - c)^k / size`, computed exactly from the elements on every call
    fn moment(&self, k: i32, c: f64) -> Result<f64> {
        Ok(descriptive::moment(&self.elements, k, c))
    }
}

impl QuantileEstimator for DynamicBin1D {
    /// Exact quantiles, linearly interpolated between order statistics
    fn quantiles(&self, phis: &[f64]) -> Result<Vec<f64>> {
        check_phis(phis)?;
        Error::check_size(self.size(), 1)?;
        Ok(descriptive::quantiles_sorted(self.sorted_view(), phis))
    }

    fn quantile_inverse(&self, x: f64) -> Result<f64> {
        Error::check_size(self.size(), 1)?;
        Ok(descriptive::quantile_inverse_sorted(self.sorted_view(), x))
    }
}

/// Multiset equality: same size, min and max, and the same sorted elements.
///
/// Sums are not compared separately; they are functions of the sorted
/// elements and would only differ by summation-order rounding.
impl PartialEq for DynamicBin1D {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        self.size() == other.size()
            && self.min() == other.min()
            && self.max() == other.max()
            && self.sorted_view() == other.sorted_view()
    }
}

impl fmt::Display for DynamicBin1D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        report::write_basic(f, self)?;
        report::write_moments(f, self)?;
        bins_quantile::report::write_quantiles(f, self)
    }
}
