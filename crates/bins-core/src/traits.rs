//! Core traits shared by every bin
//!
//! [`Bin1D`] is the small capability interface all accumulators expose: adding
//! elements and reading the basic scalars. [`MomentBin1D`] adds the optional
//! measures (logarithms, inversions, higher sums of powers) and the statistics
//! derived from them. Quantile capabilities live in the `bins-quantile` crate.

use crate::buffer::BufferedBin;
use crate::descriptive;
use crate::report;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Value snapshot of the basic scalars of a bin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BinSnapshot {
    pub size: usize,
    pub min: f64,
    pub max: f64,
    pub sum: f64,
    pub sum_of_squares: f64,
}

/// A one-dimensional accumulator of real-valued samples
///
/// # API Convention
///
/// - Mutators take `&mut self`, readers `&self`. Share a bin across threads
///   by wrapping it (see `SharedBin` in `bins-dynamic`).
/// - Statistics that are undefined for the current size (mean of an empty
///   bin, variance of a single element) are NaN; `min`/`max` of an empty bin
///   are `+∞`/`-∞`.
pub trait Bin1D: Send + Sync {
    /// Short type name used as the header of diagnostic dumps
    fn name(&self) -> &'static str;

    /// Add every element of `elements`
    fn add_all_of(&mut self, elements: &[f64]);

    /// Add a single element
    fn add(&mut self, element: f64) {
        self.add_all_of(std::slice::from_ref(&element));
    }

    /// Add `list[from..=to]`.
    ///
    /// Fails with [`Error::IndexOutOfBounds`] unless `from <= to < list.len()`;
    /// nothing is added on failure.
    fn add_all_of_from_to(&mut self, list: &[f64], from: usize, to: usize) -> Result<()> {
        Error::check_range(from, to, list.len())?;
        self.add_all_of(&list[from..=to]);
        Ok(())
    }

    /// Remove all elements and reset every aggregate
    fn clear(&mut self);

    /// Number of elements currently counted
    fn size(&self) -> usize;

    fn min(&self) -> f64;

    fn max(&self) -> f64;

    fn sum(&self) -> f64;

    fn sum_of_squares(&self) -> f64;

    /// Whether the bin retains its elements and can be rebinned
    fn is_rebinnable(&self) -> bool;

    /// Release excess capacity
    fn trim_to_size(&mut self) {}

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    fn mean(&self) -> f64 {
        descriptive::mean(self.size(), self.sum())
    }

    fn rms(&self) -> f64 {
        descriptive::rms(self.size(), self.sum_of_squares())
    }

    /// Sample variance
    fn variance(&self) -> f64 {
        descriptive::sample_variance(self.size(), self.sum(), self.sum_of_squares())
    }

    fn standard_deviation(&self) -> f64 {
        self.variance().sqrt()
    }

    fn standard_error(&self) -> f64 {
        descriptive::standard_error(self.size(), self.variance())
    }

    fn snapshot(&self) -> BinSnapshot {
        BinSnapshot {
            size: self.size(),
            min: self.min(),
            max: self.max(),
            sum: self.sum(),
            sum_of_squares: self.sum_of_squares(),
        }
    }

    /// Percentage deviations of the basic statistics from `other`.
    ///
    /// Diagnostic output only; the format is not stable.
    fn compare_with(&self, other: &dyn Bin1D) -> String {
        report::basic_differences(self, other)
    }

    /// Wrap the bin in a buffer that batches single adds
    fn buffered(&mut self, capacity: usize) -> BufferedBin<'_, Self>
    where
        Self: Sized,
    {
        BufferedBin::new(self, capacity)
    }
}

/// A bin that also records sums of logarithms, inversions and higher powers
pub trait MomentBin1D: Bin1D {
    fn has_sum_of_logarithms(&self) -> bool;

    fn has_sum_of_inversions(&self) -> bool;

    /// Lowest order `k` for which `sum_of_powers(k)` is available
    fn min_order_for_sum_of_powers(&self) -> i32;

    /// Highest order `k` for which `sum_of_powers(k)` is available
    fn max_order_for_sum_of_powers(&self) -> i32;

    fn has_sum_of_powers(&self, k: i32) -> bool {
        self.min_order_for_sum_of_powers() <= k && k <= self.max_order_for_sum_of_powers()
    }

    /// `Σ ln(x)`
    fn sum_of_logarithms(&self) -> Result<f64>;

    /// `Σ 1/x`
    fn sum_of_inversions(&self) -> Result<f64>;

    /// `Σ x^k`
    fn sum_of_powers(&self, k: i32) -> Result<f64>;

    /// `Σ(x - c)^k / size`
    fn moment(&self, k: i32, c: f64) -> Result<f64> {
        if k < 0 || !self.has_sum_of_powers(k) {
            return Err(Error::PowerOrderOutOfRange {
                order: k,
                min: 0,
                max: self.max_order_for_sum_of_powers(),
            });
        }
        let sums = (0..=k)
            .map(|j| self.sum_of_powers(j))
            .collect::<Result<Vec<_>>>()?;
        Ok(descriptive::moment_from_sums(k as usize, c, self.size(), &sums))
    }

    fn geometric_mean(&self) -> Result<f64> {
        Ok(descriptive::geometric_mean(
            self.size(),
            self.sum_of_logarithms()?,
        ))
    }

    fn harmonic_mean(&self) -> Result<f64> {
        Ok(descriptive::harmonic_mean(
            self.size(),
            self.sum_of_inversions()?,
        ))
    }

    /// Product of all elements, via the sum of logarithms
    fn product(&self) -> Result<f64> {
        Ok(descriptive::product(self.sum_of_logarithms()?))
    }

    fn skew(&self) -> Result<f64> {
        Ok(descriptive::skew(
            self.moment(3, self.mean())?,
            self.standard_deviation(),
        ))
    }

    /// Excess kurtosis
    fn kurtosis(&self) -> Result<f64> {
        Ok(descriptive::kurtosis(
            self.moment(4, self.mean())?,
            self.standard_deviation(),
        ))
    }

    /// Percentage deviations of basic and moment statistics from `other`
    fn compare_moments_with(&self, other: &dyn MomentBin1D) -> String {
        let mut out = report::basic_differences(self, other);
        out.push_str(&report::moment_differences(self, other));
        out
    }
}
