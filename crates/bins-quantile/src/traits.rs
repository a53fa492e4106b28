//! Quantile queries and quantile-based rebinning

use crate::report;
use bins_core::{BasicStats, Bin1D, Error, MightyStaticBin1D, Result};
use tracing::{debug, instrument};

/// Check that `phis` are probabilities in ascending order
pub fn check_phis(phis: &[f64]) -> Result<()> {
    for &phi in phis {
        Error::check_probability(phi)?;
    }
    if phis.windows(2).any(|w| w[0] > w[1]) {
        return Err(Error::invalid_parameter(
            "Quantile probabilities must be sorted ascending",
        ));
    }
    Ok(())
}

/// A bin that can answer quantile queries, exactly or approximately.
///
/// Every query on an empty bin fails with [`Error::InsufficientData`].
pub trait QuantileEstimator: Bin1D {
    /// Quantiles at each of `phis`, which must be ascending and in `[0, 1]`
    fn quantiles(&self, phis: &[f64]) -> Result<Vec<f64>>;

    /// Fraction of elements `<= x`, interpolated between order statistics
    fn quantile_inverse(&self, x: f64) -> Result<f64>;

    /// Value at rank `phi`
    fn quantile(&self, phi: f64) -> Result<f64> {
        self.quantiles(&[phi])?
            .into_iter()
            .next()
            .ok_or_else(Error::empty_bin)
    }

    fn median(&self) -> Result<f64> {
        self.quantile(0.5)
    }

    /// Estimated number of elements in `[lo, hi]`; zero when `hi < lo`
    fn size_of_range(&self, lo: f64, hi: f64) -> Result<usize> {
        let fraction = self.quantile_inverse(hi)? - self.quantile_inverse(lo)?;
        Ok((self.size() as f64 * fraction).round().max(0.0) as usize)
    }

    /// Split the implied sorted sequence into `percentages.len() - 1` bins at
    /// the given cumulative-percentage boundaries.
    ///
    /// Each output bin is integrated from `k` equal-percentage sub-bins whose
    /// elements are all taken to equal the sub-bin's mid value
    /// `(lower quantile + upper quantile) / 2`. The returned bins are
    /// independent of `self` and record sums of powers up to order 4.
    #[instrument(level = "debug", skip(self, percentages), fields(boundaries = percentages.len()))]
    fn split_approximately(&self, percentages: &[f64], k: usize) -> Result<Vec<MightyStaticBin1D>> {
        if k < 1 {
            return Err(Error::invalid_parameter("Split resolution k must be at least 1"));
        }
        if percentages.len() < 2 {
            return Err(Error::invalid_parameter(
                "Splitting needs at least two percentage boundaries",
            ));
        }
        check_phis(percentages)?;

        let bins = percentages.len() - 1;
        let mut sub_percentages = Vec::with_capacity(bins * k + 1);
        for w in percentages.windows(2) {
            let step = (w[1] - w[0]) / k as f64;
            for j in 0..k {
                sub_percentages.push((w[0] + j as f64 * step).min(w[1]));
            }
        }
        sub_percentages.push(percentages[bins]);

        let quantiles = self.quantiles(&sub_percentages)?;
        let total = self.size() as f64;

        let split: Vec<MightyStaticBin1D> = (0..bins)
            .map(|i| {
                let first = i * k;
                let mut size = 0.0;
                let mut sums = [0.0; 4];
                for c in first..first + k {
                    let sub_size = total * (sub_percentages[c + 1] - sub_percentages[c]);
                    let mid = (quantiles[c] + quantiles[c + 1]) / 2.0;
                    size += sub_size;
                    let mut pow = mid;
                    for sum in sums.iter_mut() {
                        *sum += pow * sub_size;
                        pow *= mid;
                    }
                }
                let stats = BasicStats {
                    min: quantiles[first],
                    max: quantiles[first + k],
                    sum: sums[0],
                    sum_of_squares: sums[1],
                };
                MightyStaticBin1D::from_parts(size.round() as usize, stats, vec![sums[2], sums[3]])
            })
            .collect();

        debug!(bins, k, "split into approximate bins");
        Ok(split)
    }

    /// Split at absolute value boundaries (ascending), adding an underflow
    /// bin below the first and an overflow bin above the last boundary.
    fn split_approximately_by_axis(
        &self,
        boundaries: &[f64],
        k: usize,
    ) -> Result<Vec<MightyStaticBin1D>> {
        if boundaries.iter().any(|b| b.is_nan()) || boundaries.windows(2).any(|w| w[0] > w[1]) {
            return Err(Error::invalid_parameter(
                "Axis boundaries must be ascending numbers",
            ));
        }
        let mut percentages = Vec::with_capacity(boundaries.len() + 2);
        percentages.push(self.quantile_inverse(f64::NEG_INFINITY)?);
        for &boundary in boundaries {
            percentages.push(self.quantile_inverse(boundary)?);
        }
        percentages.push(self.quantile_inverse(f64::INFINITY)?);
        self.split_approximately(&percentages, k)
    }

    /// Percentage deviations of the basic statistics and quartiles from `other`.
    ///
    /// Diagnostic output only; the format is not stable.
    fn compare_quantiles_with(&self, other: &dyn QuantileEstimator) -> String {
        let mut out = bins_core::report::basic_differences(self, other);
        out.push_str(&report::quantile_differences(self, other));
        out
    }
}
