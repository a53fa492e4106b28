//! Two-sample bootstrap over dynamic bins

use crate::dynamic::DynamicBin1D;
use bins_core::{Bin1D, Error, Result};
use rand::Rng;
use tracing::{debug, instrument};

/// Resampled elements are handed to the scratch bins in batches of this size
const RESAMPLE_BATCH: usize = 1000;

impl DynamicBin1D {
    /// Bootstrap distribution of a two-sample statistic.
    ///
    /// Each of the `resamples` rounds draws `size()` elements with
    /// replacement from `self` and `other.size()` elements with replacement
    /// from `other`, and records `statistic(sample1, sample2)`. The returned
    /// bin holds one value per round; its quantiles give percentile
    /// confidence intervals.
    ///
    /// Both bins must be non-empty.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bins_core::Bin1D;
    /// use bins_dynamic::DynamicBin1D;
    /// use bins_quantile::QuantileEstimator;
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    ///
    /// let mut a = DynamicBin1D::new();
    /// a.add_all_of(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    /// let b = a.clone();
    ///
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let diffs = a
    ///     .sample_bootstrap(&b, 200, &mut rng, |x, y| x.median().unwrap() - y.median().unwrap())
    ///     .unwrap();
    /// assert_eq!(diffs.size(), 200);
    /// ```
    #[instrument(level = "debug", skip(self, other, rng, statistic), fields(n1 = self.size(), n2 = other.size()))]
    pub fn sample_bootstrap<R, F>(
        &self,
        other: &DynamicBin1D,
        resamples: usize,
        rng: &mut R,
        mut statistic: F,
    ) -> Result<DynamicBin1D>
    where
        R: Rng + ?Sized,
        F: FnMut(&DynamicBin1D, &DynamicBin1D) -> f64,
    {
        Error::check_size(self.size(), 1)?;
        Error::check_size(other.size(), 1)?;

        let mut sample1 = DynamicBin1D::with_capacity(self.size());
        let mut sample2 = DynamicBin1D::with_capacity(other.size());
        let mut estimates = Vec::with_capacity(resamples);

        for _ in 0..resamples {
            sample1.clear();
            sample2.clear();
            {
                let mut buffer = sample1.buffered(RESAMPLE_BATCH.min(self.size()));
                self.sample(self.size(), true, rng, &mut buffer)?;
            }
            {
                let mut buffer = sample2.buffered(RESAMPLE_BATCH.min(other.size()));
                other.sample(other.size(), true, rng, &mut buffer)?;
            }
            estimates.push(statistic(&sample1, &sample2));
        }

        let mut result = DynamicBin1D::with_capacity(resamples);
        result.add_all_of(&estimates);
        debug!(resamples, mean = result.mean(), "bootstrap complete");
        Ok(result)
    }
}
