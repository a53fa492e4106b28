//! Quantile finders: the estimators a [`QuantileBin1D`](crate::QuantileBin1D)
//! feeds in lock-step with its exact scalars
//!
//! Two implementations are provided:
//!
//! - [`ExactQuantileFinder`] retains every value and answers exactly
//! - [`GreenwaldKhannaFinder`] keeps an ε-approximate summary whose size grows
//!   with `(1/ε)·log(εN)` rather than `N`
//!
//! [`new_quantile_finder`] picks one from a [`QuantileBinConfig`].

mod exact;
mod gk;

pub use exact::ExactQuantileFinder;
pub use gk::GreenwaldKhannaFinder;

use crate::config::QuantileBinConfig;
use std::fmt;
use tracing::debug;

/// Contract of a streaming quantile estimator
pub trait QuantileFinder: fmt::Debug + Send + Sync {
    /// Short name used in diagnostics
    fn name(&self) -> &'static str;

    /// Feed every value of `values`
    fn add_all_of(&mut self, values: &[f64]);

    /// Forget every value fed so far
    fn clear(&mut self);

    /// Estimated fraction of values `<= x`. NaN when nothing has been added.
    fn phi(&self, x: f64) -> f64;

    /// Estimated values at each of `phis` (ascending, in `[0, 1]`).
    /// NaN for every phi when nothing has been added.
    fn quantile_elements(&self, phis: &[f64]) -> Vec<f64>;

    /// Number of values fed
    fn size(&self) -> usize;

    /// Number of values currently retained
    fn memory(&self) -> usize;

    fn clone_box(&self) -> Box<dyn QuantileFinder>;
}

impl Clone for Box<dyn QuantileFinder> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Worst-case number of tuples a Greenwald-Khanna summary retains for `n` values
fn summary_bound(epsilon: f64, n: u64) -> f64 {
    let scaled = (2.0 * epsilon * n as f64).max(2.0);
    (11.0 / (2.0 * epsilon)) * scaled.log2()
}

/// Create the finder best suited to `config`.
///
/// An exact finder is chosen when `epsilon == 0`, or when the stream size is
/// known and retaining every value costs no more than the approximate
/// summary's worst case. Otherwise a Greenwald-Khanna summary is used; its
/// guarantee is deterministic, so any requested `delta` is met.
pub fn new_quantile_finder(config: &QuantileBinConfig) -> Box<dyn QuantileFinder> {
    let exact = config.epsilon <= 0.0
        || (config.known_n && config.n as f64 <= summary_bound(config.epsilon, config.n));

    let finder: Box<dyn QuantileFinder> = if exact {
        let capacity = if config.known_n {
            usize::try_from(config.n).unwrap_or(0).min(1 << 20)
        } else {
            0
        };
        Box::new(ExactQuantileFinder::with_capacity(capacity))
    } else {
        Box::new(GreenwaldKhannaFinder::with_epsilon(config.epsilon))
    };

    debug!(
        finder = finder.name(),
        epsilon = config.epsilon,
        delta = config.delta,
        known_n = config.known_n,
        n = config.n,
        "selected quantile finder"
    );
    finder
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_epsilon_is_exact() {
        let finder = new_quantile_finder(&QuantileBinConfig::default().with_epsilon(0.0));
        assert_eq!(finder.name(), "ExactQuantileFinder");
    }

    #[test]
    fn test_small_known_n_is_exact() {
        let config = QuantileBinConfig::default()
            .with_epsilon(0.01)
            .with_known_n(100);
        assert_eq!(new_quantile_finder(&config).name(), "ExactQuantileFinder");
    }

    #[test]
    fn test_unknown_n_is_approximate() {
        let config = QuantileBinConfig::default().with_epsilon(0.01);
        assert_eq!(new_quantile_finder(&config).name(), "GreenwaldKhannaFinder");

        let large = config.with_known_n(10_000_000);
        assert_eq!(new_quantile_finder(&large).name(), "GreenwaldKhannaFinder");
    }

    #[test]
    fn test_boxed_clone_is_deep() {
        let mut finder = new_quantile_finder(&QuantileBinConfig::default());
        finder.add_all_of(&[1.0, 2.0, 3.0]);
        let copy = finder.clone();
        finder.clear();
        assert_eq!(finder.size(), 0);
        assert_eq!(copy.size(), 3);
    }
}
