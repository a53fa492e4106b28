//! Construction parameters of a quantile bin

use bins_core::{Error, MomentConfig, Result};
use serde::{Deserialize, Serialize};

/// Accuracy and memory parameters of a [`QuantileBin1D`](crate::QuantileBin1D)
///
/// `epsilon` bounds the rank error of every quantile query to `epsilon * N`
/// elements with probability at least `1 - delta`. `epsilon == 0` requests
/// exact answers. When `known_n` is set, `n` is the exact (or upper bound of
/// the) stream size and may let the bin retain everything cheaply.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuantileBinConfig {
    pub known_n: bool,
    pub n: u64,
    pub epsilon: f64,
    pub delta: f64,
    /// Number of quantiles expected to be queried. Validated and serialized,
    /// but neither finder reads it.
    pub quantiles: usize,
    pub moments: MomentConfig,
}

impl Default for QuantileBinConfig {
    fn default() -> Self {
        Self {
            known_n: false,
            n: u64::MAX,
            epsilon: 0.001,
            delta: 0.001,
            quantiles: 10_000,
            moments: MomentConfig::default(),
        }
    }
}

impl QuantileBinConfig {
    /// Declare the stream size (or an upper bound of it)
    pub fn with_known_n(mut self, n: u64) -> Self {
        self.known_n = true;
        self.n = n;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_delta(mut self, delta: f64) -> Self {
        self.delta = delta;
        self
    }

    pub fn with_quantiles(mut self, quantiles: usize) -> Self {
        self.quantiles = quantiles;
        self
    }

    pub fn with_moments(mut self, moments: MomentConfig) -> Self {
        self.moments = moments;
        self
    }

    /// Validate parameters
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(Error::invalid_parameter(format!(
                "epsilon {} must be in [0, 1]",
                self.epsilon
            )));
        }
        if !(0.0..=1.0).contains(&self.delta) {
            return Err(Error::invalid_parameter(format!(
                "delta {} must be in [0, 1]",
                self.delta
            )));
        }
        if self.quantiles == 0 {
            return Err(Error::invalid_parameter("quantiles must be at least 1"));
        }
        Ok(())
    }
}
