//! Streaming descriptive statistics with bounded memory
//!
//! This crate re-exports the bin hierarchy:
//!
//! - [`bins_core`]: the [`Bin1D`]/[`MomentBin1D`] traits and the
//!   constant-memory [`StaticBin1D`] and [`MightyStaticBin1D`]
//! - [`bins_quantile`]: [`QuantileBin1D`], with quantiles within `epsilon * N`
//!   ranks from a Greenwald-Khanna summary, and quantile-based rebinning
//! - [`bins_dynamic`]: [`DynamicBin1D`], which keeps every element for exact
//!   quantiles, resampling and bootstrap, and the thread-safe [`SharedBin`]
//!
//! # Example
//!
//! ```rust
//! use stream_bins::prelude::*;
//!
//! let data: Vec<f64> = (1..=10_000).map(f64::from).collect();
//!
//! let mut approx = QuantileBin1D::new(0.001).unwrap();
//! let mut exact = DynamicBin1D::new();
//! approx.add_all_of(&data);
//! exact.add_all_of(&data);
//!
//! assert_eq!(approx.mean(), exact.mean());
//! let error = (approx.median().unwrap() - exact.median().unwrap()).abs();
//! assert!(error <= 0.002 * 10_000.0);
//! ```

pub use bins_core;
pub use bins_dynamic;
pub use bins_quantile;

pub use bins_core::{
    BinSnapshot, Bin1D, BufferedBin, ElementBuffer, Error, MightyStaticBin1D, MomentBin1D,
    MomentConfig, Result, StaticBin1D,
};
pub use bins_dynamic::{DynamicBin1D, SharedBin};
pub use bins_quantile::{QuantileBin1D, QuantileBinConfig, QuantileEstimator};

/// Everything needed to create, feed and query bins
pub mod prelude {
    pub use bins_core::{Bin1D, ElementBuffer, MightyStaticBin1D, MomentBin1D, MomentConfig, StaticBin1D};
    pub use bins_dynamic::{DynamicBin1D, SharedBin};
    pub use bins_quantile::{QuantileBin1D, QuantileBinConfig, QuantileEstimator};
}
