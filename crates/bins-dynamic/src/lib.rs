//! Bins that keep every element
//!
//! [`DynamicBin1D`] trades `O(n)` memory for exact answers: quantiles,
//! moments of any order, correlation, trimming and resampling. Alongside it:
//!
//! - [`sampling`]: selection sampling of random subsets
//! - [`DynamicBin1D::sample_bootstrap`]: two-sample bootstrap distributions
//! - [`SharedBin`]: a lock-protected handle for feeding a bin from many threads
//!
//! # Example
//!
//! ```rust
//! use bins_core::Bin1D;
//! use bins_dynamic::DynamicBin1D;
//! use bins_quantile::QuantileEstimator;
//!
//! let mut bin = DynamicBin1D::new();
//! bin.add_all_of(&[9.0, 1.0, 5.0, 3.0, 7.0]);
//!
//! assert_eq!(bin.median().unwrap(), 5.0);
//! bin.trim(1, 1).unwrap();
//! assert_eq!(bin.elements(), vec![3.0, 5.0, 7.0]);
//! ```

pub mod bootstrap;
pub mod dynamic;
pub mod sampling;
pub mod shared;

pub use dynamic::DynamicBin1D;
pub use sampling::{entropy_rng, sample_indices, RandomSamplingAssistant};
pub use shared::SharedBin;

// Re-export from bins-core
pub use bins_core::{Error, Result};
