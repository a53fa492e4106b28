//! Core traits and accumulators for streaming statistics
//!
//! This crate provides the constant-memory layer of the bin hierarchy:
//!
//! - [`Bin1D`]: the minimal interface every bin implements (add elements,
//!   read size, min, max, sum, sum of squares and the statistics derived
//!   from them)
//! - [`MomentBin1D`]: optional sums of logarithms, inversions and higher
//!   powers, with geometric/harmonic means, skew and kurtosis
//! - [`StaticBin1D`] and [`MightyStaticBin1D`]: `O(1)`-memory implementations
//! - [`descriptive`]: the stateless routines the bins fold data with
//!
//! # Example
//!
//! ```rust
//! use bins_core::{Bin1D, MightyStaticBin1D, MomentBin1D, MomentConfig};
//!
//! let mut bin = MightyStaticBin1D::new(MomentConfig::full(4));
//! bin.add_all_of(&[1.0, 2.0, 4.0]);
//!
//! assert_eq!(bin.size(), 3);
//! assert!((bin.geometric_mean().unwrap() - 2.0).abs() < 1e-12);
//! ```

pub mod buffer;
pub mod cached;
pub mod config;
pub mod descriptive;
pub mod error;
pub mod mighty;
pub mod report;
pub mod static_bin;
pub mod traits;

pub use buffer::{BufferedBin, ElementBuffer};
pub use cached::Cached;
pub use config::{Measures, MomentConfig};
pub use descriptive::BasicStats;
pub use error::{Error, Result};
pub use mighty::MightyStaticBin1D;
pub use static_bin::StaticBin1D;
pub use traits::{Bin1D, BinSnapshot, MomentBin1D};
