//! Approximate and exact quantile estimation over streams
//!
//! [`QuantileBin1D`] keeps the basic scalars and optional moment measures
//! exactly, and answers quantile queries through a [`QuantileFinder`]:
//!
//! - rank error at most `epsilon * N` for every query
//! - memory far below `O(N)` when `epsilon > 0` and the stream is large
//! - exact answers when `epsilon == 0`
//!
//! The [`QuantileEstimator`] trait also provides quantile-based rebinning
//! (`split_approximately`) for any bin implementing it.

pub mod bin;
pub mod config;
pub mod finder;
pub mod report;
pub mod traits;

pub use bin::QuantileBin1D;
pub use config::QuantileBinConfig;
pub use finder::{new_quantile_finder, ExactQuantileFinder, GreenwaldKhannaFinder, QuantileFinder};
pub use traits::{check_phis, QuantileEstimator};

// Re-export from bins-core
pub use bins_core::{Error, Result};
