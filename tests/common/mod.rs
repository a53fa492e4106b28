//! Shared utilities for integration tests

#![allow(dead_code)]

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal, Uniform};
use tracing_subscriber::EnvFilter;

/// Route `tracing` output to the test harness, filtered by `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs the subscriber.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Seeded uniform data on `[low, high)`
pub fn uniform_data(n: usize, low: f64, high: f64, seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let dist = Uniform::new(low, high);
    (0..n).map(|_| dist.sample(&mut rng)).collect()
}

/// Seeded normal data
pub fn normal_data(n: usize, mean: f64, std: f64, seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let normal = Normal::new(mean, std).unwrap();
    (0..n).map(|_| normal.sample(&mut rng)).collect()
}

/// Rank distance between `value` and rank `target` (1-based) of sorted data
pub fn rank_error(sorted: &[f64], value: f64, target: f64) -> f64 {
    let lo = sorted.partition_point(|&x| x < value) as f64 + 1.0;
    let hi = sorted.partition_point(|&x| x <= value) as f64;
    if target < lo {
        lo - target
    } else if target > hi {
        target - hi
    } else {
        0.0
    }
}
