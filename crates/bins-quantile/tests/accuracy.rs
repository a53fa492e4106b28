//! Accuracy of approximate quantile bins against exact order statistics

use bins_core::Bin1D;
use bins_quantile::{QuantileBin1D, QuantileBinConfig, QuantileEstimator};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

/// Distance in ranks between `value` and rank `target` of sorted data
fn rank_error(sorted: &[f64], value: f64, target: f64) -> f64 {
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

#[test]
fn test_median_rank_error_over_repeated_trials() {
    let epsilon = 0.01;
    let n = 100_000;
    let trials = 5;

    let mut within = 0;
    for seed in 0..trials {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let data: Vec<f64> = (0..n).map(|_| rng.gen::<f64>()).collect();

        let mut bin = QuantileBin1D::new(epsilon).unwrap();
        bin.add_all_of(&data);
        assert!(bin.finder_memory() < n / 10, "memory {}", bin.finder_memory());

        let mut sorted = data;
        sorted.sort_by(f64::total_cmp);
        let median = bin.median().unwrap();
        let error = rank_error(&sorted, median, (0.5 * n as f64).ceil());
        if error <= epsilon * n as f64 + 2.0 {
            within += 1;
        }
    }
    let delta = QuantileBinConfig::default().delta;
    assert!(within as f64 >= (1.0 - delta) * trials as f64);
}

#[test]
fn test_size_of_range_covers_everything() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let normal = Normal::new(10.0, 3.0).unwrap();
    let data: Vec<f64> = (0..50_000).map(|_| normal.sample(&mut rng)).collect();

    let mut bin = QuantileBin1D::new(0.01).unwrap();
    bin.add_all_of(&data);

    let covered = bin.size_of_range(bin.min(), bin.max()).unwrap() as f64;
    let size = bin.size() as f64;
    assert!((covered - size).abs() <= 0.01 * size, "covered {covered} of {size}");
}

#[test]
fn test_many_quantiles_at_once() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let data: Vec<f64> = (0..20_000).map(|_| rng.gen_range(-1.0..1.0)).collect();

    let mut bin = QuantileBin1D::new(0.005).unwrap();
    bin.add_all_of(&data);

    let phis: Vec<f64> = (1..100).map(|i| i as f64 / 100.0).collect();
    let estimates = bin.quantiles(&phis).unwrap();
    assert!(estimates.windows(2).all(|w| w[0] <= w[1]));

    let mut sorted = data;
    sorted.sort_by(f64::total_cmp);
    for (phi, value) in phis.iter().zip(estimates) {
        let target = (phi * sorted.len() as f64).ceil();
        assert!(rank_error(&sorted, value, target) <= 0.005 * sorted.len() as f64 + 2.0);
    }
}

#[test]
fn test_split_sizes_track_quantile_boundaries() {
    let mut rng = ChaCha8Rng::seed_from_u64(21);
    let data: Vec<f64> = (0..40_000).map(|_| rng.gen_range(0.0..100.0)).collect();

    let mut bin = QuantileBin1D::new(0.001).unwrap();
    bin.add_all_of(&data);

    let parts = bin.split_approximately(&[0.0, 0.1, 0.5, 1.0], 8).unwrap();
    let sizes: Vec<usize> = parts.iter().map(|p| p.size()).collect();
    assert_eq!(sizes, vec![4_000, 16_000, 20_000]);
    assert!((parts[2].mean() - 75.0).abs() < 1.0, "mean {}", parts[2].mean());
}

#[test]
fn test_config_from_json() {
    let config: QuantileBinConfig =
        serde_json::from_str(r#"{"epsilon": 0.0, "known_n": true, "n": 64}"#).unwrap();
    assert_eq!(config.delta, 0.001);

    let mut bin = QuantileBin1D::with_config(config).unwrap();
    assert_eq!(bin.finder_name(), "ExactQuantileFinder");
    bin.add_all_of(&[4.0, 8.0, 6.0]);
    assert_eq!(bin.median().unwrap(), 6.0);
}
