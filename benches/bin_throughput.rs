//! Add and query throughput of the bin implementations
//!
//! Run with: cargo bench --bench bin_throughput

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;
use rand_distr::Normal;
use stream_bins::prelude::*;

/// Generate normal data
fn generate_normal_data(size: usize, mean: f64, std: f64, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(mean, std).unwrap();
    (0..size).map(|_| normal.sample(&mut rng)).collect()
}

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_all_of");
    for &size in &[1_000, 10_000, 100_000] {
        let data = generate_normal_data(size, 100.0, 15.0, 42);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("static", size), &data, |b, data| {
            b.iter(|| {
                let mut bin = StaticBin1D::new();
                bin.add_all_of(black_box(data));
                bin.sum()
            })
        });
        group.bench_with_input(BenchmarkId::new("mighty", size), &data, |b, data| {
            b.iter(|| {
                let mut bin = MightyStaticBin1D::new(MomentConfig::full(6));
                bin.add_all_of(black_box(data));
                bin.sum()
            })
        });
        group.bench_with_input(BenchmarkId::new("quantile_gk", size), &data, |b, data| {
            b.iter(|| {
                let mut bin = QuantileBin1D::new(0.001).unwrap();
                bin.add_all_of(black_box(data));
                bin.size()
            })
        });
        group.bench_with_input(BenchmarkId::new("dynamic", size), &data, |b, data| {
            b.iter(|| {
                let mut bin = DynamicBin1D::new();
                bin.add_all_of(black_box(data));
                bin.size()
            })
        });
    }
    group.finish();
}

fn bench_buffered_add(c: &mut Criterion) {
    let data = generate_normal_data(100_000, 0.0, 1.0, 7);
    let mut group = c.benchmark_group("single_adds");
    group.throughput(Throughput::Elements(data.len() as u64));

    for &capacity in &[1, 64, 1024] {
        group.bench_with_input(BenchmarkId::new("quantile_gk", capacity), &data, |b, data| {
            b.iter(|| {
                let mut bin = QuantileBin1D::new(0.001).unwrap();
                {
                    let mut buffer = bin.buffered(capacity);
                    for &x in data {
                        buffer.add(black_box(x));
                    }
                }
                bin.size()
            })
        });
    }
    group.finish();
}

fn bench_quantiles(c: &mut Criterion) {
    let mut group = c.benchmark_group("quantiles");
    let phis: Vec<f64> = (1..100).map(|i| i as f64 / 100.0).collect();

    for &size in &[10_000, 100_000] {
        let data = generate_normal_data(size, 0.0, 1.0, 11);
        let mut gk = QuantileBin1D::new(0.001).unwrap();
        gk.add_all_of(&data);
        let mut dynamic = DynamicBin1D::new();
        dynamic.add_all_of(&data);
        dynamic.sort();

        group.bench_with_input(BenchmarkId::new("quantile_gk", size), &gk, |b, bin| {
            b.iter(|| bin.quantiles(black_box(&phis)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("dynamic_sorted", size), &dynamic, |b, bin| {
            b.iter(|| bin.quantiles(black_box(&phis)).unwrap())
        });
    }
    group.finish();
}

fn bench_bootstrap(c: &mut Criterion) {
    let mut group = c.benchmark_group("bootstrap");
    let mut a = DynamicBin1D::new();
    a.add_all_of(&generate_normal_data(500, 100.0, 15.0, 1));
    let mut b = DynamicBin1D::new();
    b.add_all_of(&generate_normal_data(500, 101.0, 15.0, 2));

    for &resamples in &[100, 1000] {
        group.bench_with_input(
            BenchmarkId::new("mean_difference", resamples),
            &resamples,
            |bench, &resamples| {
                let mut rng = StdRng::seed_from_u64(3);
                bench.iter(|| {
                    a.sample_bootstrap(&b, resamples, &mut rng, |x, y| x.mean() - y.mean())
                        .unwrap()
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_add, bench_buffered_add, bench_quantiles, bench_bootstrap);
criterion_main!(benches);
