//! Benchmarks for riskdecomp-math operations.
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use ndarray::{Array1, Array2};
use rand::Rng;
use riskdecomp_math::{SlidingMoments, quadratic_form, sample_covariance, sample_std};

fn random_array(n: usize) -> Array1<f64> {
    let mut rng = rand::thread_rng();
    Array1::from_iter((0..n).map(|_| rng.r#gen::<f64>() * 0.1 - 0.05))
}

fn random_matrix(rows: usize, cols: usize) -> Array2<f64> {
    let mut rng = rand::thread_rng();
    Array2::from_shape_fn((rows, cols), |_| rng.r#gen::<f64>() * 0.1 - 0.05)
}

fn bench_sample_covariance(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample_covariance");
    group.sample_size(50);

    for (n_obs, n_assets) in [(252, 10), (252, 100), (1260, 100), (1260, 500)] {
        group.throughput(Throughput::Elements((n_obs * n_assets) as u64));
        group.bench_with_input(
            BenchmarkId::new("obs_assets", format!("{n_obs}x{n_assets}")),
            &(n_obs, n_assets),
            |b, &(n_obs, n_assets)| {
                let returns = random_matrix(n_obs, n_assets);
                b.iter(|| sample_covariance(black_box(&returns)).unwrap());
            },
        );
    }

    group.finish();
}

fn bench_quadratic_form(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadratic_form");

    for n_assets in [10, 100, 500, 1000] {
        group.throughput(Throughput::Elements((n_assets * n_assets) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n_assets), &n_assets, |b, &n| {
            let weights = random_array(n);
            let matrix = random_matrix(n, n);
            b.iter(|| quadratic_form(black_box(&weights), black_box(&matrix)).unwrap());
        });
    }

    group.finish();
}

fn bench_rolling_std(c: &mut Criterion) {
    let mut group = c.benchmark_group("rolling_std");
    let window = 63;

    for size in [1000, 10000, 100000] {
        group.throughput(Throughput::Elements(size as u64));
        let data = random_array(size).to_vec();

        group.bench_with_input(BenchmarkId::new("recompute", size), &data, |b, data| {
            b.iter(|| {
                data.windows(window).map(|w| sample_std(black_box(w)).unwrap()).sum::<f64>()
            });
        });

        group.bench_with_input(BenchmarkId::new("sliding", size), &data, |b, data| {
            b.iter(|| {
                let mut acc = SlidingMoments::from_slice(&data[..window]);
                let mut total = acc.moments().sample_std().unwrap_or(0.0);
                for end in window..data.len() {
                    acc.slide(data[end - window], black_box(data[end]));
                    total += acc.moments().sample_std().unwrap_or(0.0);
                }
                total
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_sample_covariance, bench_quadratic_form, bench_rolling_std);

criterion_main!(benches);
