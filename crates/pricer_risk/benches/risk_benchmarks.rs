//! Criterion benchmarks for pricer_risk.
//!
//! Benchmarks cover:
//! - Historical VaR over long return series
//! - Monte Carlo maximum-drawdown trials, sequential and parallel
//! - Efficient frontier construction by asset count

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nalgebra::{DMatrix, DVector};
use pricer_pricing::mc::{GbmParams, MonteCarloConfig};
use pricer_risk::drawdown::run_mc_drawdown_trials;
use pricer_risk::portfolio::EfficientFrontier;
use pricer_risk::var::historical_var_pct;

/// Deterministic pseudo-returns without pulling an RNG into the bench.
fn synthetic_returns(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 0.02 * ((i as f64 * 0.7).sin() + 0.5 * (i as f64 * 0.13).cos()))
        .collect()
}

/// Diagonally dominant covariance with mild cross terms.
fn synthetic_covariance(n: usize) -> DMatrix<f64> {
    DMatrix::from_fn(n, n, |i, j| {
        if i == j {
            0.04 + 0.01 * i as f64
        } else {
            0.002 / (1.0 + (i as f64 - j as f64).abs())
        }
    })
}

fn bench_historical_var(c: &mut Criterion) {
    let mut group = c.benchmark_group("historical_var");
    for n in [250, 2_500, 25_000] {
        let returns = synthetic_returns(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &returns, |b, r| {
            b.iter(|| historical_var_pct(black_box(r), 0.99, 10.0))
        });
    }
    group.finish();
}

fn bench_mc_drawdown(c: &mut Criterion) {
    let params = GbmParams {
        spot: 100.0,
        maturity: 1.0,
        drift: 0.07,
        volatility: 0.25,
        periods_per_year: 252,
    };
    let mut group = c.benchmark_group("mc_drawdown_10k");
    group.sample_size(10);
    for parallel in [false, true] {
        let config = MonteCarloConfig::builder()
            .n_trials(10_000)
            .seed(42)
            .parallel(parallel)
            .build()
            .unwrap();
        let label = if parallel { "parallel" } else { "sequential" };
        group.bench_function(label, |b| {
            b.iter(|| run_mc_drawdown_trials(black_box(params), &config))
        });
    }
    group.finish();
}

fn bench_frontier(c: &mut Criterion) {
    let mut group = c.benchmark_group("efficient_frontier");
    for n in [5, 20, 100] {
        let expected = DVector::from_fn(n, |i, _| 0.05 + 0.002 * i as f64);
        let cov = synthetic_covariance(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| EfficientFrontier::new(black_box(expected.clone()), &cov))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_historical_var, bench_mc_drawdown, bench_frontier);
criterion_main!(benches);
