/*!
 * CWT benchmarks
 *
 * Single-frequency transform (direct vs. Fourier) and the full grid.
 */

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rust_spectral::cwt::{wavelet_grid, wavelet_transform_direct, wavelet_transform_fourier};
use rust_spectral::{AnalysisConfig, Boundary, Signal};
use std::f64::consts::PI;
use std::hint::black_box;

fn two_tone(n: usize, fs: f64) -> Signal {
    let samples: Vec<f64> = (0..n)
        .map(|i| {
            let t = i as f64 / fs;
            if i < n / 2 {
                (2.0 * PI * 100.0 * t).sin()
            } else {
                (2.0 * PI * 200.0 * t).sin()
            }
        })
        .collect();
    Signal::new(samples, fs).unwrap()
}

fn benchmark_single_frequency(c: &mut Criterion) {
    let mut group = c.benchmark_group("wavelet_transform");
    let omega_a = 2.0 * PI * 150.0;

    for &n in &[512usize, 2048] {
        let signal = two_tone(n, 8000.0);

        group.bench_with_input(BenchmarkId::new("direct", n), &signal, |b, s| {
            b.iter(|| wavelet_transform_direct(black_box(s), omega_a, 6.0, Boundary::Periodic))
        });
        group.bench_with_input(BenchmarkId::new("fourier", n), &signal, |b, s| {
            b.iter(|| wavelet_transform_fourier(black_box(s), omega_a, 6.0, Boundary::Periodic))
        });
    }

    group.finish();
}

fn benchmark_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("wavelet_grid");
    group.sample_size(20);

    let signal = two_tone(8000, 8000.0);
    for &k in &[2.0, 6.0] {
        let config = AnalysisConfig::new(k, 50.0, 400.0).with_boundary(Boundary::Zero);
        group.bench_with_input(BenchmarkId::new("k", k), &config, |b, cfg| {
            b.iter(|| wavelet_grid(black_box(&signal), cfg))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_single_frequency, benchmark_grid);
criterion_main!(benches);
