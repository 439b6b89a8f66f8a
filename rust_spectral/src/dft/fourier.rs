//! FFT helpers
//!
//! Thin wrappers over `rustfft` plus a plan cache that can be shared
//! across threads. Production code paths go through here; the O(N²)
//! forms in `core` stay as references.

use ndarray::Array1;
use num_complex::Complex64;
use rustfft::{Fft, FftPlanner};
use std::collections::HashMap;
use std::sync::Arc;

use super::core::ensure_non_empty;
use crate::error::{ensure_positive, Result, SpectralError};

/// Forward and inverse plans for one transform length
pub type FftPlanPair = (Arc<dyn Fft<f64>>, Arc<dyn Fft<f64>>);

/// Plans keyed by transform length, shared read-only by rayon workers
pub type FftPlanCache = Arc<HashMap<usize, FftPlanPair>>;

/// Plan forward and inverse transforms for every requested length
pub fn plan_cache(sizes: impl IntoIterator<Item = usize>) -> FftPlanCache {
    let mut planner = FftPlanner::new();
    let mut cache = HashMap::new();
    for size in sizes {
        cache.entry(size).or_insert_with(|| {
            let fft = planner.plan_fft_forward(size);
            let ifft = planner.plan_fft_inverse(size);
            (fft, ifft)
        });
    }
    Arc::new(cache)
}

fn forward_plan(n: usize, fft_cache: Option<&FftPlanCache>) -> Arc<dyn Fft<f64>> {
    match fft_cache.and_then(|cache| cache.get(&n)) {
        Some((fft_plan, _)) => Arc::clone(fft_plan),
        None => FftPlanner::new().plan_fft_forward(n),
    }
}

fn inverse_plan(n: usize, fft_cache: Option<&FftPlanCache>) -> Arc<dyn Fft<f64>> {
    match fft_cache.and_then(|cache| cache.get(&n)) {
        Some((_, ifft_plan)) => Arc::clone(ifft_plan),
        None => FftPlanner::new().plan_fft_inverse(n),
    }
}

/// Unnormalized forward FFT
pub fn fft(input: &Array1<Complex64>, fft_cache: Option<&FftPlanCache>) -> Array1<Complex64> {
    let mut buffer = input.to_vec();
    forward_plan(buffer.len(), fft_cache).process(&mut buffer);
    Array1::from_vec(buffer)
}

/// Inverse FFT, normalized by `1/n`
pub fn ifft(input: &Array1<Complex64>, fft_cache: Option<&FftPlanCache>) -> Array1<Complex64> {
    let n = input.len();
    let mut buffer = input.to_vec();
    inverse_plan(n, fft_cache).process(&mut buffer);

    let norm = 1.0 / n as f64;
    for x in &mut buffer {
        *x *= norm;
    }

    Array1::from_vec(buffer)
}

/// DFT of a real sequence through `rustfft`, O(N log N)
pub fn dft_fft(x: &Array1<f64>) -> Result<Array1<Complex64>> {
    ensure_non_empty(x)?;
    let xc = x.mapv(|v| Complex64::new(v, 0.0));
    Ok(fft(&xc, None))
}

/// Inverse DFT, normalized so that `idft(dft_fft(x)) == x`
pub fn idft(spectrum: &Array1<Complex64>) -> Result<Array1<Complex64>> {
    if spectrum.is_empty() {
        return Err(SpectralError::EmptySignal);
    }
    Ok(ifft(spectrum, None))
}

/// Signed bin index for every FFT slot: `0, 1, .., n/2, -(n/2 - 1), .., -1`
///
/// The Nyquist slot of an even-length transform is reported as positive.
pub fn signed_bins(n: usize) -> Array1<f64> {
    Array1::from_shape_fn(n, |i| {
        if i <= n / 2 {
            i as f64
        } else {
            i as f64 - n as f64
        }
    })
}

/// Frequency (Hz) of every FFT slot, in [`signed_bins`] order
pub fn fft_frequencies(n: usize, fs: f64) -> Result<Array1<f64>> {
    if n == 0 {
        return Err(SpectralError::EmptySignal);
    }
    ensure_positive("fs", fs)?;
    let df = fs / n as f64;
    Ok(signed_bins(n).mapv(|b| b * df))
}
