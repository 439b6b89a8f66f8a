//! Core CWT algorithm implementation
//!
//! Two equivalent strategies per analysis frequency:
//! - direct: correlate the signal with the conjugated kernel centred on
//!   every sample, O(N²)
//! - Fourier: one forward FFT of the signal shared by every frequency,
//!   then per frequency the FFT of the sampled kernel, a product and one
//!   inverse FFT, O(N log N)
//!
//! Both run on the boundary-extended signal (see [`extend_signal`]) and
//! sample the kernel on the same ring of lags, so they agree within
//! floating-point tolerance for every `K` and `ω_a`.

use ndarray::{s, Array1};
use num_complex::Complex64;
use std::f64::consts::PI;

use super::utils::extend_signal;
use super::wavelets::{clamp_omega, Morlet, Wavelet};
use crate::config::Boundary;
use crate::dft::{fft, ifft, plan_cache, FftPlanCache};
use crate::error::{Result, SpectralError};
use crate::signal::Signal;

/// CWT computation method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CwtMethod {
    /// Multiply in the Fourier domain (fast for large signals)
    #[default]
    Fourier,
    /// Time-domain correlation (reference, O(N²))
    Direct,
}

fn ensure_finite_omega(omega_a: f64) -> Result<()> {
    if !omega_a.is_finite() {
        return Err(SpectralError::invalid("omega_a", omega_a, "must be finite"));
    }
    Ok(())
}

/// Whether `frequency` (cycles per unit time) is at or above Nyquist
pub(crate) fn exceeds_nyquist(frequency: f64, fs: f64) -> bool {
    frequency >= fs / 2.0
}

/// Aliasing is flagged, not rejected.
fn warn_if_aliased(omega_a: f64, fs: f64) {
    let frequency = omega_a.abs() / (2.0 * PI);
    if exceeds_nyquist(frequency, fs) {
        tracing::warn!(
            frequency,
            nyquist = fs / 2.0,
            "analysis frequency at or above Nyquist, coefficients are aliased"
        );
    }
}

/// Lag in samples from `centre` to `j` on a ring of `m` samples,
/// folded into `[-m/2, m/2)`
#[inline]
fn wrapped_lag(j: usize, centre: usize, m: usize) -> f64 {
    let d = (j + m - centre) % m;
    if 2 * d >= m {
        d as f64 - m as f64
    } else {
        d as f64
    }
}

/// Kernel centred at lag 0 on a ring of `m` samples at rate `fs`
fn ring_kernel<W: Wavelet>(wavelet: &W, omega_a: f64, fs: f64, m: usize) -> Array1<Complex64> {
    let lags = Array1::from_shape_fn(m, |j| wrapped_lag(j, 0, m) / fs);
    wavelet.kernel(omega_a, 0.0, &lags)
}

/// Direct time-domain transform for any wavelet family
///
/// For every sample `i`, the kernel is instantiated at `t_k = time[i]`
/// over the extended record (times folded periodically around `t_k`),
/// conjugated, and dotted with the whole extended signal.
pub fn direct_transform<W: Wavelet>(
    signal: &Signal,
    wavelet: &W,
    omega_a: f64,
    boundary: Boundary,
) -> Array1<Complex64> {
    let omega_a = clamp_omega(omega_a);
    warn_if_aliased(omega_a, signal.fs());

    let (extended, offset) = extend_signal(signal.samples(), boundary);
    let m = extended.len();
    let fs = signal.fs();
    let n = signal.len();
    let mut coefs = Array1::zeros(n);

    for i in 0..n {
        let centre = offset + i;
        let t_k = signal.time_at(i);
        let t = Array1::from_shape_fn(m, |j| t_k + wrapped_lag(j, centre, m) / fs);
        let kernel = wavelet.kernel(omega_a, t_k, &t);

        coefs[i] = extended
            .iter()
            .zip(kernel.iter())
            .map(|(&x, psi)| psi.conj() * x)
            .sum::<Complex64>();
    }

    coefs
}

/// Forward spectrum of one signal, shared by every analysis frequency
///
/// Holds the FFT of the boundary-extended signal and the planned
/// transforms for its length. Immutable after construction, so rows of a
/// wavelet grid can be computed from it in parallel.
pub struct SpectralPlan {
    spectrum: Array1<Complex64>,
    fft_cache: FftPlanCache,
    fs: f64,
    offset: usize,
    len: usize,
}

impl SpectralPlan {
    pub fn new(signal: &Signal, boundary: Boundary) -> Self {
        let (extended, offset) = extend_signal(signal.samples(), boundary);
        let m = extended.len();
        let fft_cache = plan_cache([m]);
        let complex = extended.mapv(|x| Complex64::new(x, 0.0));
        let spectrum = fft(&complex, Some(&fft_cache));

        tracing::debug!(
            samples = signal.len(),
            fft_len = m,
            %boundary,
            "planned signal spectrum"
        );

        Self {
            spectrum,
            fft_cache,
            fs: signal.fs(),
            offset,
            len: signal.len(),
        }
    }

    /// Length of the (extended) transform
    pub fn fft_len(&self) -> usize {
        self.spectrum.len()
    }

    /// Frequency response of the correlation with the kernel at `omega_a`
    ///
    /// FFT of the conjugated ring kernel, read at negated bins. In the
    /// limit of a kernel well inside the ring and well below `fs` this is
    /// `spectrum_gain · spectrum` at the negated bins.
    fn multiplier<W: Wavelet>(&self, wavelet: &W, omega_a: f64) -> Array1<Complex64> {
        let m = self.fft_len();
        let conj_kernel = ring_kernel(wavelet, omega_a, self.fs, m).mapv(|c| c.conj());
        let response = fft(&conj_kernel, Some(&self.fft_cache));
        Array1::from_shape_fn(m, |b| response[(m - b) % m])
    }

    /// Coefficients at analysis angular frequency `omega_a` (rad per unit time)
    pub fn transform<W: Wavelet>(&self, wavelet: &W, omega_a: f64) -> Array1<Complex64> {
        let omega_a = clamp_omega(omega_a);
        warn_if_aliased(omega_a, self.fs);

        let multiplier = self.multiplier(wavelet, omega_a);
        let product = &self.spectrum * &multiplier;

        let full = ifft(&product, Some(&self.fft_cache));
        full.slice(s![self.offset..self.offset + self.len]).to_owned()
    }
}

/// Morlet CWT at one analysis frequency, direct time-domain form
///
/// In both forms `omega_a` close to zero is clamped to
/// [`MIN_ANALYSIS_OMEGA`](super::wavelets::MIN_ANALYSIS_OMEGA).
///
/// # Errors
/// `k <= 0` or non-finite `omega_a`.
pub fn wavelet_transform_direct(
    signal: &Signal,
    omega_a: f64,
    k: f64,
    boundary: Boundary,
) -> Result<Array1<Complex64>> {
    let morlet = Morlet::new(k)?;
    ensure_finite_omega(omega_a)?;
    Ok(direct_transform(signal, &morlet, omega_a, boundary))
}

/// Morlet CWT at one analysis frequency, Fourier-domain form
///
/// Same result as [`wavelet_transform_direct`].
pub fn wavelet_transform_fourier(
    signal: &Signal,
    omega_a: f64,
    k: f64,
    boundary: Boundary,
) -> Result<Array1<Complex64>> {
    let morlet = Morlet::new(k)?;
    ensure_finite_omega(omega_a)?;
    Ok(SpectralPlan::new(signal, boundary).transform(&morlet, omega_a))
}

pub fn wavelet_transform(
    signal: &Signal,
    omega_a: f64,
    k: f64,
    boundary: Boundary,
    method: CwtMethod,
) -> Result<Array1<Complex64>> {
    match method {
        CwtMethod::Fourier => wavelet_transform_fourier(signal, omega_a, k, boundary),
        CwtMethod::Direct => wavelet_transform_direct(signal, omega_a, k, boundary),
    }
}
