//! Wavelet function generation
//!
//! Closed forms of the complex Morlet wavelet in the time and Fourier
//! domains, plus the [`Wavelet`] trait the transform engine is written
//! against so that other families can be plugged in.

use ndarray::Array1;
use num_complex::Complex64;
use std::f64::consts::PI;

use crate::error::{ensure_positive, Result, SpectralError};

/// Smallest analysis angular frequency (rad/s) the Fourier path accepts
/// before clamping. The Fourier-domain formula divides by `ω_a`.
pub const MIN_ANALYSIS_OMEGA: f64 = 1e-6;

/// Clamp `|omega_a|` to [`MIN_ANALYSIS_OMEGA`], keeping its sign.
pub(crate) fn clamp_omega(omega_a: f64) -> f64 {
    if omega_a.abs() >= MIN_ANALYSIS_OMEGA {
        return omega_a;
    }
    tracing::warn!(
        omega_a,
        clamped = MIN_ANALYSIS_OMEGA,
        "analysis frequency too close to zero, clamping"
    );
    if omega_a < 0.0 {
        -MIN_ANALYSIS_OMEGA
    } else {
        MIN_ANALYSIS_OMEGA
    }
}

/// A wavelet family usable by the transform engine
pub trait Wavelet: Send + Sync {
    /// Kernel centred at `t_k`, evaluated at times `t`
    fn kernel(&self, omega_a: f64, t_k: f64, t: &Array1<f64>) -> Array1<Complex64>;

    /// Closed-form spectrum, peaked at `+omega_a`.
    ///
    /// `omega_a` and `omega` must share a unit; only their ratio matters.
    fn spectrum(&self, omega_a: f64, omega: &Array1<f64>) -> Array1<f64>;

    /// Factor turning [`Wavelet::spectrum`] into the DFT of the kernel
    /// sampled at rate `fs`, for a kernel short against the record and
    /// band-limited well below `fs` (`omega_a` in rad per unit time)
    fn spectrum_gain(&self, omega_a: f64, fs: f64) -> f64;

    /// Half-width (time) at which the envelope has decayed to `1/e`,
    /// for an analysis frequency in cycles per unit time
    fn efolding_time(&self, frequency: f64) -> f64;
}

/// Complex Morlet wavelet with scale parameter `K`
///
/// `K` sets how many oscillations fit under the Gaussian envelope:
/// larger `K` trades time resolution for frequency resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Morlet {
    k: f64,
}

impl Morlet {
    pub fn new(k: f64) -> Result<Self> {
        ensure_positive("k", k)?;
        Ok(Self { k })
    }

    pub fn k(&self) -> f64 {
        self.k
    }
}

impl Wavelet for Morlet {
    fn kernel(&self, omega_a: f64, t_k: f64, t: &Array1<f64>) -> Array1<Complex64> {
        let k = self.k;
        let offset = (-k * k).exp();
        let width = (2.0 * k) * (2.0 * k);
        t.mapv(|ti| {
            let dt = ti - t_k;
            let envelope = (-(omega_a * omega_a) * dt * dt / width).exp();
            (Complex64::from_polar(1.0, -omega_a * dt) - offset) * envelope
        })
    }

    fn spectrum(&self, omega_a: f64, omega: &Array1<f64>) -> Array1<f64> {
        let k = self.k;
        let offset = (-k * k).exp();
        omega.mapv(|w| {
            let shifted = k * (w - omega_a) / omega_a;
            let centred = k * w / omega_a;
            2.0 * ((-shifted * shifted).exp() - offset * (-centred * centred).exp())
        })
    }

    /// The sampled kernel's DFT is `fs` times its continuous Fourier
    /// transform, which equals `K·√π/|ω_a|` times the closed form.
    fn spectrum_gain(&self, omega_a: f64, fs: f64) -> f64 {
        fs * self.k * PI.sqrt() / omega_a.abs()
    }

    fn efolding_time(&self, frequency: f64) -> f64 {
        // envelope exp(-ω²τ²/(2K)²) hits 1/e at τ = 2K/ω = K/(πf)
        self.k / (PI * frequency)
    }
}

/// Time-domain Morlet kernel
///
/// Evaluates `(exp(-i·ω_a·(t - t_k)) - exp(-K²)) · exp(-ω_a²·(t - t_k)² / (2K)²)`
/// at every time in `t`.
///
/// # Errors
/// `K` not strictly positive, or non-finite `ω_a` / `t_k`.
pub fn morlet_time(omega_a: f64, k: f64, t_k: f64, t: &Array1<f64>) -> Result<Array1<Complex64>> {
    let wavelet = Morlet::new(k)?;
    if !omega_a.is_finite() {
        return Err(SpectralError::invalid("omega_a", omega_a, "must be finite"));
    }
    if !t_k.is_finite() {
        return Err(SpectralError::invalid("t_k", t_k, "must be finite"));
    }
    Ok(wavelet.kernel(omega_a, t_k, t))
}

/// Fourier-domain Morlet
///
/// `2·(exp(-(K(ω-ω_a)/ω_a)²) - exp(-K²)·exp(-(Kω/ω_a)²))`. `ω` and `ω_a`
/// must use the same unit (the transform engine passes DFT bin indices).
/// `ω_a` near zero is clamped to [`MIN_ANALYSIS_OMEGA`].
pub fn morlet_fourier(k: f64, omega_a: f64, omega: &Array1<f64>) -> Result<Array1<f64>> {
    let wavelet = Morlet::new(k)?;
    if !omega_a.is_finite() {
        return Err(SpectralError::invalid("omega_a", omega_a, "must be finite"));
    }
    Ok(wavelet.spectrum(clamp_omega(omega_a), omega))
}
