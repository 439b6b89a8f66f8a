//! Frequency grid and full time-frequency decomposition

use ndarray::{Array1, Array2};
use num_complex::Complex64;
use rayon::prelude::*;
use std::f64::consts::PI;

use super::coi::ConeOfInfluence;
use super::core::{exceeds_nyquist, SpectralPlan};
use super::wavelets::Morlet;
use crate::config::AnalysisConfig;
use crate::error::{ensure_positive, Result, SpectralError};
use crate::signal::Signal;

/// Number of analysis frequencies between `f_start` and `f_end`
///
/// `floor(1 + ln(f_end/f_start) / ln(1 + 1/(8K)))`, at least 2. Adjacent
/// Morlet filters at this spacing overlap by a fixed fraction of their
/// bandwidth, whatever the octave.
pub fn frequency_count(f_start: f64, f_end: f64, k: f64) -> Result<usize> {
    ensure_positive("f_start", f_start)?;
    ensure_positive("f_end", f_end)?;
    ensure_positive("k", k)?;
    if f_start >= f_end {
        return Err(SpectralError::invalid("f_start", f_start, "must be below f_end"));
    }

    let count = 1.0 + (f_end / f_start).ln() / (1.0 + 1.0 / (8.0 * k)).ln();
    Ok((count.floor() as usize).max(2))
}

/// Geometrically spaced analysis frequencies, both ends included
pub fn build_frequency_grid(f_start: f64, f_end: f64, k: f64) -> Result<Array1<f64>> {
    let count = frequency_count(f_start, f_end, k)?;
    let ratio = f_end / f_start;
    let last = (count - 1) as f64;

    let mut freqs = Array1::from_shape_fn(count, |i| f_start * ratio.powf(i as f64 / last));
    freqs[count - 1] = f_end;
    Ok(freqs)
}

/// CWT output over a frequency grid
#[derive(Debug, Clone)]
pub struct WaveletGrid {
    /// Coefficients (num_frequencies, signal_length)
    pub coefs: Array2<Complex64>,
    /// Analysis frequencies (Hz), ascending
    pub frequencies: Array1<f64>,
    /// Sample times
    pub times: Array1<f64>,
    /// Morlet scale parameter used
    pub k: f64,
    /// Sampling rate of the analysed signal
    pub fs: f64,
}

impl WaveletGrid {
    pub fn num_frequencies(&self) -> usize {
        self.frequencies.len()
    }

    pub fn num_times(&self) -> usize {
        self.times.len()
    }

    pub fn magnitude(&self) -> Array2<f64> {
        self.coefs.mapv(|c| c.norm())
    }

    /// `|W|^2`
    pub fn power(&self) -> Array2<f64> {
        self.coefs.mapv(|c| c.norm_sqr())
    }

    /// Time-averaged power per frequency
    ///
    /// With a cone of influence, samples inside the cone are left out of
    /// the average; a row with no reliable sample averages to 0.
    pub fn global_spectrum(&self, coi: Option<&ConeOfInfluence>) -> Array1<f64> {
        Array1::from_shape_fn(self.num_frequencies(), |row| {
            let freq = self.frequencies[row];
            let (sum, count) = self
                .coefs
                .row(row)
                .iter()
                .enumerate()
                .filter(|&(t, _)| coi.map_or(true, |c| c.is_reliable(t, freq)))
                .fold((0.0, 0usize), |(sum, count), (_, c)| (sum + c.norm_sqr(), count + 1));
            if count > 0 {
                sum / count as f64
            } else {
                0.0
            }
        })
    }
}

/// Morlet CWT of `signal` at every frequency of [`build_frequency_grid`]
///
/// One forward FFT is shared by all rows; rows are computed in parallel
/// with rayon and stacked in frequency order. Frequencies above Nyquist
/// are computed anyway and reported through `tracing`.
pub fn wavelet_grid(signal: &Signal, config: &AnalysisConfig) -> Result<WaveletGrid> {
    config.validate()?;
    let frequencies = build_frequency_grid(config.f_start(), config.f_end(), config.k())?;
    let morlet = Morlet::new(config.k())?;

    if exceeds_nyquist(config.f_end(), signal.fs()) {
        tracing::warn!(
            f_end = config.f_end(),
            nyquist = signal.nyquist(),
            "frequency grid reaches Nyquist"
        );
    }

    let n_freqs = frequencies.len();
    let n = signal.len();
    tracing::debug!(
        frequencies = n_freqs,
        samples = n,
        k = config.k(),
        "computing wavelet grid"
    );

    let plan = SpectralPlan::new(signal, config.boundary());

    // Parallel computation across frequencies (preserving order)
    let rows: Vec<Array1<Complex64>> = frequencies
        .to_vec()
        .into_par_iter()
        .map(|f| plan.transform(&morlet, 2.0 * PI * f))
        .collect();

    let mut coefs = Array2::zeros((n_freqs, n));
    for (i, row) in rows.into_iter().enumerate() {
        coefs.row_mut(i).assign(&row);
    }

    Ok(WaveletGrid {
        coefs,
        frequencies,
        times: signal.times(),
        k: config.k(),
        fs: signal.fs(),
    })
}
