//! Python FFI bindings for CWT
//!
//! Provides Python-callable functions using PyO3.

use num_complex::Complex64;
use numpy::{IntoPyArray, PyArray1, PyArray2, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use super::core::{wavelet_transform, CwtMethod};
use super::render::analyze;
use crate::config::{AnalysisConfig, Boundary, RenderMode};
use crate::error::SpectralError;
use crate::signal::Signal;

fn to_py_err(e: SpectralError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Python-callable single-frequency Morlet transform
///
/// # Arguments
/// * `signal` - Input signal (1D numpy array)
/// * `fs` - Sampling rate (Hz)
/// * `frequency` - Analysis frequency (Hz)
/// * `k` - Morlet scale parameter (default: 6.0)
/// * `method` - "fourier" (default) or "direct"
/// * `boundary` - "periodic" (default), "zero" or "symmetric"
#[pyfunction]
#[pyo3(signature = (signal, fs, frequency, k=6.0, method="fourier", boundary="periodic"))]
pub fn wavelet_transform_py<'py>(
    py: Python<'py>,
    signal: PyReadonlyArray1<f64>,
    fs: f64,
    frequency: f64,
    k: f64,
    method: &str,
    boundary: &str,
) -> PyResult<Bound<'py, PyArray1<Complex64>>> {
    let method = match method {
        "fourier" | "fft" => CwtMethod::Fourier,
        "direct" => CwtMethod::Direct,
        other => return Err(to_py_err(SpectralError::UnknownMode(other.to_string()))),
    };
    let boundary: Boundary = boundary.parse().map_err(to_py_err)?;
    let signal = Signal::new(signal.as_array().to_owned(), fs).map_err(to_py_err)?;
    let omega_a = 2.0 * std::f64::consts::PI * frequency;

    let coefs = py
        .detach(|| wavelet_transform(&signal, omega_a, k, boundary, method))
        .map_err(to_py_err)?;

    Ok(coefs.into_pyarray(py))
}

/// Python-callable wavelet analysis
///
/// # Arguments
/// * `signal` - Input signal (1D numpy array)
/// * `fs` - Sampling rate (Hz)
/// * `k` - Morlet scale parameter
/// * `f_start`, `f_end` - Analysed frequency range (Hz)
/// * `boundary` - "periodic" (default), "zero" or "symmetric"
/// * `mode` - "magnitude" (default), "magnitude_squared", "magnitude_sqrt" or "db"
///
/// # Returns
/// Tuple of (values, frequencies, times, coi_frequency, coi_mask):
/// - values: rendered surface, shape (num_frequencies, num_times)
/// - frequencies: analysis frequencies (Hz)
/// - times: kept sample times after downsampling
/// - coi_frequency: minimum trustworthy frequency at each kept time
/// - coi_mask: `True` inside the cone of influence
///
/// # Example (Python)
/// ```python
/// import _rust_spectral
/// import numpy as np
///
/// fs = 1000.0
/// t = np.arange(2000) / fs
/// x = np.sin(2 * np.pi * 60 * t)
/// values, freqs, times, coi, mask = _rust_spectral.wavelet_grid_py(x, fs, 6.0, 20.0, 200.0)
/// ```
#[pyfunction]
#[pyo3(signature = (signal, fs, k, f_start, f_end, boundary="periodic", mode="magnitude"))]
#[allow(clippy::too_many_arguments, clippy::type_complexity)]
pub fn wavelet_grid_py<'py>(
    py: Python<'py>,
    signal: PyReadonlyArray1<f64>,
    fs: f64,
    k: f64,
    f_start: f64,
    f_end: f64,
    boundary: &str,
    mode: &str,
) -> PyResult<(
    Bound<'py, PyArray2<f64>>,
    Bound<'py, PyArray1<f64>>,
    Bound<'py, PyArray1<f64>>,
    Bound<'py, PyArray1<f64>>,
    Bound<'py, PyArray2<bool>>,
)> {
    let boundary: Boundary = boundary.parse().map_err(to_py_err)?;
    let mode: RenderMode = mode.parse().map_err(to_py_err)?;
    let config = AnalysisConfig::new(k, f_start, f_end)
        .with_boundary(boundary)
        .with_mode(mode);
    let signal = Signal::new(signal.as_array().to_owned(), fs).map_err(to_py_err)?;

    let analysis = py.detach(|| analyze(&signal, &config)).map_err(to_py_err)?;
    let surface = analysis.surface;

    Ok((
        surface.values.into_pyarray(py),
        surface.frequencies.into_pyarray(py),
        surface.times.into_pyarray(py),
        surface.coi.min_frequency.into_pyarray(py),
        surface.mask.into_pyarray(py),
    ))
}
