//! Python FFI bindings for the DFT

use num_complex::Complex64;
use numpy::{IntoPyArray, PyArray1, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use super::core::{dft_direct, dft_matrix};
use super::fourier::dft_fft;
use crate::error::SpectralError;

/// Python-callable DFT
///
/// # Arguments
/// * `signal` - Real input (1D numpy array)
/// * `method` - "fft" (default), "matrix" or "direct"
///
/// # Example (Python)
/// ```python
/// import _rust_spectral
/// import numpy as np
///
/// x = np.cos(2 * np.pi * 5 * np.arange(64) / 64)
/// spectrum = _rust_spectral.dft_py(x, "matrix")
/// ```
#[pyfunction]
#[pyo3(signature = (signal, method="fft"))]
pub fn dft_py<'py>(
    py: Python<'py>,
    signal: PyReadonlyArray1<f64>,
    method: &str,
) -> PyResult<Bound<'py, PyArray1<Complex64>>> {
    let x = signal.as_array().to_owned();

    let coefs = py
        .detach(|| match method {
            "fft" => dft_fft(&x),
            "matrix" => dft_matrix(&x),
            "direct" => dft_direct(&x),
            other => Err(SpectralError::UnknownMode(other.to_string())),
        })
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    Ok(coefs.into_pyarray(py))
}
