//! # Rust Spectral - DFT and Morlet wavelet analysis
//!
//! Frequency and time-frequency analysis of uniformly sampled real
//! signals: a discrete Fourier transform in direct, matrix and FFT form,
//! and a Morlet continuous wavelet transform with an analysis grid, cone
//! of influence and display surface.
//!
//! Logging goes through `tracing`; install a subscriber to see warnings
//! about clamped or aliased analysis frequencies.

pub mod error;
pub mod signal;
pub mod config;
pub mod dft;
pub mod cwt;

pub use config::{AnalysisConfig, Boundary, RenderMode};
pub use error::{Result, SpectralError};
pub use signal::Signal;

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Python module definition
#[cfg(feature = "python")]
#[pymodule]
fn _rust_spectral(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(dft::dft_py, m)?)?;

    m.add_function(wrap_pyfunction!(cwt::wavelet_transform_py, m)?)?;
    m.add_function(wrap_pyfunction!(cwt::wavelet_grid_py, m)?)?;

    Ok(())
}
