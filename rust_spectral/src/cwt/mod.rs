//! # CWT (Continuous Wavelet Transform) Module
//!
//! Morlet wavelet transform of uniformly sampled signals, computed either
//! by direct correlation or through the Fourier domain, plus the analysis
//! grid, cone of influence and display surface built on top of it.

pub mod wavelets;
pub mod utils;
pub mod core;
pub mod grid;
pub mod coi;
pub mod render;
#[cfg(feature = "python")]
pub mod ffi;

// Re-export main functions
pub use self::coi::{coi_frequency, compute_coi, ConeOfInfluence};
pub use self::core::{
    direct_transform, wavelet_transform, wavelet_transform_direct, wavelet_transform_fourier,
    CwtMethod, SpectralPlan,
};
pub use self::grid::{build_frequency_grid, frequency_count, wavelet_grid, WaveletGrid};
pub use self::render::{analyze, render, RenderedSurface, WaveletAnalysis};
pub use self::wavelets::{morlet_fourier, morlet_time, Morlet, Wavelet, MIN_ANALYSIS_OMEGA};
#[cfg(feature = "python")]
pub use self::ffi::{wavelet_grid_py, wavelet_transform_py};
