//! Analysis configuration
//!
//! One `AnalysisConfig` describes a full time-frequency analysis: the
//! Morlet scale parameter, the frequency range and how the record edges
//! are treated. It is passed by reference through the pipeline.

use std::fmt;
use std::str::FromStr;

use crate::error::{ensure_positive, Result, SpectralError};

/// How the signal is extended past its edges before convolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Boundary {
    /// Circular wrap: the record is treated as one period
    #[default]
    Periodic,
    /// Zeros beyond both ends
    Zero,
    /// Mirror the record at both ends, edge value included
    Symmetric,
}

impl FromStr for Boundary {
    type Err = SpectralError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "periodic" | "wrap" => Ok(Self::Periodic),
            "zero" | "zeros" => Ok(Self::Zero),
            "symmetric" | "reflect" => Ok(Self::Symmetric),
            _ => Err(SpectralError::UnknownMode(s.to_string())),
        }
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Periodic => write!(f, "periodic"),
            Self::Zero => write!(f, "zero"),
            Self::Symmetric => write!(f, "symmetric"),
        }
    }
}

/// Elementwise mapping applied to coefficient magnitudes before display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// `|W|`
    #[default]
    Magnitude,
    /// `|W|^2` (power)
    MagnitudeSquared,
    /// `sqrt(|W|)`, compresses dynamic range
    MagnitudeSqrt,
    /// `20 * log10(|W| + eps)`
    Decibel,
}

impl FromStr for RenderMode {
    type Err = SpectralError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "magnitude" | "abs" => Ok(Self::Magnitude),
            "magnitude_squared" | "power" => Ok(Self::MagnitudeSquared),
            "magnitude_sqrt" | "sqrt" => Ok(Self::MagnitudeSqrt),
            "db" | "decibel" => Ok(Self::Decibel),
            _ => Err(SpectralError::UnknownMode(s.to_string())),
        }
    }
}

/// Parameters of one wavelet analysis.
///
/// # Example
///
/// ```
/// use rust_spectral::{AnalysisConfig, Boundary};
///
/// let config = AnalysisConfig::new(2.0, 50.0, 400.0)
///     .with_boundary(Boundary::Zero);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.boundary(), Boundary::Zero);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Morlet scale parameter (number of oscillations under the envelope)
    k: f64,
    /// Lowest analysis frequency (Hz)
    f_start: f64,
    /// Highest analysis frequency (Hz)
    f_end: f64,
    boundary: Boundary,
    mode: RenderMode,
}

impl AnalysisConfig {
    /// Defaults: periodic boundary, magnitude rendering.
    pub fn new(k: f64, f_start: f64, f_end: f64) -> Self {
        Self {
            k,
            f_start,
            f_end,
            boundary: Boundary::default(),
            mode: RenderMode::default(),
        }
    }

    pub fn with_k(mut self, k: f64) -> Self {
        self.k = k;
        self
    }

    pub fn with_frequency_range(mut self, f_start: f64, f_end: f64) -> Self {
        self.f_start = f_start;
        self.f_end = f_end;
        self
    }

    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn k(&self) -> f64 {
        self.k
    }

    pub fn f_start(&self) -> f64 {
        self.f_start
    }

    pub fn f_end(&self) -> f64 {
        self.f_end
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Check `K > 0` and `0 < f_start < f_end`.
    pub fn validate(&self) -> Result<()> {
        ensure_positive("k", self.k)?;
        ensure_positive("f_start", self.f_start)?;
        ensure_positive("f_end", self.f_end)?;
        if self.f_start >= self.f_end {
            return Err(SpectralError::invalid(
                "f_start",
                self.f_start,
                "must be below f_end",
            ));
        }
        Ok(())
    }
}
