//! Direct and matrix-form DFT
//!
//! Both are O(N²). `dft_direct` projects the signal onto one basis vector
//! at a time and serves as the reference; `dft_matrix` materializes the
//! whole basis and does a single matrix-vector product.

use ndarray::{Array1, Array2};
use num_complex::Complex64;

use super::basis::{dft_basis, twiddle};
use crate::error::{Result, SpectralError};

pub(crate) fn ensure_non_empty(x: &Array1<f64>) -> Result<()> {
    if x.is_empty() {
        return Err(SpectralError::EmptySignal);
    }
    Ok(())
}

/// DFT by explicit projection
///
/// For every frequency index `k`, sums `x[j] * exp(-i·2π·k·j/N)`.
///
/// # Errors
/// [`SpectralError::EmptySignal`] for zero-length input.
pub fn dft_direct(x: &Array1<f64>) -> Result<Array1<Complex64>> {
    ensure_non_empty(x)?;
    let n = x.len();
    let mut coefs = Array1::zeros(n);

    for k in 0..n {
        let basis = dft_basis(n, k)?;
        coefs[k] = basis
            .iter()
            .zip(x.iter())
            .map(|(&b, &xj)| b * xj)
            .sum::<Complex64>();
    }

    Ok(coefs)
}

/// Full N×N analysis matrix, row `k` = `exp(-i·2π·k·j/N)`
pub fn dft_basis_matrix(n: usize) -> Result<Array2<Complex64>> {
    if n == 0 {
        return Err(SpectralError::EmptySignal);
    }
    Ok(Array2::from_shape_fn((n, n), |(k, j)| twiddle(n, k, j)))
}

/// DFT as one matrix-vector product
///
/// Numerically identical to [`dft_direct`] within floating-point tolerance.
pub fn dft_matrix(x: &Array1<f64>) -> Result<Array1<Complex64>> {
    ensure_non_empty(x)?;
    let w = dft_basis_matrix(x.len())?;
    let xc = x.mapv(|v| Complex64::new(v, 0.0));
    Ok(w.dot(&xc))
}
