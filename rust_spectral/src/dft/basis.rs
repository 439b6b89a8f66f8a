//! Complex exponential basis of the DFT

use ndarray::{Array1, ArrayView1};
use num_complex::Complex64;
use std::f64::consts::PI;

use crate::error::{Result, SpectralError};

/// `exp(-i 2π k j / n)` with the phase reduced modulo `n`.
///
/// Reducing `k * j` first keeps the argument inside `[0, 2π)`, so large
/// products do not lose precision in `sin`/`cos`.
#[inline]
pub(crate) fn twiddle(n: usize, k: usize, j: usize) -> Complex64 {
    let phase = ((k % n) * (j % n)) % n;
    Complex64::from_polar(1.0, -2.0 * PI * phase as f64 / n as f64)
}

/// DFT basis vector for frequency index `k`
///
/// Returns `exp(-i·2π·k·j/n)` for `j = 0..n-1`. Vectors for distinct
/// `k` are orthogonal under [`inner_product`].
///
/// # Errors
/// `n == 0` or `k >= n`.
pub fn dft_basis(n: usize, k: usize) -> Result<Array1<Complex64>> {
    if n == 0 {
        return Err(SpectralError::EmptySignal);
    }
    if k >= n {
        return Err(SpectralError::invalid("k", k, "frequency index must be below n"));
    }
    Ok(Array1::from_shape_fn(n, |j| twiddle(n, k, j)))
}

/// Complex inner product `Σ conj(a[j]) · b[j]`
pub fn inner_product(a: &ArrayView1<Complex64>, b: &ArrayView1<Complex64>) -> Result<Complex64> {
    if a.len() != b.len() {
        return Err(SpectralError::invalid(
            "b",
            b.len(),
            "length must match the first operand",
        ));
    }
    Ok(a.iter().zip(b.iter()).map(|(x, y)| x.conj() * y).sum())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_basis_values() {
        let b = dft_basis(4, 1).unwrap();
        // exp(-i π/2 j): 1, -i, -1, i
        assert_relative_eq!(b[0].re, 1.0, epsilon = 1e-15);
        assert_relative_eq!(b[1].im, -1.0, epsilon = 1e-15);
        assert_relative_eq!(b[2].re, -1.0, epsilon = 1e-15);
        assert_relative_eq!(b[3].im, 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_basis_orthogonality() {
        for &n in &[4usize, 7, 16, 64] {
            for k1 in 0..n {
                let b1 = dft_basis(n, k1).unwrap();
                for k2 in 0..n {
                    let b2 = dft_basis(n, k2).unwrap();
                    let dot = inner_product(&b1.view(), &b2.view()).unwrap();
                    if k1 == k2 {
                        assert_relative_eq!(dot.re, n as f64, epsilon = 1e-9);
                        assert!(dot.im.abs() < 1e-9);
                    } else {
                        assert!(dot.norm() < 1e-9, "n={} k1={} k2={} dot={}", n, k1, k2, dot);
                    }
                }
            }
        }
    }

    #[test]
    fn test_basis_orthogonality_large_n() {
        let n = 1000;
        let b1 = dft_basis(n, 3).unwrap();
        let b2 = dft_basis(n, 997).unwrap();
        let dot = inner_product(&b1.view(), &b2.view()).unwrap();
        assert!(dot.norm() < 1e-9);
    }

    #[test]
    fn test_basis_invalid_index() {
        assert!(dft_basis(8, 8).is_err());
        assert_eq!(dft_basis(0, 0).unwrap_err(), SpectralError::EmptySignal);
    }

    #[test]
    fn test_inner_product_length_mismatch() {
        let a = dft_basis(4, 0).unwrap();
        let b = dft_basis(5, 0).unwrap();
        assert!(inner_product(&a.view(), &b.view()).is_err());
    }
}
