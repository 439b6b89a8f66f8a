//! Utility functions for CWT
//!
//! Boundary extension, dB conversion and FFT sizing.

use ndarray::{s, Array1, Array2};
use num_complex::Complex64;

use crate::config::Boundary;

/// Floor added to magnitudes before taking the log in [`to_db`]
pub const DB_EPSILON: f64 = 1e-12;

/// Index into a signal of length `n` for the `i`-th sample past an edge
/// under symmetric (edge-inclusive) mirroring. Period is `2n`.
#[inline]
fn mirror_index(i: usize, n: usize) -> usize {
    let offset = i % (2 * n);
    if offset < n {
        offset
    } else {
        2 * n - 1 - offset
    }
}

/// Symmetric padding (numpy.pad with mode='symmetric')
///
/// Mirrors the signal at both edges, edge value included. Widths larger
/// than the signal keep alternating mirrored copies.
///
/// ```text
/// signal: [1, 2, 3, 4, 5], pad_width: 3
/// result: [3, 2, 1, 1, 2, 3, 4, 5, 5, 4, 3]
/// ```
pub fn symmetric_pad(signal: &Array1<f64>, pad_width: usize) -> Array1<f64> {
    let n = signal.len();
    if pad_width == 0 || n == 0 {
        return signal.clone();
    }

    let mut padded = Array1::zeros(n + 2 * pad_width);
    padded.slice_mut(s![pad_width..pad_width + n]).assign(signal);

    for i in 0..pad_width {
        padded[pad_width - 1 - i] = signal[mirror_index(i, n)];
        padded[pad_width + n + i] = signal[n - 1 - mirror_index(i, n)];
    }

    padded
}

/// Extend a signal past its edges according to `boundary`
///
/// Returns the extended samples and the offset of the original first
/// sample inside them. The zero and symmetric extensions are long enough
/// that a periodic convolution over them never wraps one real sample onto
/// another:
///
/// - `Periodic`: unchanged, offset 0
/// - `Zero`: zeros appended up to `next_fast_len(2n)`, offset 0
/// - `Symmetric`: `n` mirrored samples on each side, offset `n`
pub fn extend_signal(signal: &Array1<f64>, boundary: Boundary) -> (Array1<f64>, usize) {
    let n = signal.len();
    match boundary {
        Boundary::Periodic => (signal.clone(), 0),
        Boundary::Zero => {
            let mut padded = Array1::zeros(next_fast_len(2 * n));
            padded.slice_mut(s![..n]).assign(signal);
            (padded, 0)
        }
        Boundary::Symmetric => (symmetric_pad(signal, n), n),
    }
}

/// Coefficient magnitudes in decibels, `20·log10(|c| + floor)`
///
/// `floor` keeps zero coefficients finite.
pub fn to_db(coefs: &Array2<Complex64>, floor: f64) -> Array2<f64> {
    coefs.mapv(|c| {
        let amplitude = c.norm() + floor;
        20.0 * amplitude.log10()
    })
}

/// Next power of 2 (for FFT sizing)
pub fn next_fast_len(n: usize) -> usize {
    n.max(1).next_power_of_two()
}
