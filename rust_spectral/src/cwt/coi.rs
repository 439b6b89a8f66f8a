//! Cone of influence
//!
//! Marks the part of the (time, frequency) plane where the wavelet's
//! support reaches past the record edge, so the coefficient mixes in
//! extension samples (wrapped, zero or mirrored, depending on the
//! boundary) rather than data.
//!
//! The Morlet envelope `exp(-ω_a²τ²/(2K)²)` falls to `1/e` at
//! `|τ| = K/(πf)`. A coefficient at time `t` and frequency `f` is
//! trusted iff that half-width fits inside the record:
//! `K/(πf) <= d(t)` where `d(t)` is the distance to the nearest edge,
//! i.e. `f >= K/(π·d(t))`. The rule is the same for every boundary mode.

use ndarray::Array1;
use std::f64::consts::PI;

use super::wavelets::Morlet;
use crate::error::{Result, SpectralError};
use crate::signal::Signal;

/// Lowest frequency whose e-folding half-width fits in `distance`
///
/// `+inf` at the edge itself: nothing is trusted there.
pub fn coi_frequency(distance: f64, k: f64) -> f64 {
    if distance <= 0.0 {
        f64::INFINITY
    } else {
        k / (PI * distance)
    }
}

/// COI boundary curve
#[derive(Debug, Clone)]
pub struct ConeOfInfluence {
    pub times: Array1<f64>,
    /// Distance from each time to the nearest edge, i.e. the widest
    /// e-folding half-width that stays inside the record
    pub edge_distance: Array1<f64>,
    /// Minimum trustworthy frequency at each time
    pub min_frequency: Array1<f64>,
    pub k: f64,
}

impl ConeOfInfluence {
    /// COI over the sample times of `signal`
    pub fn for_signal(signal: &Signal, k: f64) -> Result<Self> {
        compute_coi(signal.start(), signal.end(), signal.len(), k)
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Whether the coefficient at time index `t` and `frequency` lies
    /// outside the cone
    pub fn is_reliable(&self, t: usize, frequency: f64) -> bool {
        frequency >= self.min_frequency[t]
    }

    /// Keep only the given time indices
    pub fn select(&self, indices: &[usize]) -> Self {
        let pick = |a: &Array1<f64>| indices.iter().map(|&i| a[i]).collect::<Array1<f64>>();
        Self {
            times: pick(&self.times),
            edge_distance: pick(&self.edge_distance),
            min_frequency: pick(&self.min_frequency),
            k: self.k,
        }
    }
}

/// Cone of influence over `num_points` evenly spaced times in
/// `[t_start, t_end]`
///
/// Depends only on the time extent and `K`, never on signal values.
///
/// # Errors
/// Non-finite or reversed time range, `num_points == 0`, `K <= 0`.
pub fn compute_coi(t_start: f64, t_end: f64, num_points: usize, k: f64) -> Result<ConeOfInfluence> {
    Morlet::new(k)?;
    if !t_start.is_finite() || !t_end.is_finite() {
        return Err(SpectralError::invalid("t_end", t_end, "time range must be finite"));
    }
    if t_end < t_start {
        return Err(SpectralError::invalid("t_end", t_end, "must not precede t_start"));
    }
    if num_points == 0 {
        return Err(SpectralError::EmptySignal);
    }

    let times = Array1::linspace(t_start, t_end, num_points);
    let step = if num_points > 1 {
        (t_end - t_start) / (num_points - 1) as f64
    } else {
        0.0
    };
    // from indices, so the curve is exactly symmetric and 0 at both ends
    let edge_distance = Array1::from_shape_fn(num_points, |i| {
        i.min(num_points - 1 - i) as f64 * step
    });
    let min_frequency = edge_distance.mapv(|d| coi_frequency(d, k));

    Ok(ConeOfInfluence {
        times,
        edge_distance,
        min_frequency,
        k,
    })
}
