//! Presentation surface for a wavelet grid
//!
//! Maps coefficients to display values, thins the time axis down to what
//! the coarsest analysis actually resolves, and attaches the cone of
//! influence as a boolean mask.

use ndarray::{Array1, Array2, Zip};

use super::coi::ConeOfInfluence;
use super::grid::{wavelet_grid, WaveletGrid};
use super::utils::{to_db, DB_EPSILON};
use crate::config::{AnalysisConfig, RenderMode};
use crate::error::{Result, SpectralError};
use crate::signal::Signal;

/// Time-axis thinning factor `max(K/24 · fs/f_end, 1)`
///
/// A Morlet filter at `f_end` spans roughly `K/f_end` seconds; keeping
/// about 24 columns per span avoids drawing detail no row can resolve.
pub fn downsample_factor(k: f64, fs: f64, f_end: f64) -> f64 {
    (k / 24.0 * fs / f_end).max(1.0)
}

/// Nearest-neighbour source indices when thinning `n` samples by `take_every`
///
/// Empty for `n == 0`.
pub fn downsample_indices(n: usize, take_every: f64) -> Vec<usize> {
    if n == 0 {
        return Vec::new();
    }
    let new_len = ((n as f64 / take_every).floor() as usize).clamp(1, n);
    (0..new_len).map(|j| j * n / new_len).collect()
}

/// Rendered (frequency × time) surface
#[derive(Debug, Clone)]
pub struct RenderedSurface {
    /// Display values (num_frequencies, num_kept_times)
    pub values: Array2<f64>,
    pub frequencies: Array1<f64>,
    pub times: Array1<f64>,
    /// COI at the kept times
    pub coi: ConeOfInfluence,
    /// `true` where the coefficient lies inside the cone of influence
    pub mask: Array2<bool>,
    pub mode: RenderMode,
}

impl RenderedSurface {
    /// Values with every masked cell replaced by `fill` (e.g. NaN for
    /// plotting libraries that leave NaN cells blank)
    pub fn masked_values(&self, fill: f64) -> Array2<f64> {
        let mut out = self.values.clone();
        Zip::from(&mut out).and(&self.mask).for_each(|v, &masked| {
            if masked {
                *v = fill;
            }
        });
        out
    }
}

/// Render `grid` for display
///
/// `coi` must be computed on the grid's full-resolution time axis; it is
/// thinned with the same indices as the values.
pub fn render(grid: &WaveletGrid, coi: &ConeOfInfluence, mode: RenderMode) -> Result<RenderedSurface> {
    let n = grid.num_times();
    if n == 0 || grid.num_frequencies() == 0 {
        return Err(SpectralError::EmptySignal);
    }
    if grid.coefs.dim() != (grid.num_frequencies(), n) {
        return Err(SpectralError::invalid(
            "coefs",
            format!("{:?}", grid.coefs.dim()),
            "shape must be (frequencies, times)",
        ));
    }
    if coi.len() != n {
        return Err(SpectralError::invalid(
            "coi",
            coi.len(),
            "length must match the grid's time axis",
        ));
    }

    let f_end = grid.frequencies.iter().copied().fold(f64::MIN, f64::max);
    let take_every = downsample_factor(grid.k, grid.fs, f_end);
    let indices = downsample_indices(n, take_every);

    let kept = Array2::from_shape_fn((grid.num_frequencies(), indices.len()), |(row, j)| {
        grid.coefs[[row, indices[j]]]
    });
    let values = match mode {
        RenderMode::Magnitude => kept.mapv(|c| c.norm()),
        RenderMode::MagnitudeSquared => kept.mapv(|c| c.norm_sqr()),
        RenderMode::MagnitudeSqrt => kept.mapv(|c| c.norm().sqrt()),
        RenderMode::Decibel => to_db(&kept, DB_EPSILON),
    };

    let coi = coi.select(&indices);
    let mask = Array2::from_shape_fn(values.dim(), |(row, j)| {
        !coi.is_reliable(j, grid.frequencies[row])
    });
    let times = indices.iter().map(|&i| grid.times[i]).collect();

    tracing::debug!(
        columns = indices.len(),
        take_every,
        ?mode,
        "rendered wavelet surface"
    );

    Ok(RenderedSurface {
        values,
        frequencies: grid.frequencies.clone(),
        times,
        coi,
        mask,
        mode,
    })
}

/// Full analysis output
#[derive(Debug, Clone)]
pub struct WaveletAnalysis {
    pub grid: WaveletGrid,
    /// COI at full time resolution
    pub coi: ConeOfInfluence,
    pub surface: RenderedSurface,
}

/// Grid, cone of influence and rendered surface in one call
pub fn analyze(signal: &Signal, config: &AnalysisConfig) -> Result<WaveletAnalysis> {
    let grid = wavelet_grid(signal, config)?;
    let coi = ConeOfInfluence::for_signal(signal, config.k())?;
    let surface = render(&grid, &coi, config.mode())?;
    Ok(WaveletAnalysis { grid, coi, surface })
}

#[cfg(test)]
mod tests {
    use super::super::coi::compute_coi;
    use super::*;
    use approx::assert_relative_eq;
    use num_complex::Complex64;
    use std::f64::consts::PI;

    fn small_grid() -> WaveletGrid {
        let coefs = Array2::from_shape_vec(
            (2, 4),
            vec![
                Complex64::new(3.0, 4.0),
                Complex64::new(0.0, 1.0),
                Complex64::new(-2.0, 0.0),
                Complex64::new(0.0, 0.0),
                Complex64::new(6.0, 8.0),
                Complex64::new(1.0, 0.0),
                Complex64::new(0.0, -4.0),
                Complex64::new(9.0, 0.0),
            ],
        )
        .unwrap();
        WaveletGrid {
            coefs,
            frequencies: Array1::from_vec(vec![1.0, 2.0]),
            times: Array1::from_vec(vec![0.0, 0.25, 0.5, 0.75]),
            k: 1.0,
            fs: 4.0,
        }
    }

    #[test]
    fn test_downsample_factor() {
        assert_relative_eq!(downsample_factor(12.0, 8000.0, 400.0), 10.0);
        assert_relative_eq!(downsample_factor(2.0, 100.0, 50.0), 1.0);
    }

    #[test]
    fn test_downsample_indices() {
        assert_eq!(downsample_indices(10, 1.0), (0..10).collect::<Vec<_>>());
        assert_eq!(downsample_indices(10, 2.5), vec![0, 2, 5, 7]);
        assert_eq!(downsample_indices(3, 100.0), vec![0]);
        assert!(downsample_indices(0, 1.0).is_empty());
    }

    #[test]
    fn test_render_modes() {
        let grid = small_grid();
        let coi = compute_coi(0.0, 0.75, 4, grid.k).unwrap();

        let magnitude = render(&grid, &coi, RenderMode::Magnitude).unwrap();
        assert_eq!(magnitude.values.dim(), (2, 4));
        assert_relative_eq!(magnitude.values[[0, 0]], 5.0);
        assert_relative_eq!(magnitude.values[[1, 2]], 4.0);

        let power = render(&grid, &coi, RenderMode::MagnitudeSquared).unwrap();
        assert_relative_eq!(power.values[[1, 0]], 100.0);

        let sqrt = render(&grid, &coi, RenderMode::MagnitudeSqrt).unwrap();
        assert_relative_eq!(sqrt.values[[1, 3]], 3.0);

        let db = render(&grid, &coi, RenderMode::Decibel).unwrap();
        assert_relative_eq!(db.values[[1, 0]], 20.0, epsilon = 1e-9);
        assert!(db.values[[0, 3]] < -200.0);
    }

    #[test]
    fn test_render_mask_follows_coi() {
        let grid = small_grid();
        let coi = compute_coi(0.0, 0.75, 4, grid.k).unwrap();
        let surface = render(&grid, &coi, RenderMode::Magnitude).unwrap();

        // edges are always inside the cone
        for row in 0..2 {
            assert!(surface.mask[[row, 0]]);
            assert!(surface.mask[[row, 3]]);
        }
        // 0.25 s from the edge: trusted from 1/(π·0.25) ≈ 1.27 Hz up
        assert!(surface.mask[[0, 1]]);
        assert!(!surface.mask[[1, 1]]);

        let masked = surface.masked_values(f64::NAN);
        assert!(masked[[0, 1]].is_nan());
        assert_relative_eq!(masked[[1, 1]], 1.0);
    }

    #[test]
    fn test_render_rejects_mismatched_coi() {
        let grid = small_grid();
        let coi = compute_coi(0.0, 1.0, 7, grid.k).unwrap();
        assert!(render(&grid, &coi, RenderMode::Magnitude).is_err());
    }

    #[test]
    fn test_render_rejects_empty_or_misshapen_grid() {
        let mut grid = small_grid();
        grid.times = Array1::zeros(0);
        grid.coefs = Array2::zeros((2, 0));
        let coi = ConeOfInfluence {
            times: Array1::zeros(0),
            edge_distance: Array1::zeros(0),
            min_frequency: Array1::zeros(0),
            k: 1.0,
        };
        assert_eq!(
            render(&grid, &coi, RenderMode::Magnitude).unwrap_err(),
            SpectralError::EmptySignal
        );

        let mut grid = small_grid();
        grid.coefs = Array2::zeros((2, 3));
        let coi = compute_coi(0.0, 0.75, 4, grid.k).unwrap();
        assert!(render(&grid, &coi, RenderMode::Magnitude).is_err());
    }

    #[test]
    fn test_analyze_downsamples_time_axis() {
        let fs = 1000.0;
        let samples: Vec<f64> = (0..1000)
            .map(|i| (2.0 * PI * 50.0 * i as f64 / fs).sin())
            .collect();
        let signal = Signal::new(samples, fs).unwrap();
        let config = AnalysisConfig::new(12.0, 10.0, 100.0).with_mode(RenderMode::MagnitudeSquared);

        let analysis = analyze(&signal, &config).unwrap();
        assert_eq!(analysis.grid.coefs.ncols(), 1000);
        assert_eq!(analysis.coi.len(), 1000);

        // take_every = 12/24 · 1000/100 = 5
        let surface = &analysis.surface;
        assert_eq!(surface.times.len(), 200);
        assert_eq!(surface.values.dim(), (analysis.grid.num_frequencies(), 200));
        assert_relative_eq!(surface.times[1], 0.005, epsilon = 1e-12);
        assert_eq!(surface.coi.len(), 200);
        assert_eq!(surface.mode, RenderMode::MagnitudeSquared);

        // low frequencies are masked over a wider stretch than high ones
        let masked_low = (0..200).filter(|&j| surface.mask[[0, j]]).count();
        let last = analysis.grid.num_frequencies() - 1;
        let masked_high = (0..200).filter(|&j| surface.mask[[last, j]]).count();
        assert!(masked_low > masked_high);
    }
}
