//! Uniformly sampled real-valued signal

use ndarray::Array1;

use crate::error::{ensure_positive, Result, SpectralError};

/// A finite, uniformly sampled real sequence.
///
/// Sample `i` sits at time `start + i / fs`. The samples are fixed at
/// construction; every analysis borrows the signal immutably.
#[derive(Debug, Clone)]
pub struct Signal {
    samples: Array1<f64>,
    fs: f64,
    start: f64,
}

impl Signal {
    /// Create a signal starting at `t = 0`.
    ///
    /// # Errors
    /// - [`SpectralError::EmptySignal`] if `samples` is empty
    /// - [`SpectralError::NonFiniteSample`] for NaN / infinite samples
    /// - [`SpectralError::InvalidParameter`] if `fs` is not a positive finite number
    pub fn new(samples: impl Into<Array1<f64>>, fs: f64) -> Result<Self> {
        let samples = samples.into();
        if samples.is_empty() {
            return Err(SpectralError::EmptySignal);
        }
        if let Some(index) = samples.iter().position(|x| !x.is_finite()) {
            return Err(SpectralError::NonFiniteSample { index });
        }
        ensure_positive("fs", fs)?;

        Ok(Self {
            samples,
            fs,
            start: 0.0,
        })
    }

    /// Shift the time axis so that the first sample sits at `start`.
    pub fn with_start(mut self, start: f64) -> Result<Self> {
        if !start.is_finite() {
            return Err(SpectralError::invalid("start", start, "must be finite"));
        }
        self.start = start;
        Ok(self)
    }

    pub fn samples(&self) -> &Array1<f64> {
        &self.samples
    }

    /// Sampling rate in samples per unit time.
    pub fn fs(&self) -> f64 {
        self.fs
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    /// Time of the last sample.
    pub fn end(&self) -> f64 {
        self.time_at(self.len() - 1)
    }

    pub fn time_at(&self, index: usize) -> f64 {
        self.start + index as f64 / self.fs
    }

    /// Sample times `start + i / fs`.
    pub fn times(&self) -> Array1<f64> {
        Array1::from_shape_fn(self.len(), |i| self.time_at(i))
    }

    pub fn nyquist(&self) -> f64 {
        self.fs / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_signal_times() {
        let signal = Signal::new(vec![0.0, 1.0, 0.0, -1.0], 4.0)
            .unwrap()
            .with_start(1.0)
            .unwrap();
        assert_eq!(signal.len(), 4);
        assert_relative_eq!(signal.time_at(2), 1.5);
        assert_relative_eq!(signal.end(), 1.75);
        assert_relative_eq!(signal.nyquist(), 2.0);
        let times = signal.times();
        assert_relative_eq!(times[3] - times[2], 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_signal_rejects_empty() {
        let err = Signal::new(Vec::<f64>::new(), 100.0).unwrap_err();
        assert_eq!(err, SpectralError::EmptySignal);
    }

    #[test]
    fn test_signal_rejects_bad_rate() {
        assert!(Signal::new(vec![1.0], 0.0).is_err());
        assert!(Signal::new(vec![1.0], -8000.0).is_err());
        assert!(Signal::new(vec![1.0], f64::NAN).is_err());
    }

    #[test]
    fn test_signal_rejects_nan() {
        let err = Signal::new(vec![1.0, f64::NAN, 2.0], 10.0).unwrap_err();
        assert_eq!(err, SpectralError::NonFiniteSample { index: 1 });
    }
}
