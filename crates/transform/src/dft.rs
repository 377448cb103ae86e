//! Direct discrete Fourier transform.

use std::f64::consts::PI;
use std::sync::Arc;

use num_complex::Complex64;
use tracing::debug;

use crate::error::TransformError;
use crate::parallel::ParallelScheduler;
use crate::transform::{Transform, deinterleave, interleave};

/// O(N²) summation DFT.
///
/// Forward: `X[k] = Σ x[n] e^{-2πikn/N}`, unscaled. Reverse:
/// `x[n] = (1/N) Σ X[k] e^{+2πikn/N}`. Any length `N >= 1` is accepted.
///
/// Through the [`Transform`] trait the real buffer is read as interleaved
/// `(re, im)` pairs, so the output keeps the input length. Level-limited
/// calls are rejected.
///
/// # Example
///
/// ```
/// use num_complex::Complex64;
/// use pyramid_transform::DiscreteFourierTransform;
///
/// let dft = DiscreteFourierTransform::new();
/// let spectrum = dft.spectrum(&[Complex64::new(1.0, 0.0); 4])?;
/// assert!((spectrum[0].re - 4.0).abs() < 1e-12);
/// assert!(spectrum[1].norm() < 1e-12);
/// # Ok::<(), pyramid_transform::TransformError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct DiscreteFourierTransform {
    scheduler: Option<Arc<ParallelScheduler>>,
}

impl DiscreteFourierTransform {
    /// Creates a sequential DFT.
    pub fn new() -> Self {
        Self::default()
    }

    /// Spreads output bins across the scheduler's pool.
    pub fn with_scheduler(mut self, scheduler: Arc<ParallelScheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Forward transform of complex samples.
    pub fn spectrum(&self, signal: &[Complex64]) -> Result<Vec<Complex64>, TransformError> {
        self.sum(signal, -1.0, 1.0)
    }

    /// Reverse transform of a spectrum, scaled by `1/N`.
    pub fn inverse_spectrum(
        &self,
        spectrum: &[Complex64],
    ) -> Result<Vec<Complex64>, TransformError> {
        let scale = 1.0 / spectrum.len().max(1) as f64;
        self.sum(spectrum, 1.0, scale)
    }

    fn sum(
        &self,
        input: &[Complex64],
        sign: f64,
        scale: f64,
    ) -> Result<Vec<Complex64>, TransformError> {
        if input.is_empty() {
            return Err(TransformError::EmptyInput);
        }
        let n = input.len();
        debug!(len = n, parallel = self.scheduler.is_some(), "dft");
        let bin = |k: usize| -> Complex64 {
            let acc: Complex64 = input
                .iter()
                .enumerate()
                .map(|(t, &x)| {
                    // Reduce k·t mod N first to keep the angle small.
                    let angle = sign * 2.0 * PI * ((k * t) % n) as f64 / n as f64;
                    x * Complex64::cis(angle)
                })
                .sum();
            acc * scale
        };
        Ok(match &self.scheduler {
            Some(s) => s.map_indices(n, bin),
            None => (0..n).map(bin).collect(),
        })
    }
}

impl Transform for DiscreteFourierTransform {
    fn name(&self) -> &str {
        "Discrete Fourier Transform"
    }

    fn forward(&self, signal: &[f64]) -> Result<Vec<f64>, TransformError> {
        let samples = deinterleave(signal)?;
        Ok(interleave(&self.spectrum(&samples)?))
    }

    fn reverse(&self, coeffs: &[f64]) -> Result<Vec<f64>, TransformError> {
        let spectrum = deinterleave(coeffs)?;
        Ok(interleave(&self.inverse_spectrum(&spectrum)?))
    }

    fn forward_complex(&self, signal: &[Complex64]) -> Result<Vec<Complex64>, TransformError> {
        self.spectrum(signal)
    }

    fn reverse_complex(&self, coeffs: &[Complex64]) -> Result<Vec<Complex64>, TransformError> {
        self.inverse_spectrum(coeffs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parallel::SchedulerConfig;
    use approx::assert_abs_diff_eq;

    fn assert_close(a: &[Complex64], b: &[Complex64], eps: f64) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b) {
            assert_abs_diff_eq!(x.re, y.re, epsilon = eps);
            assert_abs_diff_eq!(x.im, y.im, epsilon = eps);
        }
    }

    #[test]
    fn impulse_has_flat_spectrum() {
        let mut signal = vec![Complex64::new(0.0, 0.0); 5];
        signal[0] = Complex64::new(1.0, 0.0);
        let spectrum = DiscreteFourierTransform::new().spectrum(&signal).unwrap();
        assert_close(&spectrum, &[Complex64::new(1.0, 0.0); 5], 1e-12);
    }

    #[test]
    fn single_tone_lands_in_one_bin() {
        let n = 8;
        let signal: Vec<Complex64> = (0..n)
            .map(|t| Complex64::cis(2.0 * PI * 3.0 * t as f64 / n as f64))
            .collect();
        let spectrum = DiscreteFourierTransform::new().spectrum(&signal).unwrap();
        for (k, x) in spectrum.iter().enumerate() {
            let expected = if k == 3 { n as f64 } else { 0.0 };
            assert_abs_diff_eq!(x.re, expected, epsilon = 1e-10);
            assert_abs_diff_eq!(x.im, 0.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn inverse_restores_signal() {
        let dft = DiscreteFourierTransform::new();
        let signal: Vec<Complex64> = (0..7)
            .map(|i| Complex64::new(i as f64 - 3.0, (i * i) as f64 * 0.1))
            .collect();
        let back = dft.inverse_spectrum(&dft.spectrum(&signal).unwrap()).unwrap();
        assert_close(&back, &signal, 1e-10);
    }

    #[test]
    fn interleaved_real_round_trip() {
        let dft = DiscreteFourierTransform::new();
        let signal = [1.0, 0.0, 2.0, -1.0, 0.5, 0.5, -3.0, 2.0, 0.0, 1.0, 4.0, 0.0];
        let coeffs = dft.forward(&signal).unwrap();
        assert_eq!(coeffs.len(), signal.len());
        let back = dft.reverse(&coeffs).unwrap();
        for (a, b) in back.iter().zip(&signal) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-10);
        }
    }

    #[test]
    fn rejects_odd_and_empty() {
        let dft = DiscreteFourierTransform::new();
        assert_eq!(
            dft.forward(&[1.0, 2.0, 3.0]),
            Err(TransformError::OddLength { len: 3 })
        );
        assert_eq!(dft.forward(&[]), Err(TransformError::EmptyInput));
        assert_eq!(dft.spectrum(&[]), Err(TransformError::EmptyInput));
    }

    #[test]
    fn levels_are_unsupported() {
        let dft = DiscreteFourierTransform::new();
        let err = dft.forward_level(&[1.0, 0.0], 1).unwrap_err();
        assert!(matches!(err, TransformError::LevelsUnsupported { .. }));
        assert!(dft.reverse_level(&[1.0, 0.0], 0).is_err());
    }

    #[test]
    fn parallel_matches_sequential() {
        let scheduler =
            Arc::new(ParallelScheduler::new(&SchedulerConfig::new().with_threads(3)).unwrap());
        let signal: Vec<Complex64> = (0..37)
            .map(|i| Complex64::new((i as f64 * 0.7).sin(), (i as f64 * 0.3).cos()))
            .collect();
        let seq = DiscreteFourierTransform::new().spectrum(&signal).unwrap();
        let par = DiscreteFourierTransform::new()
            .with_scheduler(scheduler)
            .spectrum(&signal)
            .unwrap();
        assert_eq!(seq, par);
    }
}
