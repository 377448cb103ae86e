//! Fast Wavelet Transform (cascade / pyramid algorithm).

use std::sync::Arc;

use tracing::{debug, trace};

use crate::error::WaveletError;
use crate::filter::WaveletFilter;
use crate::pyramid::{LevelTransform, check_level, dyadic_exponent, window_sizes};
use crate::step::{analyze_into, synthesize_into};

/// Cascade transform: each step splits only the current approximation band.
///
/// After `l` steps on a signal of length `N`, the first `N / 2^l` samples hold
/// the approximation and the rest hold detail bands, coarsest first.
/// Signals must have a power-of-two length; wrap the transform in
/// [`AncientEgyptianDecomposition`](crate::AncientEgyptianDecomposition) for
/// other lengths.
///
/// # Example
///
/// ```
/// use pyramid_wavelet::{FastWaveletTransform, LevelTransform, Wavelet};
///
/// let fwt = FastWaveletTransform::new(Wavelet::Haar.filter());
/// let coeffs = fwt.forward_level(&[1.0, 1.0, 1.0, 1.0], 2).unwrap();
/// assert!((coeffs[0] - 2.0).abs() < 1e-12);
/// ```
#[derive(Clone, Debug)]
pub struct FastWaveletTransform {
    filter: Arc<WaveletFilter>,
}

impl FastWaveletTransform {
    /// Creates a cascade transform over the given filter.
    pub fn new(filter: impl Into<Arc<WaveletFilter>>) -> Self {
        Self {
            filter: filter.into(),
        }
    }

    /// Returns the filter driving each step.
    pub fn filter(&self) -> &WaveletFilter {
        &self.filter
    }
}

impl LevelTransform for FastWaveletTransform {
    /// `log2(len)`; the length must be a power of two.
    fn max_level(&self, len: usize) -> Result<usize, WaveletError> {
        dyadic_exponent(len)
    }

    fn forward_in_place(&self, buf: &mut [f64], level: usize) -> Result<(), WaveletError> {
        let max = self.max_level(buf.len())?;
        check_level(buf.len(), level, max)?;

        let windows = window_sizes(buf.len(), level, self.filter.min_transform_length());
        debug!(len = buf.len(), level, steps = windows.len(), "fwt forward");
        let mut scratch = vec![0.0; buf.len()];
        for &h in &windows {
            trace!(window = h, "analysis step");
            analyze_into(&buf[..h], &self.filter, &mut scratch[..h]);
            buf[..h].copy_from_slice(&scratch[..h]);
        }
        Ok(())
    }

    fn reverse_in_place(&self, buf: &mut [f64], level: usize) -> Result<(), WaveletError> {
        let max = self.max_level(buf.len())?;
        check_level(buf.len(), level, max)?;

        let windows = window_sizes(buf.len(), level, self.filter.min_transform_length());
        debug!(len = buf.len(), level, steps = windows.len(), "fwt reverse");
        let mut scratch = vec![0.0; buf.len()];
        for &h in windows.iter().rev() {
            trace!(window = h, "synthesis step");
            synthesize_into(&buf[..h], &self.filter, &mut scratch[..h]);
            buf[..h].copy_from_slice(&scratch[..h]);
        }
        Ok(())
    }
}
