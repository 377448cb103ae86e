//! The common 1-D contract shared by every engine.

use num_complex::Complex64;
use pyramid_wavelet::{
    AncientEgyptianDecomposition, FastWaveletTransform, LevelTransform, WaveletPacketTransform,
};

use crate::error::TransformError;

/// A length-preserving, invertible 1-D transform.
///
/// Real-valued `forward`/`reverse` are required. Level-limited calls default
/// to [`TransformError::LevelsUnsupported`]; the wavelet engines override
/// them. Complex signals are handled by interleaving `(re, im)` pairs into a
/// real buffer of twice the length, so every engine accepts them.
pub trait Transform: Send + Sync {
    /// Human-readable name of the transform.
    fn name(&self) -> &str;

    /// Full-depth forward transform.
    fn forward(&self, signal: &[f64]) -> Result<Vec<f64>, TransformError>;

    /// Full-depth reverse transform.
    fn reverse(&self, coeffs: &[f64]) -> Result<Vec<f64>, TransformError>;

    /// Forward transform stopping after `level` steps.
    fn forward_level(&self, _signal: &[f64], _level: usize) -> Result<Vec<f64>, TransformError> {
        Err(TransformError::LevelsUnsupported {
            transform: self.name().to_owned(),
        })
    }

    /// Inverse of [`forward_level`](Self::forward_level) at the same level.
    fn reverse_level(&self, _coeffs: &[f64], _level: usize) -> Result<Vec<f64>, TransformError> {
        Err(TransformError::LevelsUnsupported {
            transform: self.name().to_owned(),
        })
    }

    /// Forward transform of a complex signal.
    fn forward_complex(&self, signal: &[Complex64]) -> Result<Vec<Complex64>, TransformError> {
        deinterleave(&self.forward(&interleave(signal))?)
    }

    /// Reverse transform of a complex signal.
    fn reverse_complex(&self, coeffs: &[Complex64]) -> Result<Vec<Complex64>, TransformError> {
        deinterleave(&self.reverse(&interleave(coeffs))?)
    }

    /// Level-limited forward transform of a complex signal.
    ///
    /// The level refers to the interleaved buffer of length `2 * N`.
    fn forward_complex_level(
        &self,
        signal: &[Complex64],
        level: usize,
    ) -> Result<Vec<Complex64>, TransformError> {
        deinterleave(&self.forward_level(&interleave(signal), level)?)
    }

    /// Inverse of [`forward_complex_level`](Self::forward_complex_level).
    fn reverse_complex_level(
        &self,
        coeffs: &[Complex64],
        level: usize,
    ) -> Result<Vec<Complex64>, TransformError> {
        deinterleave(&self.reverse_level(&interleave(coeffs), level)?)
    }
}

/// Flattens complex samples into `[re0, im0, re1, im1, ...]`.
pub fn interleave(signal: &[Complex64]) -> Vec<f64> {
    signal.iter().flat_map(|c| [c.re, c.im]).collect()
}

/// Rebuilds complex samples from interleaved `(re, im)` pairs.
///
/// # Errors
///
/// Returns [`TransformError::OddLength`] if `data` has an odd length.
pub fn deinterleave(data: &[f64]) -> Result<Vec<Complex64>, TransformError> {
    if data.len() % 2 != 0 {
        return Err(TransformError::OddLength { len: data.len() });
    }
    Ok(data
        .chunks_exact(2)
        .map(|pair| Complex64::new(pair[0], pair[1]))
        .collect())
}

// The wavelet engines already satisfy the level-aware contract; these impls
// only lift their errors.
macro_rules! level_aware {
    () => {
        fn forward(&self, signal: &[f64]) -> Result<Vec<f64>, TransformError> {
            Ok(LevelTransform::forward(self, signal)?)
        }

        fn reverse(&self, coeffs: &[f64]) -> Result<Vec<f64>, TransformError> {
            Ok(LevelTransform::reverse(self, coeffs)?)
        }

        fn forward_level(&self, signal: &[f64], level: usize) -> Result<Vec<f64>, TransformError> {
            Ok(LevelTransform::forward_level(self, signal, level)?)
        }

        fn reverse_level(&self, coeffs: &[f64], level: usize) -> Result<Vec<f64>, TransformError> {
            Ok(LevelTransform::reverse_level(self, coeffs, level)?)
        }
    };
}

impl Transform for FastWaveletTransform {
    fn name(&self) -> &str {
        "Fast Wavelet Transform"
    }

    level_aware!();
}

impl Transform for WaveletPacketTransform {
    fn name(&self) -> &str {
        "Wavelet Packet Transform"
    }

    level_aware!();
}

impl<T: LevelTransform> Transform for AncientEgyptianDecomposition<T> {
    fn name(&self) -> &str {
        "Ancient Egyptian Decomposition"
    }

    level_aware!();
}
