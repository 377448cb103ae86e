//! Shared level-aware transform contract and dyadic length helpers.

use std::iter;

use crate::error::WaveletError;
use crate::ledger::DecompositionLedger;

/// A length-preserving transform that can stop after any number of levels.
///
/// Implementors supply the in-place primitives and the level bound; the
/// allocating wrappers and the ledger operations are provided.
///
/// Implementations validate the buffer length and level before touching the
/// buffer, so a failed call leaves the input unchanged.
pub trait LevelTransform: Send + Sync {
    /// Returns the deepest level supported for a signal of `len` samples.
    ///
    /// # Errors
    ///
    /// Returns an error if no transform of this length is possible.
    fn max_level(&self, len: usize) -> Result<usize, WaveletError>;

    /// Applies `level` forward steps to `buf` in place.
    fn forward_in_place(&self, buf: &mut [f64], level: usize) -> Result<(), WaveletError>;

    /// Undoes `level` forward steps on `buf` in place.
    fn reverse_in_place(&self, buf: &mut [f64], level: usize) -> Result<(), WaveletError>;

    /// Forward transform down to `level`, returning a new buffer.
    fn forward_level(&self, signal: &[f64], level: usize) -> Result<Vec<f64>, WaveletError> {
        let mut out = signal.to_vec();
        self.forward_in_place(&mut out, level)?;
        Ok(out)
    }

    /// Reverse transform from `level`, returning a new buffer.
    fn reverse_level(&self, coeffs: &[f64], level: usize) -> Result<Vec<f64>, WaveletError> {
        let mut out = coeffs.to_vec();
        self.reverse_in_place(&mut out, level)?;
        Ok(out)
    }

    /// Full-depth forward transform.
    fn forward(&self, signal: &[f64]) -> Result<Vec<f64>, WaveletError> {
        let level = self.max_level(signal.len())?;
        self.forward_level(signal, level)
    }

    /// Full-depth reverse transform.
    fn reverse(&self, coeffs: &[f64]) -> Result<Vec<f64>, WaveletError> {
        let level = self.max_level(coeffs.len())?;
        self.reverse_level(coeffs, level)
    }

    /// Records the forward result at every level from 0 to the maximum.
    fn decompose(&self, signal: &[f64]) -> Result<DecompositionLedger, WaveletError> {
        let max = self.max_level(signal.len())?;
        let rows = (0..=max)
            .map(|level| self.forward_level(signal, level))
            .collect::<Result<Vec<_>, _>>()?;
        DecompositionLedger::from_rows(rows)
    }

    /// Reconstructs the signal from the deepest row of a ledger.
    fn recompose(&self, ledger: &DecompositionLedger) -> Result<Vec<f64>, WaveletError> {
        self.recompose_level(ledger, ledger.max_level())
    }

    /// Reconstructs the signal from ledger row `level`.
    ///
    /// # Errors
    ///
    /// Returns [`WaveletError::LevelOutOfRange`] if the ledger has no such row.
    fn recompose_level(
        &self,
        ledger: &DecompositionLedger,
        level: usize,
    ) -> Result<Vec<f64>, WaveletError> {
        let row = ledger.row(level).ok_or(WaveletError::LevelOutOfRange {
            requested: level,
            max: ledger.max_level(),
            len: ledger.signal_len(),
        })?;
        self.reverse_level(row, level)
    }
}

/// Returns `log2(len)` if `len` is a power of two.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`WaveletError::EmptySignal`] | `len == 0` |
/// | [`WaveletError::NotPowerOfTwo`] | `len` has more than one bit set |
pub fn dyadic_exponent(len: usize) -> Result<usize, WaveletError> {
    if len == 0 {
        return Err(WaveletError::EmptySignal);
    }
    if !len.is_power_of_two() {
        return Err(WaveletError::NotPowerOfTwo { len });
    }
    Ok(len.trailing_zeros() as usize)
}

pub(crate) fn check_level(len: usize, level: usize, max: usize) -> Result<(), WaveletError> {
    if level > max {
        return Err(WaveletError::LevelOutOfRange {
            requested: level,
            max,
            len,
        });
    }
    Ok(())
}

/// Window sizes visited by `level` halving steps, largest first.
///
/// Stops early once the window drops below `min`.
pub(crate) fn window_sizes(len: usize, level: usize, min: usize) -> Vec<usize> {
    iter::successors(Some(len), |&h| Some(h / 2))
        .take_while(|&h| h >= min.max(2))
        .take(level)
        .collect()
}
