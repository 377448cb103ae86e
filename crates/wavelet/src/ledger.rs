//! Per-level record of a decomposition.

use crate::error::WaveletError;

/// Forward results at every level of a decomposition.
///
/// Row 0 is the original signal; row `l` is the transform after `l` steps.
/// Any row can be fed back through the matching partial reverse to recover
/// row 0.
///
/// # Example
///
/// ```
/// use pyramid_wavelet::{FastWaveletTransform, LevelTransform, Wavelet};
///
/// let fwt = FastWaveletTransform::new(Wavelet::Haar.filter());
/// let ledger = fwt.decompose(&[1.0, 1.0, 1.0, 1.0]).unwrap();
/// assert_eq!(ledger.max_level(), 2);
/// assert_eq!(ledger.original(), &[1.0, 1.0, 1.0, 1.0]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DecompositionLedger {
    rows: Vec<Vec<f64>>,
}

impl DecompositionLedger {
    /// Builds a ledger from rows ordered by level.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`WaveletError::EmptySignal`] | no rows, or row 0 is empty |
    /// | [`WaveletError::LengthMismatch`] | rows differ in length |
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, WaveletError> {
        let len = rows.first().map_or(0, Vec::len);
        if len == 0 {
            return Err(WaveletError::EmptySignal);
        }
        if let Some(bad) = rows.iter().find(|r| r.len() != len) {
            return Err(WaveletError::LengthMismatch {
                expected: len,
                got: bad.len(),
            });
        }
        Ok(Self { rows })
    }

    /// Returns the deepest recorded level.
    pub fn max_level(&self) -> usize {
        self.rows.len() - 1
    }

    /// Returns the number of samples in each row.
    pub fn signal_len(&self) -> usize {
        self.rows[0].len()
    }

    /// Returns the row recorded at `level`, if any.
    pub fn row(&self, level: usize) -> Option<&[f64]> {
        self.rows.get(level).map(|v| v.as_slice())
    }

    /// Returns the original signal (row 0).
    pub fn original(&self) -> &[f64] {
        &self.rows[0]
    }

    /// Returns the fully decomposed row.
    pub fn deepest(&self) -> &[f64] {
        &self.rows[self.max_level()]
    }

    /// Iterates over rows from level 0 upwards.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.rows.iter().map(|v| v.as_slice())
    }

    /// Consumes the ledger and returns its rows.
    pub fn into_rows(self) -> Vec<Vec<f64>> {
        self.rows
    }
}
