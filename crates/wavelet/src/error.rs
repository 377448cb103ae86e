//! Error types for the pyramid-wavelet crate.

/// Broad classification of a [`WaveletError`].
///
/// Every error is a deterministic input or configuration problem; none of
/// them is worth retrying with the same arguments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller passed data that violates a transform precondition.
    PreconditionViolation,
    /// A wavelet or filter could not be resolved or constructed.
    ConfigurationError,
    /// A numeric guard rejected near-zero filter energy.
    NumericDegeneracy,
}

/// Error type for all fallible operations in the pyramid-wavelet crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WaveletError {
    /// Returned when a signal has no samples.
    #[error("signal is empty")]
    EmptySignal,

    /// Returned when a dyadic transform receives a length that is not a power of two.
    #[error("length {len} is not a power of two")]
    NotPowerOfTwo {
        /// Length of the rejected signal.
        len: usize,
    },

    /// Returned when the requested decomposition level is outside `[0, max]`.
    #[error("level {requested} out of range: max for length {len} is {max}")]
    LevelOutOfRange {
        /// Level that was requested.
        requested: usize,
        /// Largest level supported for this length.
        max: usize,
        /// Length of the signal.
        len: usize,
    },

    /// Returned when a single pyramid step is applied to a window that is
    /// too short or of odd length.
    #[error("window of {len} samples is invalid: need an even length of at least {min}")]
    WindowTooShort {
        /// Length of the window.
        len: usize,
        /// Minimum transform length of the filter.
        min: usize,
    },

    /// Returned when two buffers that must agree in length do not.
    #[error("length mismatch: expected {expected}, got {got}")]
    LengthMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },

    /// Returned when a wavelet name does not resolve to a known filter.
    #[error("unsupported wavelet: {0}")]
    UnsupportedWavelet(String),

    /// Returned when user-supplied filter coefficients are malformed.
    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    /// Returned when a filter's energy is too small to normalize.
    #[error("degenerate filter: energy {energy:e} is below the normalization threshold")]
    DegenerateFilter {
        /// Sum of squared coefficients.
        energy: f64,
    },
}

impl WaveletError {
    /// Returns the broad classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptySignal
            | Self::NotPowerOfTwo { .. }
            | Self::LevelOutOfRange { .. }
            | Self::WindowTooShort { .. }
            | Self::LengthMismatch { .. } => ErrorKind::PreconditionViolation,
            Self::UnsupportedWavelet(_) | Self::InvalidFilter(_) => ErrorKind::ConfigurationError,
            Self::DegenerateFilter { .. } => ErrorKind::NumericDegeneracy,
        }
    }
}
