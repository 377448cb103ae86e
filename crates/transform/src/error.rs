//! Error types for the pyramid-transform crate.

use pyramid_wavelet::{ErrorKind, WaveletError};

/// Error type for all fallible operations in the pyramid-transform crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransformError {
    /// Propagated from the wavelet engine.
    #[error(transparent)]
    Wavelet(#[from] WaveletError),

    /// Returned when a transform name does not match any known kind.
    #[error("unknown transform: {0}")]
    UnknownTransform(String),

    /// Returned when a wavelet transform is built without a filter.
    #[error("{0} requires a wavelet")]
    MissingWavelet(String),

    /// Returned when a signal, matrix or volume has no samples.
    #[error("input is empty")]
    EmptyInput,

    /// Returned when interleaved complex data has an odd number of values.
    #[error("interleaved complex data needs an even length, got {len}")]
    OddLength {
        /// Number of real values supplied.
        len: usize,
    },

    /// Returned when a level-limited call reaches a transform without levels.
    #[error("{transform} does not support level-limited transforms")]
    LevelsUnsupported {
        /// Name of the transform.
        transform: String,
    },

    /// Returned when the worker pool cannot be configured or started.
    #[error("scheduler: {0}")]
    Scheduler(String),
}

impl TransformError {
    /// Returns the broad classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Wavelet(e) => e.kind(),
            Self::UnknownTransform(_) | Self::MissingWavelet(_) | Self::Scheduler(_) => {
                ErrorKind::ConfigurationError
            }
            Self::EmptyInput | Self::OddLength { .. } | Self::LevelsUnsupported { .. } => {
                ErrorKind::PreconditionViolation
            }
        }
    }
}
