//! Transform selection by name.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use ndarray::{Array2, Array3};
use num_complex::Complex64;
use pyramid_wavelet::{
    AncientEgyptianDecomposition, FastWaveletTransform, Wavelet, WaveletFilter,
    WaveletPacketTransform,
};
use tracing::debug;

use crate::dft::DiscreteFourierTransform;
use crate::error::TransformError;
use crate::lifting::DimensionalLifting;
use crate::parallel::ParallelScheduler;
use crate::transform::Transform;

/// The transform families that can be selected by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransformKind {
    /// Cascade wavelet transform.
    FastWavelet,
    /// Full-tree wavelet packet transform.
    WaveletPacket,
    /// Direct DFT.
    DiscreteFourier,
}

impl TransformKind {
    /// Every kind, in display order.
    pub const ALL: [TransformKind; 3] = [
        TransformKind::FastWavelet,
        TransformKind::WaveletPacket,
        TransformKind::DiscreteFourier,
    ];

    /// Returns the long name, e.g. `"Fast Wavelet Transform"`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FastWavelet => "Fast Wavelet Transform",
            Self::WaveletPacket => "Wavelet Packet Transform",
            Self::DiscreteFourier => "Discrete Fourier Transform",
        }
    }

    /// Short alias accepted by [`from_name`](Self::from_name).
    pub fn alias(&self) -> &'static str {
        match self {
            Self::FastWavelet => "fwt",
            Self::WaveletPacket => "wpt",
            Self::DiscreteFourier => "dft",
        }
    }

    /// Whether the kind is driven by a wavelet filter.
    pub fn needs_wavelet(&self) -> bool {
        !matches!(self, Self::DiscreteFourier)
    }

    /// Resolves a long name or alias, ignoring case and extra whitespace.
    ///
    /// # Example
    ///
    /// ```
    /// use pyramid_transform::TransformKind;
    ///
    /// let kind = TransformKind::from_name("wavelet  packet TRANSFORM").unwrap();
    /// assert_eq!(kind, TransformKind::WaveletPacket);
    /// assert!(TransformKind::from_name("Fast Fourier Transform").is_err());
    /// ```
    pub fn from_name(name: &str) -> Result<Self, TransformError> {
        let key = name
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join(" ");
        Self::ALL
            .into_iter()
            .find(|k| key == k.name().to_lowercase() || key == k.alias())
            .ok_or_else(|| TransformError::UnknownTransform(name.to_owned()))
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransformKind {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// Builds a [`Transformer`] from a kind, an optional wavelet and options.
///
/// # Example
///
/// ```
/// use pyramid_transform::{Transform, TransformBuilder, TransformKind};
/// use pyramid_wavelet::Wavelet;
///
/// let t = TransformBuilder::new(TransformKind::FastWavelet)
///     .with_wavelet(Wavelet::Haar)
///     .with_arbitrary_length(true)
///     .build()?;
/// let coeffs = t.forward(&[1.0, 2.0, 3.0])?;
/// assert_eq!(coeffs.len(), 3);
/// # Ok::<(), pyramid_transform::TransformError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TransformBuilder {
    kind: TransformKind,
    filter: Option<Arc<WaveletFilter>>,
    arbitrary_length: bool,
    scheduler: Option<Arc<ParallelScheduler>>,
}

impl TransformBuilder {
    /// Starts a builder for `kind` with no wavelet, dyadic lengths only and
    /// no scheduler.
    pub fn new(kind: TransformKind) -> Self {
        Self {
            kind,
            filter: None,
            arbitrary_length: false,
            scheduler: None,
        }
    }

    /// Resolves a transform name and an optional wavelet name.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::UnknownTransform`] or a wrapped
    /// [`UnsupportedWavelet`](pyramid_wavelet::WaveletError::UnsupportedWavelet).
    pub fn from_names(transform: &str, wavelet: Option<&str>) -> Result<Self, TransformError> {
        let mut builder = Self::new(TransformKind::from_name(transform)?);
        if let Some(name) = wavelet {
            builder = builder.with_wavelet(Wavelet::from_name(name)?);
        }
        Ok(builder)
    }

    /// Uses one of the shipped wavelets.
    pub fn with_wavelet(self, wavelet: Wavelet) -> Self {
        self.with_filter(wavelet.filter())
    }

    /// Uses a caller-supplied filter.
    pub fn with_filter(mut self, filter: impl Into<Arc<WaveletFilter>>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Wraps wavelet engines in [`AncientEgyptianDecomposition`] so any
    /// length is accepted. The DFT already accepts any length.
    pub fn with_arbitrary_length(mut self, enabled: bool) -> Self {
        self.arbitrary_length = enabled;
        self
    }

    /// Runs lifting passes and DFT bins on `scheduler`.
    pub fn with_scheduler(mut self, scheduler: Arc<ParallelScheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Returns the selected kind.
    pub fn kind(&self) -> TransformKind {
        self.kind
    }

    /// Returns whether arbitrary lengths are enabled.
    pub fn arbitrary_length(&self) -> bool {
        self.arbitrary_length
    }

    /// Builds the transformer.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::MissingWavelet`] if a wavelet kind has no
    /// filter.
    pub fn build(self) -> Result<Transformer, TransformError> {
        let engine = match (self.kind, self.filter) {
            (TransformKind::DiscreteFourier, _) => {
                let mut dft = DiscreteFourierTransform::new();
                if let Some(s) = &self.scheduler {
                    dft = dft.with_scheduler(Arc::clone(s));
                }
                Engine::Fourier(dft)
            }
            (kind, None) => return Err(TransformError::MissingWavelet(kind.name().to_owned())),
            (TransformKind::FastWavelet, Some(f)) => {
                let fwt = FastWaveletTransform::new(f);
                if self.arbitrary_length {
                    Engine::EgyptianFast(AncientEgyptianDecomposition::new(fwt))
                } else {
                    Engine::Fast(fwt)
                }
            }
            (TransformKind::WaveletPacket, Some(f)) => {
                let wpt = WaveletPacketTransform::new(f);
                if self.arbitrary_length {
                    Engine::EgyptianPacket(AncientEgyptianDecomposition::new(wpt))
                } else {
                    Engine::Packet(wpt)
                }
            }
        };
        let transformer = Transformer {
            kind: self.kind,
            engine,
            scheduler: self.scheduler,
        };
        debug!(
            transform = transformer.name(),
            wavelet = transformer.wavelet().map(WaveletFilter::name),
            arbitrary_length = self.arbitrary_length,
            parallel = transformer.scheduler.is_some(),
            "transformer built"
        );
        Ok(transformer)
    }
}

#[derive(Debug, Clone)]
enum Engine {
    Fast(FastWaveletTransform),
    Packet(WaveletPacketTransform),
    EgyptianFast(AncientEgyptianDecomposition<FastWaveletTransform>),
    EgyptianPacket(AncientEgyptianDecomposition<WaveletPacketTransform>),
    Fourier(DiscreteFourierTransform),
}

impl Engine {
    fn as_transform(&self) -> &dyn Transform {
        match self {
            Self::Fast(t) => t,
            Self::Packet(t) => t,
            Self::EgyptianFast(t) => t,
            Self::EgyptianPacket(t) => t,
            Self::Fourier(t) => t,
        }
    }

    fn filter(&self) -> Option<&WaveletFilter> {
        match self {
            Self::Fast(t) => Some(t.filter()),
            Self::Packet(t) => Some(t.filter()),
            Self::EgyptianFast(t) => Some(t.inner().filter()),
            Self::EgyptianPacket(t) => Some(t.inner().filter()),
            Self::Fourier(_) => None,
        }
    }
}

/// A configured transform exposing 1-D real, 1-D complex, 2-D and 3-D
/// operations.
#[derive(Debug, Clone)]
pub struct Transformer {
    kind: TransformKind,
    engine: Engine,
    scheduler: Option<Arc<ParallelScheduler>>,
}

impl Transformer {
    /// Returns the kind this transformer was built from.
    pub fn kind(&self) -> TransformKind {
        self.kind
    }

    /// Returns the wavelet filter, if the kind uses one.
    pub fn wavelet(&self) -> Option<&WaveletFilter> {
        self.engine.filter()
    }

    /// Returns the scheduler used for lifting and DFT bins.
    pub fn scheduler(&self) -> Option<&ParallelScheduler> {
        self.scheduler.as_deref()
    }

    /// Returns the separable 2-D/3-D operators over this transform.
    pub fn lifting(&self) -> DimensionalLifting<'_> {
        let lifting = DimensionalLifting::new(self.engine.as_transform());
        match self.scheduler() {
            Some(s) => lifting.with_scheduler(s),
            None => lifting,
        }
    }

    /// See [`DimensionalLifting::forward_2d`].
    pub fn forward_2d(&self, m: &Array2<f64>) -> Result<Array2<f64>, TransformError> {
        self.lifting().forward_2d(m)
    }

    /// See [`DimensionalLifting::reverse_2d`].
    pub fn reverse_2d(&self, m: &Array2<f64>) -> Result<Array2<f64>, TransformError> {
        self.lifting().reverse_2d(m)
    }

    /// See [`DimensionalLifting::forward_2d_levels`].
    pub fn forward_2d_levels(
        &self,
        m: &Array2<f64>,
        row_level: usize,
        col_level: usize,
    ) -> Result<Array2<f64>, TransformError> {
        self.lifting().forward_2d_levels(m, row_level, col_level)
    }

    /// See [`DimensionalLifting::reverse_2d_levels`].
    pub fn reverse_2d_levels(
        &self,
        m: &Array2<f64>,
        row_level: usize,
        col_level: usize,
    ) -> Result<Array2<f64>, TransformError> {
        self.lifting().reverse_2d_levels(m, row_level, col_level)
    }

    /// See [`DimensionalLifting::forward_3d`].
    pub fn forward_3d(&self, s: &Array3<f64>) -> Result<Array3<f64>, TransformError> {
        self.lifting().forward_3d(s)
    }

    /// See [`DimensionalLifting::reverse_3d`].
    pub fn reverse_3d(&self, s: &Array3<f64>) -> Result<Array3<f64>, TransformError> {
        self.lifting().reverse_3d(s)
    }

    /// See [`DimensionalLifting::forward_3d_levels`].
    pub fn forward_3d_levels(
        &self,
        s: &Array3<f64>,
        levels: [usize; 3],
    ) -> Result<Array3<f64>, TransformError> {
        self.lifting().forward_3d_levels(s, levels)
    }

    /// See [`DimensionalLifting::reverse_3d_levels`].
    pub fn reverse_3d_levels(
        &self,
        s: &Array3<f64>,
        levels: [usize; 3],
    ) -> Result<Array3<f64>, TransformError> {
        self.lifting().reverse_3d_levels(s, levels)
    }
}

impl Transform for Transformer {
    fn name(&self) -> &str {
        self.engine.as_transform().name()
    }

    fn forward(&self, signal: &[f64]) -> Result<Vec<f64>, TransformError> {
        self.engine.as_transform().forward(signal)
    }

    fn reverse(&self, coeffs: &[f64]) -> Result<Vec<f64>, TransformError> {
        self.engine.as_transform().reverse(coeffs)
    }

    fn forward_level(&self, signal: &[f64], level: usize) -> Result<Vec<f64>, TransformError> {
        self.engine.as_transform().forward_level(signal, level)
    }

    fn reverse_level(&self, coeffs: &[f64], level: usize) -> Result<Vec<f64>, TransformError> {
        self.engine.as_transform().reverse_level(coeffs, level)
    }

    fn forward_complex(&self, signal: &[Complex64]) -> Result<Vec<Complex64>, TransformError> {
        self.engine.as_transform().forward_complex(signal)
    }

    fn reverse_complex(&self, coeffs: &[Complex64]) -> Result<Vec<Complex64>, TransformError> {
        self.engine.as_transform().reverse_complex(coeffs)
    }
}
