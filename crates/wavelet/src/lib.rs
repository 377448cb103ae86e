//! # pyramid-wavelet
//!
//! Dyadic wavelet pyramids over real signals of any length.
//!
//! ## Engine
//!
//! ```mermaid
//! graph LR
//!     A["Wavelet::from_name(name)?"] -->|"filter()"| B["WaveletFilter"]
//!     B --> C["analyze / synthesize"]
//!     C --> D["FastWaveletTransform"]
//!     C --> E["WaveletPacketTransform"]
//!     D --> F["AncientEgyptianDecomposition"]
//!     E --> F
//!     D -->|"decompose()"| G["DecompositionLedger"]
//!     B -->|"modwt(&signal, &config)?"| H["ModwtCoeffs"]
//! ```
//!
//! The cascade and packet transforms require power-of-two lengths and accept
//! any level in `[0, log2 N]`. Wrapping either in
//! [`AncientEgyptianDecomposition`] lifts the length restriction. The MODWT
//! is redundant and works on any length directly.
//!
//! ## Quick Start
//!
//! ```
//! use pyramid_wavelet::{FastWaveletTransform, LevelTransform, Wavelet};
//!
//! let fwt = FastWaveletTransform::new(Wavelet::Daubechies2.filter());
//! let signal = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
//! let coeffs = fwt.forward(&signal)?;
//! let back = fwt.reverse(&coeffs)?;
//! assert!(back.iter().zip(&signal).all(|(a, b)| (a - b).abs() < 1e-10));
//! # Ok::<(), pyramid_wavelet::WaveletError>(())
//! ```

mod bank;
mod egyptian;
mod error;
mod filter;
mod fwt;
mod ledger;
mod modwt;
mod pyramid;
mod step;
mod wpt;

pub use bank::Wavelet;
pub use egyptian::{AncientEgyptianDecomposition, Segment, egyptian_segments};
pub use error::{ErrorKind, WaveletError};
pub use filter::WaveletFilter;
pub use fwt::FastWaveletTransform;
pub use ledger::DecompositionLedger;
pub use modwt::{ModwtCoeffs, ModwtConfig, imodwt, max_modwt_level, modwt};
pub use pyramid::{LevelTransform, dyadic_exponent};
pub use step::{analyze, synthesize};
pub use wpt::WaveletPacketTransform;
