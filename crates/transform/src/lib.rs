//! # pyramid-transform
//!
//! A uniform surface over the wavelet engines and the direct DFT, with
//! separable 2-D/3-D operators and an optional worker pool.
//!
//! ```mermaid
//! graph LR
//!     A["TransformBuilder::from_names(kind, wavelet)?"] -->|"build()?"| B["Transformer"]
//!     B --> C["Transform (1-D real / complex)"]
//!     B -->|"lifting()"| D["DimensionalLifting (2-D / 3-D)"]
//!     E["ParallelScheduler"] -.-> D
//!     E -.-> F["DiscreteFourierTransform"]
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use ndarray::Array2;
//! use pyramid_transform::{Transform, TransformBuilder};
//!
//! let t = TransformBuilder::from_names("Fast Wavelet Transform", Some("Haar"))?.build()?;
//! let coeffs = t.forward(&[1.0, 2.0, 3.0, 4.0])?;
//! assert_eq!(coeffs.len(), 4);
//!
//! let image = Array2::from_elem((4, 8), 1.0);
//! let back = t.reverse_2d(&t.forward_2d(&image)?)?;
//! assert!((back[[3, 7]] - 1.0).abs() < 1e-12);
//! # Ok::<(), pyramid_transform::TransformError>(())
//! ```

mod builder;
mod dft;
mod error;
mod lifting;
mod parallel;
mod transform;

pub use builder::{TransformBuilder, TransformKind, Transformer};
pub use dft::DiscreteFourierTransform;
pub use error::TransformError;
pub use lifting::DimensionalLifting;
pub use parallel::{ParallelScheduler, SchedulerConfig};
pub use transform::{Transform, deinterleave, interleave};
