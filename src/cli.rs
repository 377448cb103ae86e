use std::path::PathBuf;

use clap::Parser;
use pyramid_transform::{TransformError, TransformKind};

/// Pyramid wavelet and Fourier transform demo.
#[derive(Parser, Debug)]
#[command(
    name = "pyramid",
    version,
    about = "Runs a forward and reverse transform on a demo signal",
    after_help = "Examples:\n  pyramid Fast Wavelet Transform Daubechies 2\n  pyramid wpt haar\n  pyramid Discrete Fourier Transform"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to TOML configuration file (missing file = defaults).
    #[arg(short, long, default_value = "pyramid.toml")]
    pub config: PathBuf,

    /// Worker threads; enables the parallel scheduler (0 = one per core).
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Stop after this many levels instead of the full depth.
    #[arg(short, long)]
    pub level: Option<usize>,

    /// Transform name followed by the wavelet name.
    #[arg(required = true, num_args = 1..)]
    pub tokens: Vec<String>,
}

/// A transform kind and the wavelet name that followed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub kind: TransformKind,
    pub wavelet: Option<String>,
}

impl Cli {
    /// Splits the positional tokens into a transform name and a wavelet name.
    ///
    /// The longest leading run of tokens that names a transform wins; the
    /// remaining tokens form the wavelet name.
    pub fn selection(&self) -> Result<Selection, TransformError> {
        split_tokens(&self.tokens)
    }
}

fn split_tokens(tokens: &[String]) -> Result<Selection, TransformError> {
    for cut in (1..=tokens.len()).rev() {
        if let Ok(kind) = TransformKind::from_name(&tokens[..cut].join(" ")) {
            let rest = tokens[cut..].join(" ");
            let wavelet = (!rest.is_empty()).then_some(rest);
            return Ok(Selection { kind, wavelet });
        }
    }
    Err(TransformError::UnknownTransform(tokens.join(" ")))
}
