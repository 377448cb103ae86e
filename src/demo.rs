//! Forward then reverse on the configured demo signal.

use anyhow::{Context, Result};
use pyramid_transform::{Transform, TransformKind, Transformer};
use tracing::info;

/// Transforms `signal`, inverts the result and prints all three rows.
pub fn run(transformer: &Transformer, signal: &[f64], level: Option<usize>) -> Result<()> {
    info!(
        transform = transformer.name(),
        len = signal.len(),
        level,
        "running demo"
    );
    let (coeffs, back) = match level {
        Some(l) => {
            let coeffs = transformer
                .forward_level(signal, l)
                .with_context(|| format!("forward transform at level {l} failed"))?;
            let back = transformer
                .reverse_level(&coeffs, l)
                .with_context(|| format!("reverse transform at level {l} failed"))?;
            (coeffs, back)
        }
        None => {
            let coeffs = transformer
                .forward(signal)
                .context("forward transform failed")?;
            let back = transformer
                .reverse(&coeffs)
                .context("reverse transform failed")?;
            (coeffs, back)
        }
    };

    let domain = match transformer.kind() {
        TransformKind::DiscreteFourier => "frequency",
        TransformKind::FastWavelet | TransformKind::WaveletPacket => "hilbert",
    };
    println!("{}", format_row("time", signal));
    println!("{}", format_row(domain, &coeffs));
    println!("{}", format_row("reverse", &back));

    let error = max_abs_diff(signal, &back);
    info!(max_error = error, "reconstruction");
    println!("max reconstruction error: {error:.3e}");
    Ok(())
}

fn format_row(label: &str, values: &[f64]) -> String {
    let cells: Vec<String> = values.iter().map(|v| format!("{v:>10.4}")).collect();
    format!("{label:<10}{}", cells.join(" "))
}

fn max_abs_diff(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}
