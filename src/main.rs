mod cli;
mod config;
mod convert;
mod demo;
mod logging;

use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use pyramid_transform::{ParallelScheduler, TransformKind, Transformer};
use pyramid_wavelet::Wavelet;

use crate::cli::Cli;
use crate::config::PyramidConfig;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = match config::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    };

    let transformer = match build(&cli, &config) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    };
    let Some(transformer) = transformer else {
        process::exit(2);
    };

    let level = cli.level.or(config.demo.level);
    if let Err(e) = demo::run(&transformer, &config.demo.signal, level) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

/// Builds the transformer, or prints usage and returns `None` when the
/// positional names do not resolve.
fn build(cli: &Cli, config: &PyramidConfig) -> Result<Option<Transformer>> {
    let scheduler = convert::build_scheduler_config(&config.parallel, cli.threads)
        .map(|c| ParallelScheduler::new(&c).map(Arc::new))
        .transpose()
        .context("failed to start worker pool")?;

    let built = cli
        .selection()
        .and_then(|s| convert::build_transformer(&s, &config.demo, scheduler));
    match built {
        Ok(t) => Ok(Some(t)),
        Err(e) => {
            eprintln!("error: {e}\n");
            print_usage();
            Ok(None)
        }
    }
}

fn print_usage() {
    let mut cmd = Cli::command();
    eprintln!("{}", cmd.render_usage());
    let kinds: Vec<String> = TransformKind::ALL
        .iter()
        .map(|k| format!("{} ({})", k.name(), k.alias()))
        .collect();
    let wavelets: Vec<&str> = Wavelet::ALL.iter().map(Wavelet::name).collect();
    eprintln!("\nTransforms: {}", kinds.join(", "));
    eprintln!("Wavelets:   {}", wavelets.join(", "));
}
