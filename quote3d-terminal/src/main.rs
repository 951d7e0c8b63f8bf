/// Quote3D command line
///
/// Prints an approximate print price for a model file:
///   quote3d part.stl --material PETG --scale 50 --quantity 4
///   quote3d --dimensions 100 40 20 --material ABS
///
/// Set RUST_LOG=info (or debug) to trace loading and measurement.

use anyhow::Result;
use clap::Parser;
use quote3d_terminal::Cli;
use std::io::stdout;

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    quote3d_terminal::run(&cli, &mut stdout().lock())
}
