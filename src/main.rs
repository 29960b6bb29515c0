use std::path::Path;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use waveform_printer::cli::Args;

fn main() {
    // Argument parsing
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Start SSS Waveform Printer");

    if let Err(err) = waveform_printer::run(Path::new(&args.input_file), Path::new(&args.output_file)) {
        error!("{err}");
        std::process::exit(1);
    }

    info!("Waveform Printer Success !");
}
