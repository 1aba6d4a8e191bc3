// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::process;

use clap::Parser;

use tabular_inference::cli::args::Cli;
use tabular_inference::cli::predict::run_prediction;
use tabular_inference::error;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run_prediction(&cli) {
        error!("{e}");
        process::exit(1);
    }
}
