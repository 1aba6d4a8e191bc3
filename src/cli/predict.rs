// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::io::{self, BufWriter};
use std::path::Path;
use std::time::Instant;

use crate::artifact::ArtifactFormat;
use crate::cli::args::Cli;
use crate::cli::logging::set_verbose;
use crate::error::Result;
use crate::matrix::read_matrix;
use crate::output::write_predictions;
use crate::{InferenceConfig, Predictor, VERSION};
use crate::{verbose, warn};

/// Read samples from stdin, predict, and print one boolean per sample.
///
/// Predictions are written only after every row has been classified, so a
/// failure never leaves partial output behind.
///
/// # Errors
///
/// Returns the first error from reading input, loading artifacts, inference,
/// or writing output.
pub fn run_prediction(args: &Cli) -> Result<()> {
    set_verbose(args.verbose);
    verbose!("tabular-inference {VERSION}");

    if args.threads > 0 && !is_onnx(&args.scaler) && !is_onnx(&args.model) {
        warn!("'--threads' only applies to ONNX artifacts and will be ignored.");
    }

    let config = InferenceConfig::new()
        .with_bool_style(args.bool_style)
        .with_threads(args.threads);

    let x = read_matrix(io::stdin().lock())?;
    verbose!("Read {} samples x {} features", x.nrows(), x.ncols());

    let mut predictor = Predictor::load_with_config(&args.scaler, &args.model, config)?;
    verbose!(
        "Loaded {} scaler from {} and {} model from {}",
        predictor.scaler().kind(),
        args.scaler.display(),
        predictor.classifier().kind(),
        args.model.display()
    );

    let start = Instant::now();
    let predictions = predictor.predict(x.view())?;
    let elapsed = start.elapsed().as_secs_f64() * 1000.0;

    let positives = predictions.iter().filter(|&&p| p).count();
    verbose!(
        "Predicted {} samples ({} positive) in {:.1}ms",
        predictions.len(),
        positives,
        elapsed
    );

    let mut out = BufWriter::new(io::stdout().lock());
    write_predictions(&mut out, &predictions, predictor.config().bool_style)
}

fn is_onnx(path: &Path) -> bool {
    matches!(ArtifactFormat::from_path(path), Ok(ArtifactFormat::Onnx))
}
