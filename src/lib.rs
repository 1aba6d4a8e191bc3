// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

#![allow(clippy::multiple_crate_versions)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Tabular Inference
//!
//! Single-shot batch inference for fitted tabular classifiers. A feature matrix is
//! read from standard input, passed through a previously fitted scaler and a
//! previously trained classifier, and one boolean prediction per row is printed.
//!
//! ## CLI Usage
//!
//! ```bash
//! # ONNX artifacts exported from scikit-learn with skl2onnx
//! tabular-inference scaler.onnx model.onnx < samples.txt
//!
//! # Native JSON artifacts
//! printf '1 2\n-1 2\n' | tabular-inference scaler.json model.json
//! True
//! False
//! ```
//!
//! **CLI Options:**
//!
//! | Option | Short | Description | Default |
//! |--------|-------|-------------|---------|
//! | `SCALER` | | Scaler artifact path (positional) | required |
//! | `MODEL` | | Model artifact path (positional) | required |
//! | `--bool-style` | | `python`, `lower` or `numeric` | `python` |
//! | `--threads` | | ONNX Runtime intra-op threads | `0` (auto) |
//! | `--verbose` | `-v` | Diagnostics on stderr | `false` |
//!
//! Exit status is `0` on success, `2` on argument errors and `1` on any other failure.
//! Nothing is written to standard output unless every row was predicted.
//!
//! ## Quick Start (Library)
//!
//! ```no_run
//! use tabular_inference::{BoolStyle, Predictor, parse_matrix, write_predictions};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut predictor = Predictor::load("scaler.onnx", "model.onnx")?;
//!     let x = parse_matrix("0.5 1.2 3.0\n")?;
//!     let predictions = predictor.predict(x.view())?;
//!     write_predictions(&mut std::io::stdout(), &predictions, BoolStyle::Python)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Artifact Formats
//!
//! | Extension | Contents |
//! |-----------|----------|
//! | `.onnx` | ONNX graph; input `float_input` (or the first input), first output used |
//! | `.json` | Native parameters tagged by `"kind"` |
//!
//! Native scalers: `identity`, `standard` (`mean`, `scale`), `min_max` (`min`, `scale`),
//! `max_abs` (`max_abs`). Native classifiers: `linear` (`coef`, `intercept`, `classes`),
//! `stump` (`feature`, `threshold`, `classes`).
//!
//! ```json
//! {"kind": "standard", "mean": [0.0, 1.5], "scale": [1.0, 0.5]}
//! {"kind": "linear", "coef": [1.0, 0.0], "intercept": 0.0}
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`matrix`] | Parsing the feature matrix from text |
//! | [`scaler`] | [`Scaler`] trait and native scalers |
//! | [`classifier`] | [`Classifier`] trait and native classifiers |
//! | [`onnx`] | ONNX Runtime backed artifacts |
//! | [`artifact`] | Format detection and loading |
//! | [`model`] | [`Predictor`] pipeline |
//! | [`output`] | Boolean rendering |
//! | [`inference`] | [`InferenceConfig`] |
//! | [`error`] | Error types ([`InferenceError`], [`Result`]) |

// Modules
pub mod artifact;
pub mod classifier;
pub mod cli;
pub mod error;
pub mod inference;
pub mod matrix;
pub mod model;
pub mod onnx;
pub mod output;
pub mod scaler;

// Re-export main types for convenience
pub use artifact::{ArtifactFormat, load_classifier, load_scaler};
pub use classifier::{Classifier, LinearClassifier, NativeClassifier, StumpClassifier};
pub use error::{InferenceError, Result};
pub use inference::InferenceConfig;
pub use matrix::{parse_matrix, read_matrix};
pub use model::Predictor;
pub use onnx::{OnnxClassifier, OnnxScaler};
pub use output::{BoolStyle, label_to_bool, write_predictions};
pub use scaler::{IdentityScaler, MaxAbsScaler, MinMaxScaler, NativeScaler, Scaler, StandardScaler};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
