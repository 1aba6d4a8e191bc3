// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Error types for the inference library.

use std::fmt;

/// Result type alias for inference operations.
pub type Result<T> = std::result::Result<T, InferenceError>;

/// Main error type for the inference library.
#[derive(Debug)]
pub enum InferenceError {
    /// A token on standard input is not a number.
    InputParse {
        /// 1-based input line.
        line: usize,
        /// Offending token.
        token: String,
    },
    /// A row has a different number of columns than the first row.
    RaggedRow {
        /// 1-based input line.
        line: usize,
        /// Column count of the first row.
        expected: usize,
        /// Column count of this row.
        found: usize,
    },
    /// Standard input contained no data rows.
    EmptyInput,
    /// Error loading a scaler or model artifact.
    ArtifactLoad(String),
    /// Input feature count does not match the fitted feature count.
    Dimension {
        /// Feature count the artifact was fitted on.
        expected: usize,
        /// Feature count of the input matrix.
        found: usize,
    },
    /// Error while running a transform or a prediction.
    Inference(String),
    /// Wrapped `std::io::Error`
    Io(std::io::Error),
}

impl fmt::Display for InferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InputParse { line, token } => {
                write!(f, "Input parse error: line {line}: '{token}' is not a number")
            }
            Self::RaggedRow {
                line,
                expected,
                found,
            } => write!(
                f,
                "Input parse error: line {line}: expected {expected} columns, found {found}"
            ),
            Self::EmptyInput => write!(f, "Input parse error: no rows on standard input"),
            Self::ArtifactLoad(msg) => write!(f, "Artifact load error: {msg}"),
            Self::Dimension { expected, found } => write!(
                f,
                "Dimension error: artifact expects {expected} features, input has {found}"
            ),
            Self::Inference(msg) => write!(f, "Inference error: {msg}"),
            Self::Io(err) => write!(f, "IO error: {err}"),
        }
    }
}

impl std::error::Error for InferenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for InferenceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ort::Error> for InferenceError {
    fn from(err: ort::Error) -> Self {
        Self::Inference(err.to_string())
    }
}
