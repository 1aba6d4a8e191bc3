// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Artifact loading.
//!
//! The format of a scaler or model artifact is chosen by its file extension:
//!
//! | Extension | Format | Backend |
//! |-----------|--------|---------|
//! | `.onnx` | ONNX graph | [`crate::onnx`] (ONNX Runtime) |
//! | `.json` | native parameters | [`NativeScaler`] / [`NativeClassifier`] |
//!
//! Artifact contents are not validated beyond what deserialization requires.
//! A scaler fitted on a different feature count surfaces later as a
//! dimension error.

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

use serde::de::DeserializeOwned;

use crate::classifier::{Classifier, NativeClassifier};
use crate::error::{InferenceError, Result};
use crate::inference::InferenceConfig;
use crate::onnx::{OnnxClassifier, OnnxScaler};
use crate::scaler::{NativeScaler, Scaler};

/// Serialization format of an artifact file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactFormat {
    /// ONNX graph executed by ONNX Runtime.
    Onnx,
    /// Native JSON parameters.
    Json,
}

impl ArtifactFormat {
    /// Returns the file extension for this format.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Onnx => "onnx",
            Self::Json => "json",
        }
    }

    /// Detect the format of `path` from its extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is missing or unsupported.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| {
                InferenceError::ArtifactLoad(format!(
                    "{}: cannot determine artifact format without a file extension",
                    path.display()
                ))
            })?;
        ext.parse()
            .map_err(|e| InferenceError::ArtifactLoad(format!("{}: {e}", path.display())))
    }
}

impl fmt::Display for ArtifactFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ArtifactFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "onnx" => Ok(Self::Onnx),
            "json" => Ok(Self::Json),
            _ => Err(format!(
                "unsupported artifact format '{s}', expected one of: onnx, json"
            )),
        }
    }
}

/// Load a fitted scaler.
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable, or not in the expected format.
pub fn load_scaler<P: AsRef<Path>>(path: P, config: &InferenceConfig) -> Result<Box<dyn Scaler>> {
    let path = path.as_ref();
    match ArtifactFormat::from_path(path)? {
        ArtifactFormat::Onnx => Ok(Box::new(OnnxScaler::load(path, config)?)),
        ArtifactFormat::Json => Ok(Box::new(read_json::<NativeScaler>(path)?)),
    }
}

/// Load a trained classifier.
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable, or not in the expected format.
pub fn load_classifier<P: AsRef<Path>>(
    path: P,
    config: &InferenceConfig,
) -> Result<Box<dyn Classifier>> {
    let path = path.as_ref();
    match ArtifactFormat::from_path(path)? {
        ArtifactFormat::Onnx => Ok(Box::new(OnnxClassifier::load(path, config)?)),
        ArtifactFormat::Json => Ok(Box::new(read_json::<NativeClassifier>(path)?)),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|e| {
        InferenceError::ArtifactLoad(format!("Failed to open {}: {e}", path.display()))
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        InferenceError::ArtifactLoad(format!("Failed to parse {}: {e}", path.display()))
    })
}
