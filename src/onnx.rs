// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! ONNX-backed scaler and classifier artifacts.
//!
//! Fitted scikit-learn objects exported with `skl2onnx` take a single `float` tensor
//! of shape `[rows, features]`. Scalers return a `float` matrix of the same shape.
//! Classifiers return the label tensor as their first output and optionally a
//! probability output, which is ignored here.

use std::path::Path;

use ndarray::{Array1, Array2, ArrayView2};
use ort::session::Session;
use ort::session::builder::GraphOptimizationLevel;
use ort::value::{DynValue, TensorRef};

use crate::classifier::Classifier;
use crate::error::{InferenceError, Result};
use crate::inference::InferenceConfig;
use crate::scaler::Scaler;

/// Input name used by `skl2onnx` for float feature matrices.
const FLOAT_INPUT_NAME: &str = "float_input";

/// A loaded ONNX Runtime session with a single matrix input.
struct OnnxSession {
    session: Session,
    input_name: String,
    output_name: String,
}

impl OnnxSession {
    fn load(path: &Path, config: &InferenceConfig) -> Result<Self> {
        if !path.exists() {
            return Err(InferenceError::ArtifactLoad(format!(
                "Artifact file not found: {}",
                path.display()
            )));
        }

        let session = Session::builder()
            .map_err(|e| load_error(path, "Failed to create session builder", &e))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| load_error(path, "Failed to set optimization level", &e))?
            .with_intra_threads(config.num_threads)
            .map_err(|e| load_error(path, "Failed to set intra-thread count", &e))?
            .commit_from_file(path)
            .map_err(|e| load_error(path, "Failed to load model", &e))?;

        let input_name = select_input(session.inputs.iter().map(|i| i.name.as_str()))
            .map(str::to_owned)
            .ok_or_else(|| {
                InferenceError::ArtifactLoad(format!("{}: graph has no inputs", path.display()))
            })?;

        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .ok_or_else(|| {
                InferenceError::ArtifactLoad(format!("{}: graph has no outputs", path.display()))
            })?;

        Ok(Self {
            session,
            input_name,
            output_name,
        })
    }

    /// Run the graph on `x` and return the first output as `(shape, values)`.
    #[allow(clippy::cast_possible_truncation)]
    fn run(&mut self, x: ArrayView2<'_, f64>) -> Result<(Vec<usize>, Vec<f64>)> {
        let input = x.mapv(|v| v as f32);
        let input_contiguous = input.as_standard_layout();

        let input_tensor = TensorRef::from_array_view(&input_contiguous).map_err(|e| {
            InferenceError::Inference(format!("Failed to create input tensor: {e}"))
        })?;

        let inputs = ort::inputs![self.input_name.as_str() => input_tensor];

        let outputs = self
            .session
            .run(inputs)
            .map_err(|e| InferenceError::Inference(format!("Inference failed: {e}")))?;

        let output = outputs.get(self.output_name.as_str()).ok_or_else(|| {
            InferenceError::Inference(format!("Output '{}' not found", self.output_name))
        })?;

        numeric_values(output).ok_or_else(|| {
            InferenceError::Inference(format!(
                "Output '{}' is not a numeric tensor",
                self.output_name
            ))
        })
    }
}

/// Prefer the `float_input` tensor, otherwise the first graph input.
fn select_input<'a>(mut names: impl Iterator<Item = &'a str> + Clone) -> Option<&'a str> {
    names
        .clone()
        .find(|&name| name == FLOAT_INPUT_NAME)
        .or_else(|| names.next())
}

/// Read a tensor as `f64` values, trying `f32`, then `f64`, then `i64`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn numeric_values(value: &DynValue) -> Option<(Vec<usize>, Vec<f64>)> {
    if let Ok((shape, data)) = value.try_extract_tensor::<f32>() {
        let shape = shape.iter().map(|&d| d as usize).collect();
        return Some((shape, data.iter().map(|&v| f64::from(v)).collect()));
    }
    if let Ok((shape, data)) = value.try_extract_tensor::<f64>() {
        let shape = shape.iter().map(|&d| d as usize).collect();
        return Some((shape, data.to_vec()));
    }
    if let Ok((shape, data)) = value.try_extract_tensor::<i64>() {
        let shape = shape.iter().map(|&d| d as usize).collect();
        return Some((shape, data.iter().map(|&v| v as f64).collect()));
    }
    None
}

/// Shape a scaler output as a matrix with one row per input row.
fn scaled_matrix(shape: &[usize], values: Vec<f64>, rows: usize) -> Result<Array2<f64>> {
    match shape {
        [r, cols] if *r == rows => Array2::from_shape_vec((rows, *cols), values)
            .map_err(|e| InferenceError::Inference(format!("Bad scaler output: {e}"))),
        _ => Err(InferenceError::Inference(format!(
            "Scaler output shape {shape:?} does not match {rows} input rows"
        ))),
    }
}

/// Flatten a label output shaped `[rows]` or `[rows, 1]`.
fn label_vector(shape: &[usize], labels: Vec<f64>, rows: usize) -> Result<Array1<f64>> {
    match shape {
        [r] | [r, 1] if *r == rows && labels.len() == rows => Ok(Array1::from(labels)),
        _ => Err(InferenceError::Inference(format!(
            "Label output shape {shape:?} does not match {rows} input rows"
        ))),
    }
}

fn load_error(path: &Path, context: &str, err: &ort::Error) -> InferenceError {
    InferenceError::ArtifactLoad(format!("{}: {context}: {err}", path.display()))
}

/// Scaler executed by ONNX Runtime.
pub struct OnnxScaler {
    inner: OnnxSession,
}

impl OnnxScaler {
    /// Load a scaler graph from an `.onnx` file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file doesn't exist or can't be loaded.
    pub fn load<P: AsRef<Path>>(path: P, config: &InferenceConfig) -> Result<Self> {
        Ok(Self {
            inner: OnnxSession::load(path.as_ref(), config)?,
        })
    }
}

impl Scaler for OnnxScaler {
    fn kind(&self) -> &'static str {
        "onnx"
    }

    fn n_features(&self) -> Option<usize> {
        None
    }

    fn transform(&mut self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        let (shape, values) = self.inner.run(x)?;
        scaled_matrix(&shape, values, x.nrows())
    }
}

impl std::fmt::Debug for OnnxScaler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxScaler")
            .field("input", &self.inner.input_name)
            .field("output", &self.inner.output_name)
            .finish()
    }
}

/// Classifier executed by ONNX Runtime.
pub struct OnnxClassifier {
    inner: OnnxSession,
}

impl OnnxClassifier {
    /// Load a classifier graph from an `.onnx` file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file doesn't exist or can't be loaded.
    pub fn load<P: AsRef<Path>>(path: P, config: &InferenceConfig) -> Result<Self> {
        Ok(Self {
            inner: OnnxSession::load(path.as_ref(), config)?,
        })
    }
}

impl Classifier for OnnxClassifier {
    fn kind(&self) -> &'static str {
        "onnx"
    }

    fn n_features(&self) -> Option<usize> {
        None
    }

    fn predict(&mut self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>> {
        let (shape, labels) = self.inner.run(x)?;
        label_vector(&shape, labels, x.nrows())
    }
}

impl std::fmt::Debug for OnnxClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxClassifier")
            .field("input", &self.inner.input_name)
            .field("output", &self.inner.output_name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use ort::value::Tensor;

    use super::*;

    #[test]
    fn test_scaler_not_found() {
        let result = OnnxScaler::load("nonexistent_scaler.onnx", &InferenceConfig::default());
        assert!(matches!(result, Err(InferenceError::ArtifactLoad(_))));
    }

    #[test]
    fn test_classifier_not_found() {
        let result = OnnxClassifier::load("nonexistent_model.onnx", &InferenceConfig::default());
        assert!(matches!(result, Err(InferenceError::ArtifactLoad(_))));
    }

    #[test]
    fn test_select_input_prefers_float_input() {
        let names = ["X", "float_input", "mask"];
        assert_eq!(select_input(names.iter().copied()), Some("float_input"));

        let names = ["X", "mask"];
        assert_eq!(select_input(names.iter().copied()), Some("X"));

        assert_eq!(select_input(std::iter::empty()), None);
    }

    #[test]
    fn test_scaled_matrix_shapes() {
        let m = scaled_matrix(&[2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2).unwrap();
        assert_eq!(m.dim(), (2, 3));
        assert!((m[[1, 0]] - 4.0).abs() < 1e-12);

        // Row count differs from the input.
        let result = scaled_matrix(&[3, 2], vec![0.0; 6], 2);
        assert!(matches!(result, Err(InferenceError::Inference(_))));

        // Not a matrix.
        let result = scaled_matrix(&[4], vec![0.0; 4], 4);
        assert!(matches!(result, Err(InferenceError::Inference(_))));

        // Shape and data disagree.
        let result = scaled_matrix(&[2, 2], vec![0.0; 3], 2);
        assert!(matches!(result, Err(InferenceError::Inference(_))));
    }

    #[test]
    fn test_label_vector_shapes() {
        let labels = label_vector(&[3], vec![1.0, 0.0, 1.0], 3).unwrap();
        assert_eq!(labels.to_vec(), vec![1.0, 0.0, 1.0]);

        let labels = label_vector(&[2, 1], vec![0.0, 1.0], 2).unwrap();
        assert_eq!(labels.to_vec(), vec![0.0, 1.0]);

        let result = label_vector(&[2], vec![0.0, 1.0], 3);
        assert!(matches!(result, Err(InferenceError::Inference(_))));

        // A probability matrix is not a label tensor.
        let result = label_vector(&[2, 2], vec![0.2, 0.8, 0.6, 0.4], 2);
        assert!(matches!(result, Err(InferenceError::Inference(_))));
    }

    #[test]
    fn test_numeric_values_dtypes() {
        let f32_value = Tensor::from_array(([2usize, 1], vec![0.5f32, -1.0])).unwrap();
        let (shape, values) = numeric_values(&f32_value.into_dyn()).unwrap();
        assert_eq!(shape, vec![2, 1]);
        assert_eq!(values, vec![0.5, -1.0]);

        let f64_value = Tensor::from_array(([2usize], vec![0.25f64, 3.0])).unwrap();
        let (shape, values) = numeric_values(&f64_value.into_dyn()).unwrap();
        assert_eq!(shape, vec![2]);
        assert_eq!(values, vec![0.25, 3.0]);

        let i64_value = Tensor::from_array(([3usize], vec![1i64, 0, 2])).unwrap();
        let (shape, values) = numeric_values(&i64_value.into_dyn()).unwrap();
        assert_eq!(shape, vec![3]);
        assert_eq!(values, vec![1.0, 0.0, 2.0]);

        let bool_value = Tensor::from_array(([1usize], vec![true])).unwrap();
        assert!(numeric_values(&bool_value.into_dyn()).is_none());
    }

    #[test]
    fn test_invalid_graph() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.onnx");
        std::fs::write(&path, b"not a protobuf").unwrap();
        let result = OnnxClassifier::load(&path, &InferenceConfig::default());
        assert!(matches!(result, Err(InferenceError::ArtifactLoad(_))));
    }
}
