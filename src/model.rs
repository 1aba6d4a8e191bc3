// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Scaler + classifier pipeline.
//!
//! This module provides the main [`Predictor`] struct, which owns a fitted
//! scaler and a trained classifier and runs them over a feature matrix.

use std::path::Path;

use ndarray::{Array1, ArrayView2};

use crate::artifact::{load_classifier, load_scaler};
use crate::classifier::Classifier;
use crate::error::{InferenceError, Result};
use crate::inference::InferenceConfig;
use crate::output::label_to_bool;
use crate::scaler::Scaler;

/// A fitted scaler followed by a trained classifier.
///
/// # Example
///
/// ```no_run
/// use tabular_inference::{Predictor, parse_matrix};
///
/// let mut predictor = Predictor::load("scaler.json", "model.json")?;
/// let x = parse_matrix("1 2\n-1 2\n")?;
/// let predictions = predictor.predict(x.view())?;
/// assert_eq!(predictions.len(), 2);
/// # Ok::<(), tabular_inference::InferenceError>(())
/// ```
pub struct Predictor {
    scaler: Box<dyn Scaler>,
    classifier: Box<dyn Classifier>,
    config: InferenceConfig,
}

impl Predictor {
    /// Build a predictor from already loaded parts.
    #[must_use]
    pub fn new(
        scaler: Box<dyn Scaler>,
        classifier: Box<dyn Classifier>,
        config: InferenceConfig,
    ) -> Self {
        Self {
            scaler,
            classifier,
            config,
        }
    }

    /// Load a scaler and a classifier from artifact files.
    ///
    /// # Arguments
    ///
    /// * `scaler_path` - Path to the scaler artifact.
    /// * `model_path` - Path to the classifier artifact.
    ///
    /// # Errors
    ///
    /// Returns an error if either artifact is missing or can't be loaded.
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(scaler_path: P, model_path: Q) -> Result<Self> {
        Self::load_with_config(scaler_path, model_path, InferenceConfig::default())
    }

    /// Load a scaler and a classifier with custom configuration.
    ///
    /// The scaler is loaded first, so a bad scaler path is reported even when the
    /// model path is also wrong.
    ///
    /// # Errors
    ///
    /// Returns an error if either artifact is missing or can't be loaded.
    pub fn load_with_config<P: AsRef<Path>, Q: AsRef<Path>>(
        scaler_path: P,
        model_path: Q,
        config: InferenceConfig,
    ) -> Result<Self> {
        let scaler = load_scaler(scaler_path, &config)?;
        let classifier = load_classifier(model_path, &config)?;
        Ok(Self::new(scaler, classifier, config))
    }

    /// Scale `x` and return the raw label of every row, in row order.
    ///
    /// # Errors
    ///
    /// Returns an error if the scaler or classifier fails, or if the classifier
    /// does not return exactly one label per row.
    pub fn predict_labels(&mut self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>> {
        let scaled = self.scaler.transform(x)?;
        if scaled.nrows() != x.nrows() {
            return Err(InferenceError::Inference(format!(
                "Scaler returned {} rows for {} input rows",
                scaled.nrows(),
                x.nrows()
            )));
        }

        let labels = self.classifier.predict(scaled.view())?;
        if labels.len() != x.nrows() {
            return Err(InferenceError::Inference(format!(
                "Model returned {} labels for {} input rows",
                labels.len(),
                x.nrows()
            )));
        }
        Ok(labels)
    }

    /// Scale `x`, classify it, and coerce every label to a boolean.
    ///
    /// # Errors
    ///
    /// See [`Predictor::predict_labels`].
    pub fn predict(&mut self, x: ArrayView2<'_, f64>) -> Result<Vec<bool>> {
        Ok(self
            .predict_labels(x)?
            .iter()
            .map(|&label| label_to_bool(label))
            .collect())
    }

    /// Get the scaler.
    #[must_use]
    pub fn scaler(&self) -> &dyn Scaler {
        self.scaler.as_ref()
    }

    /// Get the classifier.
    #[must_use]
    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &InferenceConfig {
        &self.config
    }
}

impl std::fmt::Debug for Predictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Predictor")
            .field("scaler", &self.scaler.kind())
            .field("classifier", &self.classifier.kind())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{LinearClassifier, StumpClassifier};
    use crate::scaler::{IdentityScaler, StandardScaler};
    use ndarray::{Array2, array};

    fn identity_first_column() -> Predictor {
        Predictor::new(
            Box::new(IdentityScaler::default()),
            Box::new(LinearClassifier {
                coef: vec![1.0, 0.0],
                intercept: 0.0,
                classes: [0.0, 1.0],
            }),
            InferenceConfig::default(),
        )
    }

    /// Returns one label too few.
    struct Truncating;

    impl Classifier for Truncating {
        fn kind(&self) -> &'static str {
            "truncating"
        }

        fn n_features(&self) -> Option<usize> {
            None
        }

        fn predict(&mut self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>> {
            Ok(Array1::zeros(x.nrows().saturating_sub(1)))
        }
    }

    #[test]
    fn test_model_not_found() {
        let result = Predictor::load("nonexistent_scaler.json", "nonexistent_model.json");
        assert!(matches!(result, Err(InferenceError::ArtifactLoad(_))));
    }

    #[test]
    fn test_identity_first_column() {
        let mut predictor = identity_first_column();
        let x = array![[1.0, 2.0], [-1.0, 2.0]];
        assert_eq!(predictor.predict(x.view()).unwrap(), vec![true, false]);
    }

    #[test]
    fn test_single_row() {
        let mut predictor = identity_first_column();
        let x = array![[3.0, -7.0]];
        assert_eq!(predictor.predict(x.view()).unwrap(), vec![true]);
    }

    #[test]
    fn test_scaling_happens_before_prediction() {
        let mut predictor = Predictor::new(
            Box::new(StandardScaler {
                mean: Some(vec![10.0]),
                scale: None,
            }),
            Box::new(StumpClassifier {
                feature: 0,
                threshold: 0.0,
                classes: [0.0, 1.0],
            }),
            InferenceConfig::default(),
        );
        let x = array![[5.0], [15.0]];
        assert_eq!(predictor.predict(x.view()).unwrap(), vec![false, true]);
    }

    #[test]
    fn test_row_permutation() {
        let mut predictor = identity_first_column();
        let x = array![[1.0, 0.0], [-2.0, 0.0], [3.0, 0.0]];
        let permuted = array![[3.0, 0.0], [1.0, 0.0], [-2.0, 0.0]];
        let y = predictor.predict(x.view()).unwrap();
        let y_permuted = predictor.predict(permuted.view()).unwrap();
        assert_eq!(y_permuted, vec![y[2], y[0], y[1]]);
    }

    #[test]
    fn test_repeated_runs_identical() {
        let mut predictor = identity_first_column();
        let x = Array2::from_shape_fn((20, 2), |(i, j)| (i as f64 - 10.0) * (j as f64 + 1.0));
        let first = predictor.predict(x.view()).unwrap();
        let second = predictor.predict(x.view()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 20);
    }

    #[test]
    fn test_label_count_checked() {
        let mut predictor = Predictor::new(
            Box::new(IdentityScaler::default()),
            Box::new(Truncating),
            InferenceConfig::default(),
        );
        let x = array![[1.0], [2.0]];
        assert!(matches!(
            predictor.predict(x.view()),
            Err(InferenceError::Inference(_))
        ));
    }

    #[test]
    fn test_dimension_error_propagates() {
        let mut predictor = identity_first_column();
        let x = array![[1.0, 2.0, 3.0]];
        assert!(matches!(
            predictor.predict(x.view()),
            Err(InferenceError::Dimension { .. })
        ));
    }
}
