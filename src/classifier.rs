// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Fitted classifiers.
//!
//! A [`Classifier`] emits one numeric label per row of a (scaled) feature matrix.
//! Labels are later coerced to booleans, so binary models should use `0`/`1`.

use ndarray::{Array1, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::error::{InferenceError, Result};
use crate::scaler::ensure_features;

/// A trained model producing one label per sample.
pub trait Classifier {
    /// Short human-readable name, used in diagnostics.
    fn kind(&self) -> &'static str;

    /// Feature count fixed at training time, if known.
    fn n_features(&self) -> Option<usize>;

    /// Predict a label for every row of `x`, in row order.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::Dimension`] if `x` has the wrong number of columns,
    /// or an inference error from the backing runtime.
    fn predict(&mut self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>>;
}

fn default_classes() -> [f64; 2] {
    [0.0, 1.0]
}

/// Linear decision function `x . coef + intercept`.
///
/// A positive decision selects `classes[1]`, anything else `classes[0]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearClassifier {
    /// Per-feature weights.
    pub coef: Vec<f64>,
    /// Bias term.
    #[serde(default)]
    pub intercept: f64,
    /// Negative and positive class labels.
    #[serde(default = "default_classes")]
    pub classes: [f64; 2],
}

impl LinearClassifier {
    /// Raw decision values, one per row.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::Dimension`] if `x` has the wrong number of columns.
    pub fn decision_function(&self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>> {
        ensure_features(self.coef.len(), &x)?;
        Ok(x.dot(&ArrayView1::from(self.coef.as_slice())) + self.intercept)
    }
}

impl Classifier for LinearClassifier {
    fn kind(&self) -> &'static str {
        "linear"
    }

    fn n_features(&self) -> Option<usize> {
        Some(self.coef.len())
    }

    fn predict(&mut self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>> {
        let [negative, positive] = self.classes;
        Ok(self
            .decision_function(x)?
            .mapv(|d| if d > 0.0 { positive } else { negative }))
    }
}

/// Single-feature threshold: `classes[1]` when `x[feature] > threshold`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StumpClassifier {
    /// Column index tested.
    pub feature: usize,
    /// Split point.
    #[serde(default)]
    pub threshold: f64,
    /// Negative and positive class labels.
    #[serde(default = "default_classes")]
    pub classes: [f64; 2],
}

impl Classifier for StumpClassifier {
    fn kind(&self) -> &'static str {
        "stump"
    }

    fn n_features(&self) -> Option<usize> {
        None
    }

    fn predict(&mut self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>> {
        if self.feature >= x.ncols() {
            return Err(InferenceError::Dimension {
                expected: self.feature + 1,
                found: x.ncols(),
            });
        }
        let [negative, positive] = self.classes;
        Ok(x
            .column(self.feature)
            .mapv(|v| if v > self.threshold { positive } else { negative }))
    }
}

/// Classifier stored in the native JSON artifact format, tagged by `"kind"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NativeClassifier {
    /// See [`LinearClassifier`].
    Linear(LinearClassifier),
    /// See [`StumpClassifier`].
    Stump(StumpClassifier),
}

impl Classifier for NativeClassifier {
    fn kind(&self) -> &'static str {
        match self {
            Self::Linear(m) => m.kind(),
            Self::Stump(m) => m.kind(),
        }
    }

    fn n_features(&self) -> Option<usize> {
        match self {
            Self::Linear(m) => m.n_features(),
            Self::Stump(m) => m.n_features(),
        }
    }

    fn predict(&mut self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>> {
        match self {
            Self::Linear(m) => m.predict(x),
            Self::Stump(m) => m.predict(x),
        }
    }
}
