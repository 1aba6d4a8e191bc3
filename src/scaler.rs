// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Fitted feature scalers.
//!
//! A [`Scaler`] maps a feature matrix to a matrix of the same shape. The native
//! scalers here mirror the fitted attributes of the common scikit-learn scalers,
//! so their parameters can be exported as JSON by the training side.

use ndarray::{Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::error::{InferenceError, Result};

/// A fitted transform applied to every sample before prediction.
pub trait Scaler {
    /// Short human-readable name, used in diagnostics.
    fn kind(&self) -> &'static str;

    /// Feature count fixed at fit time, if known.
    fn n_features(&self) -> Option<usize>;

    /// Transform `x` into a new matrix of identical shape.
    ///
    /// Row `i` of the output corresponds to row `i` of `x`.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::Dimension`] if the column count of `x` does not match
    /// the fitted feature count, or an inference error from the backing runtime.
    fn transform(&mut self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>>;
}

/// Fail with a dimension error unless `x` has exactly `expected` columns.
pub(crate) fn ensure_features(expected: usize, x: &ArrayView2<'_, f64>) -> Result<()> {
    let found = x.ncols();
    if found == expected {
        Ok(())
    } else {
        Err(InferenceError::Dimension { expected, found })
    }
}

/// Zero scales leave the feature unscaled instead of dividing by zero.
fn nonzero_scale(scale: &[f64]) -> Vec<f64> {
    scale
        .iter()
        .map(|&s| if s == 0.0 { 1.0 } else { s })
        .collect()
}

/// Passes features through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentityScaler {
    /// Optional feature count to enforce.
    #[serde(default)]
    pub n_features: Option<usize>,
}

impl Scaler for IdentityScaler {
    fn kind(&self) -> &'static str {
        "identity"
    }

    fn n_features(&self) -> Option<usize> {
        self.n_features
    }

    fn transform(&mut self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        if let Some(expected) = self.n_features {
            ensure_features(expected, &x)?;
        }
        Ok(x.to_owned())
    }
}

/// Z-score scaling: `(x - mean) / scale`.
///
/// Either part may be absent, matching `with_mean=False` or `with_std=False`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Per-feature mean.
    #[serde(default)]
    pub mean: Option<Vec<f64>>,
    /// Per-feature standard deviation.
    #[serde(default)]
    pub scale: Option<Vec<f64>>,
}

impl Scaler for StandardScaler {
    fn kind(&self) -> &'static str {
        "standard"
    }

    fn n_features(&self) -> Option<usize> {
        self.mean
            .as_ref()
            .or(self.scale.as_ref())
            .map(Vec::len)
    }

    fn transform(&mut self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        let mut out = x.to_owned();
        if let Some(mean) = &self.mean {
            ensure_features(mean.len(), &x)?;
            out -= &ArrayView1::from(mean.as_slice());
        }
        if let Some(scale) = &self.scale {
            ensure_features(scale.len(), &x)?;
            let scale = nonzero_scale(scale);
            out /= &ArrayView1::from(scale.as_slice());
        }
        Ok(out)
    }
}

/// Range scaling: `x * scale + min`.
///
/// `min` and `scale` are the fitted `min_` and `scale_` attributes, not the data range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    /// Per-feature additive offset.
    pub min: Vec<f64>,
    /// Per-feature multiplicative factor.
    pub scale: Vec<f64>,
}

impl Scaler for MinMaxScaler {
    fn kind(&self) -> &'static str {
        "min_max"
    }

    fn n_features(&self) -> Option<usize> {
        Some(self.scale.len())
    }

    fn transform(&mut self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        ensure_features(self.scale.len(), &x)?;
        ensure_features(self.min.len(), &x)?;
        let mut out = x.to_owned();
        out *= &ArrayView1::from(self.scale.as_slice());
        out += &ArrayView1::from(self.min.as_slice());
        Ok(out)
    }
}

/// Scaling by the per-feature maximum absolute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaxAbsScaler {
    /// Per-feature maximum absolute value.
    pub max_abs: Vec<f64>,
}

impl Scaler for MaxAbsScaler {
    fn kind(&self) -> &'static str {
        "max_abs"
    }

    fn n_features(&self) -> Option<usize> {
        Some(self.max_abs.len())
    }

    fn transform(&mut self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        ensure_features(self.max_abs.len(), &x)?;
        let max_abs = nonzero_scale(&self.max_abs);
        let mut out = x.to_owned();
        out /= &ArrayView1::from(max_abs.as_slice());
        Ok(out)
    }
}

/// Scaler stored in the native JSON artifact format, tagged by `"kind"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NativeScaler {
    /// See [`IdentityScaler`].
    Identity(IdentityScaler),
    /// See [`StandardScaler`].
    Standard(StandardScaler),
    /// See [`MinMaxScaler`].
    MinMax(MinMaxScaler),
    /// See [`MaxAbsScaler`].
    MaxAbs(MaxAbsScaler),
}

impl NativeScaler {
    fn inner(&mut self) -> &mut dyn Scaler {
        match self {
            Self::Identity(s) => s,
            Self::Standard(s) => s,
            Self::MinMax(s) => s,
            Self::MaxAbs(s) => s,
        }
    }
}

impl Scaler for NativeScaler {
    fn kind(&self) -> &'static str {
        match self {
            Self::Identity(s) => s.kind(),
            Self::Standard(s) => s.kind(),
            Self::MinMax(s) => s.kind(),
            Self::MaxAbs(s) => s.kind(),
        }
    }

    fn n_features(&self) -> Option<usize> {
        match self {
            Self::Identity(s) => s.n_features(),
            Self::Standard(s) => s.n_features(),
            Self::MinMax(s) => s.n_features(),
            Self::MaxAbs(s) => s.n_features(),
        }
    }

    fn transform(&mut self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        self.inner().transform(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_identity() {
        let x = array![[1.0, 2.0], [-1.0, 2.0]];
        let mut scaler = IdentityScaler::default();
        assert_eq!(scaler.transform(x.view()).unwrap(), x);
    }

    #[test]
    fn test_identity_checks_features_when_known() {
        let x = array![[1.0, 2.0]];
        let mut scaler = IdentityScaler {
            n_features: Some(3),
        };
        assert!(matches!(
            scaler.transform(x.view()),
            Err(InferenceError::Dimension {
                expected: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn test_standard() {
        let x = array![[1.0, 10.0], [3.0, 30.0]];
        let mut scaler = StandardScaler {
            mean: Some(vec![2.0, 20.0]),
            scale: Some(vec![1.0, 10.0]),
        };
        let out = scaler.transform(x.view()).unwrap();
        assert_eq!(out, array![[-1.0, -1.0], [1.0, 1.0]]);
        assert_eq!(scaler.n_features(), Some(2));
    }

    #[test]
    fn test_standard_zero_scale_and_no_mean() {
        let x = array![[4.0, 6.0]];
        let mut scaler = StandardScaler {
            mean: None,
            scale: Some(vec![2.0, 0.0]),
        };
        assert_eq!(scaler.transform(x.view()).unwrap(), array![[2.0, 6.0]]);
    }

    #[test]
    fn test_standard_dimension_mismatch() {
        let x = array![[1.0, 2.0, 3.0]];
        let mut scaler = StandardScaler {
            mean: Some(vec![0.0, 0.0]),
            scale: None,
        };
        assert!(matches!(
            scaler.transform(x.view()),
            Err(InferenceError::Dimension {
                expected: 2,
                found: 3
            })
        ));
    }

    #[test]
    fn test_min_max() {
        let x = array![[0.0, 5.0], [10.0, 15.0]];
        let mut scaler = MinMaxScaler {
            min: vec![0.0, -0.5],
            scale: vec![0.1, 0.1],
        };
        let out = scaler.transform(x.view()).unwrap();
        assert!((out[[1, 0]] - 1.0).abs() < 1e-12);
        assert!((out[[0, 1]] - 0.0).abs() < 1e-12);
        assert!((out[[1, 1]] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_max_abs() {
        let x = array![[-4.0, 1.0]];
        let mut scaler = MaxAbsScaler {
            max_abs: vec![4.0, 0.0],
        };
        assert_eq!(scaler.transform(x.view()).unwrap(), array![[-1.0, 1.0]]);
    }

    #[test]
    fn test_native_json_tags() {
        let scaler: NativeScaler =
            serde_json::from_str(r#"{"kind": "standard", "mean": [1.0], "scale": [2.0]}"#)
                .unwrap();
        assert_eq!(scaler.kind(), "standard");
        assert_eq!(scaler.n_features(), Some(1));

        let scaler: NativeScaler = serde_json::from_str(r#"{"kind": "identity"}"#).unwrap();
        assert_eq!(scaler, NativeScaler::Identity(IdentityScaler::default()));

        assert!(serde_json::from_str::<NativeScaler>(r#"{"kind": "robust"}"#).is_err());
    }

    #[test]
    fn test_shape_preserved() {
        let x = Array2::<f64>::zeros((5, 3));
        let mut scaler = NativeScaler::MinMax(MinMaxScaler {
            min: vec![1.0; 3],
            scale: vec![2.0; 3],
        });
        let out = scaler.transform(x.view()).unwrap();
        assert_eq!(out.shape(), &[5, 3]);
        assert!(out.iter().all(|&v| (v - 1.0).abs() < f64::EPSILON));
    }
}
