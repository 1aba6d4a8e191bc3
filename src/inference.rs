// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Inference configuration.
//!
//! This module defines the [`InferenceConfig`] struct, which controls how artifacts are
//! executed and how predictions are rendered.

use crate::output::BoolStyle;

/// Configuration for a batch prediction run.
///
/// It uses a builder pattern for convenient construction.
///
/// # Example
///
/// ```rust
/// use tabular_inference::{BoolStyle, InferenceConfig};
///
/// let config = InferenceConfig::new()
///     .with_bool_style(BoolStyle::Lower)
///     .with_threads(4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceConfig {
    /// Textual convention used for each printed prediction.
    pub bool_style: BoolStyle,
    /// Number of intra-op threads for ONNX Runtime.
    /// Setting this to `0` allows ONNX Runtime to choose the optimal number.
    pub num_threads: usize,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            bool_style: BoolStyle::Python,
            num_threads: 0, // 0 = let ONNX Runtime decide
        }
    }
}

impl InferenceConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the boolean output convention.
    ///
    /// # Arguments
    ///
    /// * `style` - How `true`/`false` predictions are written.
    #[must_use]
    pub const fn with_bool_style(mut self, style: BoolStyle) -> Self {
        self.bool_style = style;
        self
    }

    /// Set the number of threads for ONNX artifacts.
    ///
    /// # Arguments
    ///
    /// * `threads` - The number of intra-op threads. Set to `0` for auto-configuration.
    #[must_use]
    pub const fn with_threads(mut self, threads: usize) -> Self {
        self.num_threads = threads;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = InferenceConfig::default();
        assert_eq!(config.bool_style, BoolStyle::Python);
        assert_eq!(config.num_threads, 0);
    }

    #[test]
    fn test_config_builder() {
        let config = InferenceConfig::new()
            .with_bool_style(BoolStyle::Numeric)
            .with_threads(8);

        assert_eq!(config.bool_style, BoolStyle::Numeric);
        assert_eq!(config.num_threads, 8);
    }
}
