// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! CLI module for running batch prediction.
//!
//! This module contains the command-line interface logic, including argument parsing
//! and the prediction run itself.

// Modules
/// CLI arguments.
pub mod args;

/// Stderr diagnostics.
pub mod logging;

/// Prediction logic.
pub mod predict;
