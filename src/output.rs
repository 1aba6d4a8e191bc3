// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Rendering predictions as line-oriented booleans.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use crate::error::Result;

/// Textual convention for a boolean prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BoolStyle {
    /// `True` / `False`.
    #[default]
    Python,
    /// `true` / `false`.
    Lower,
    /// `1` / `0`.
    Numeric,
}

impl BoolStyle {
    /// Returns the token printed for `value`.
    #[must_use]
    pub const fn token(self, value: bool) -> &'static str {
        match (self, value) {
            (Self::Python, true) => "True",
            (Self::Python, false) => "False",
            (Self::Lower, true) => "true",
            (Self::Lower, false) => "false",
            (Self::Numeric, true) => "1",
            (Self::Numeric, false) => "0",
        }
    }

    /// Returns the name accepted on the command line.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::Lower => "lower",
            Self::Numeric => "numeric",
        }
    }
}

impl fmt::Display for BoolStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BoolStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "python" | "title" => Ok(Self::Python),
            "lower" | "lowercase" => Ok(Self::Lower),
            "numeric" | "int" | "01" => Ok(Self::Numeric),
            _ => Err(format!(
                "invalid bool style '{s}', expected one of: python, lower, numeric"
            )),
        }
    }
}

/// Coerce a predicted label to a boolean: nonzero is `true`.
///
/// `NaN` counts as `true`, the same as numpy's `astype(bool)`.
#[must_use]
pub fn label_to_bool(label: f64) -> bool {
    label != 0.0
}

/// Write one token per prediction, one per line, in order.
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn write_predictions<W: Write>(
    writer: &mut W,
    predictions: &[bool],
    style: BoolStyle,
) -> Result<()> {
    for &prediction in predictions {
        writeln!(writer, "{}", style.token(prediction))?;
    }
    writer.flush()?;
    Ok(())
}
