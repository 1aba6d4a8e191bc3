// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Feature matrix parsing.
//!
//! Input is plain text: one sample per line, features separated by whitespace.
//! Anything after a `#` is a comment, and blank lines are skipped. The result is
//! always a 2-D [`Array2`], so a single sample becomes a `1 x n` matrix.

use std::io::BufRead;

use ndarray::Array2;

use crate::error::{InferenceError, Result};

/// Comment marker, as understood by common numeric text loaders.
const COMMENT: char = '#';

/// Read a feature matrix from a buffered reader until EOF.
///
/// # Errors
///
/// Returns an error if reading fails, a token is not a number, rows have
/// different lengths, or there are no rows at all.
pub fn read_matrix<R: BufRead>(reader: R) -> Result<Array2<f64>> {
    let mut values = Vec::new();
    let mut n_cols: Option<usize> = None;
    let mut n_rows = 0;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let Some(row) = parse_row(&line, line_no)? else {
            continue;
        };

        match n_cols {
            None => n_cols = Some(row.len()),
            Some(expected) if expected != row.len() => {
                return Err(InferenceError::RaggedRow {
                    line: line_no,
                    expected,
                    found: row.len(),
                });
            }
            Some(_) => {}
        }

        values.extend(row);
        n_rows += 1;
    }

    let n_cols = n_cols.ok_or(InferenceError::EmptyInput)?;
    Array2::from_shape_vec((n_rows, n_cols), values)
        .map_err(|e| InferenceError::Inference(format!("Failed to build matrix: {e}")))
}

/// Parse a feature matrix from a string.
///
/// # Errors
///
/// See [`read_matrix`].
pub fn parse_matrix(text: &str) -> Result<Array2<f64>> {
    read_matrix(text.as_bytes())
}

/// Parse one line; `None` for blank or comment-only lines.
fn parse_row(line: &str, line_no: usize) -> Result<Option<Vec<f64>>> {
    let content = line.split_once(COMMENT).map_or(line, |(data, _)| data);
    let mut tokens = content.split_whitespace().peekable();
    if tokens.peek().is_none() {
        return Ok(None);
    }

    tokens
        .map(|token| {
            token.parse::<f64>().map_err(|_| InferenceError::InputParse {
                line: line_no,
                token: token.to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()
        .map(Some)
}
