//! Plain-text sample input for the command line.
//!
//! One sample per line, values separated by commas and/or whitespace.
//! Blank lines and lines starting with `#` are skipped.

use std::io::BufRead;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: `{token}` is not a number")]
    BadNumber { line: usize, token: String },
}

pub fn parse_line(line: &str, line_no: usize) -> Result<Option<Vec<f64>>, InputError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    trimmed
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|tok| !tok.is_empty())
        .map(|tok| {
            tok.parse::<f64>().map_err(|_| InputError::BadNumber {
                line: line_no,
                token: tok.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

/// Read every sample from `reader`. Line numbers in errors are 1-based.
pub fn read_rows<R: BufRead>(reader: R) -> Result<Vec<Vec<f64>>, InputError> {
    let mut rows = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        if let Some(row) = parse_line(&line?, i + 1)? {
            rows.push(row);
        }
    }
    Ok(rows)
}

/// Format one prediction row the way `read_rows` would accept it back.
pub fn format_row(row: &[f64]) -> String {
    row.iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
