//! Text import for input vector batches.
//!
//! Format:
//! - one vector per line, components comma-separated
//! - blank lines (and lines made only of commas) are skipped
//! - empty cells between commas are ignored
//! - a single non-numeric cell rejects the whole import

use tracing::debug;

use crate::error::{ParseError, Result};

/// Parses one comma-separated row, skipping empty cells.
///
/// `line_num` is only used to label the error.
pub fn parse_row(line: &str, line_num: usize) -> std::result::Result<Vec<f64>, ParseError> {
    let trimmed = line.trim();
    trimmed
        .split(',')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(|cell| parse_number(cell, trimmed, line_num))
        .collect()
}

/// Parses a finite `f64`; `nan` and `inf` are not accepted as input.
pub(crate) fn parse_number(cell: &str, line: &str, line_num: usize) -> std::result::Result<f64, ParseError> {
    match cell.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ParseError::new(line_num, line, format!("'{}' is not a valid number", cell))),
    }
}

/// Parses a whole batch.  Returns no vectors at all if any line is invalid.
pub fn parse_vectors(text: &str) -> std::result::Result<Vec<Vec<f64>>, ParseError> {
    let mut vectors = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let row = parse_row(line, idx + 1)?;
        if row.is_empty() {
            continue;
        }
        vectors.push(row);
    }
    Ok(vectors)
}

/// Reads and parses a vector batch file.
pub fn load_vectors(path: &str) -> Result<Vec<Vec<f64>>> {
    let text = std::fs::read_to_string(path)?;
    let vectors = parse_vectors(&text)?;
    debug!(path, count = vectors.len(), "loaded vector batch");
    Ok(vectors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_and_skips_blank_lines() {
        let text = "1.0, 2.0\n\n  \n-3,4.5e1\n,,\n0,0,\n";
        let vectors = parse_vectors(text).unwrap();
        assert_eq!(vectors, vec![vec![1.0, 2.0], vec![-3.0, 45.0], vec![0.0, 0.0]]);
    }

    #[test]
    fn one_bad_cell_rejects_the_import() {
        let text = "1,2\n3,four\n5,6\n";
        let err = parse_vectors(text).unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.content, "3,four");
        assert!(err.reason.contains("four"));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        assert!(parse_row("1, nan", 1).is_err());
        assert!(parse_row("inf", 1).is_err());
        assert!(parse_row("-infinity, 2", 1).is_err());
    }

    #[test]
    fn rows_of_different_length_are_kept_as_is() {
        // The evaluator, not the importer, owns the dimension check.
        let vectors = parse_vectors("1\n1,2\n").unwrap();
        assert_eq!(vectors.len(), 2);
        assert_eq!(vectors[1].len(), 2);
    }

    #[test]
    fn empty_text_is_an_empty_batch() {
        assert!(parse_vectors("").unwrap().is_empty());
    }
}
