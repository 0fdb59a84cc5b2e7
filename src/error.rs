//! Error types shared by the evaluator, the text importers and `PerceptronSpec` files.

use thiserror::Error;

/// A line of text that could not be turned into numbers.
///
/// `line` is 1-based; `content` is the trimmed line as it appeared in the
/// source so the caller can show the user exactly what was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("line {line}: {reason}: '{content}'")]
pub struct ParseError {
    pub line: usize,
    pub content: String,
    pub reason: String,
}

impl ParseError {
    pub fn new(line: usize, content: impl Into<String>, reason: impl Into<String>) -> Self {
        ParseError { line, content: content.into(), reason: reason.into() }
    }
}

#[derive(Debug, Error)]
pub enum PerceptronError {
    #[error("parse error on {0}")]
    Parse(#[from] ParseError),

    /// The activation name is not one of the registered set.
    #[error("unknown activation function '{name}'")]
    UnknownActivation { name: String },

    /// A vector in the batch does not match the weight dimensionality.
    /// The whole batch is rejected.
    #[error("dimension mismatch at vector {index}: expected {expected} components, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize, index: usize },

    /// The weighted sum of a vector overflowed or was NaN. The whole batch
    /// is rejected.
    #[error("non-finite weighted sum at vector {index}")]
    NonFiniteLinear { index: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PerceptronError>;
