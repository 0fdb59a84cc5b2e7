//! Configuration line import.
//!
//! Only the first line of the source is read.  Its cells are comma-separated
//! reals: the first is the bias, the rest are the weights in order.  Unlike the
//! vector format every cell must be present, so `1,,2` is rejected.

use tracing::debug;

use crate::error::{ParseError, Result};
use crate::io::vectors::parse_number;

/// Bias and weights read from a configuration line.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigLine {
    pub bias: f64,
    pub weights: Vec<f64>,
}

pub fn parse_config(text: &str) -> std::result::Result<ConfigLine, ParseError> {
    let line = text.lines().next().unwrap_or("").trim();
    if line.is_empty() {
        return Err(ParseError::new(1, line, "configuration is empty"));
    }

    let mut values = line
        .split(',')
        .map(|cell| parse_number(cell.trim(), line, 1))
        .collect::<std::result::Result<Vec<f64>, ParseError>>()?;

    let bias = values.remove(0);
    Ok(ConfigLine { bias, weights: values })
}

/// Reads and parses a configuration file such as `config.txt`.
pub fn load_config(path: &str) -> Result<ConfigLine> {
    let text = std::fs::read_to_string(path)?;
    let config = parse_config(&text)?;
    debug!(path, bias = config.bias, weights = config.weights.len(), "loaded configuration");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PerceptronError;

    #[test]
    fn first_value_is_bias() {
        let cfg = parse_config("-1.5, 1.0, 1.0\nignored,line\n").unwrap();
        assert_eq!(cfg.bias, -1.5);
        assert_eq!(cfg.weights, vec![1.0, 1.0]);
    }

    #[test]
    fn bias_only_gives_empty_weights() {
        let cfg = parse_config("0.25").unwrap();
        assert_eq!(cfg, ConfigLine { bias: 0.25, weights: vec![] });
    }

    #[test]
    fn empty_source_is_an_error() {
        let err = parse_config("").unwrap_err();
        assert_eq!(err.reason, "configuration is empty");
        assert!(parse_config("   \n1,2").is_err());
    }

    #[test]
    fn bad_or_missing_cells_are_errors() {
        let err = parse_config("0.5,abc,1").unwrap_err();
        assert_eq!(err.line, 1);
        assert_eq!(err.content, "0.5,abc,1");
        assert!(parse_config("1,,2").is_err());
        assert!(parse_config("1,2,").is_err());
    }

    #[test]
    fn missing_file_is_io_error() {
        let path = std::env::temp_dir().join("perceptron-config-does-not-exist.txt");
        let err = load_config(&path.to_string_lossy()).unwrap_err();
        assert!(matches!(err, PerceptronError::Io(_)));
    }
}
