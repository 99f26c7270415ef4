use std::path::PathBuf;

use thiserror::Error;

/// Converter error types.
///
/// Only hard failures live here: per-line anomalies in the input table
/// are represented as [`crate::classify::SkipReason`] and never abort
/// the run.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Failed to read input file '{}': {source}", path.display())]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to create output file '{}': {source}", path.display())]
    CreateOutput {
        path: PathBuf,
        source: csv::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_input_display_includes_path() {
        let err = ConvertError::ReadInput {
            path: PathBuf::from("/nonexistent/table.c.inc"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let display = format!("{}", err);
        assert!(display.contains("/nonexistent/table.c.inc"), "got: {}", display);
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err: ConvertError = io.into();
        assert!(matches!(err, ConvertError::Io(_)));
    }
}
