//! Error types for file ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while turning a file into a dataset.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the configured size limit.
    #[error("file {path} is {size} bytes, limit is {max_size}")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// Could not tell which parser to use.
    #[error("unsupported input format: {reason}")]
    UnsupportedFormat { reason: String },

    // === Parsing Errors ===
    /// The CSV reader rejected a record.
    #[error("failed to parse CSV at record {record}: {message}")]
    CsvParse { record: u64, message: String },

    /// Input is not valid JSON.
    #[error("failed to parse JSON: {message}")]
    JsonParse { message: String },

    /// Valid JSON, but not an object or an array of objects.
    #[error("unexpected JSON shape: {reason}")]
    JsonShape { reason: String },

    /// Nothing to read (no header row, or blank input).
    #[error("input is empty")]
    EmptyInput,
}

impl From<serde_json::Error> for IngestError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonParse {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/data.csv"),
        };
        assert_eq!(err.to_string(), "file not found: /path/to/data.csv");
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let ingest_err: IngestError = json_err.into();
        assert!(matches!(ingest_err, IngestError::JsonParse { .. }));
    }
}
