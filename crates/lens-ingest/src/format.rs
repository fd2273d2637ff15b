//! Input format detection and file loading.

use std::path::Path;

use tracing::{debug, info_span};

use lens_model::Dataset;

use crate::csv::{CsvOptions, parse_csv};
use crate::error::{IngestError, Result};
use crate::json::parse_json;

/// Maximum input file size (200 MB default). Datasets are held in memory.
pub const MAX_FILE_SIZE: u64 = 200 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Tsv,
    Json,
}

impl FileFormat {
    /// Pick a format from the file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "csv" | "txt" => Some(Self::Csv),
            "tsv" | "tab" => Some(Self::Tsv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Guess a format from content: JSON starts with `[` or `{`.
    pub fn sniff(text: &str) -> Option<Self> {
        let first = text.trim_start_matches('\u{feff}').trim_start().chars().next()?;
        if first == '[' || first == '{' {
            Some(Self::Json)
        } else {
            Some(Self::Csv)
        }
    }
}

/// Parse in-memory text in the given format.
pub fn parse_str(text: &str, format: FileFormat) -> Result<Dataset> {
    match format {
        FileFormat::Csv => parse_csv(text, &CsvOptions::default()),
        FileFormat::Tsv => parse_csv(text, &CsvOptions::tsv()),
        FileFormat::Json => parse_json(text.trim_start_matches('\u{feff}')),
    }
}

/// Read and parse a file, choosing the parser by extension then content.
pub fn read_dataset(path: &Path) -> Result<Dataset> {
    read_dataset_with_limit(path, MAX_FILE_SIZE)
}

/// [`read_dataset`] with a custom size limit.
pub fn read_dataset_with_limit(path: &Path, max_size: u64) -> Result<Dataset> {
    let span = info_span!("read_dataset", path = %path.display());
    let _guard = span.enter();

    let metadata = std::fs::metadata(path).map_err(|e| io_error(path, e))?;
    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }
    let text = std::fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    let format = FileFormat::from_path(path)
        .or_else(|| FileFormat::sniff(&text))
        .ok_or_else(|| IngestError::UnsupportedFormat {
            reason: format!("{} is empty and has no known extension", path.display()),
        })?;
    debug!(?format, bytes = text.len(), "detected input format");
    parse_str(&text, format)
}

fn io_error(path: &Path, err: std::io::Error) -> IngestError {
    if err.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_wins_over_content() {
        assert_eq!(
            FileFormat::from_path(Path::new("data.JSON")),
            Some(FileFormat::Json)
        );
        assert_eq!(
            FileFormat::from_path(Path::new("data.tsv")),
            Some(FileFormat::Tsv)
        );
        assert_eq!(FileFormat::from_path(Path::new("data")), None);
    }

    #[test]
    fn sniffing_detects_json() {
        assert_eq!(FileFormat::sniff("  [{}]"), Some(FileFormat::Json));
        assert_eq!(FileFormat::sniff("a,b\n1,2"), Some(FileFormat::Csv));
        assert_eq!(FileFormat::sniff("   "), None);
    }
}
