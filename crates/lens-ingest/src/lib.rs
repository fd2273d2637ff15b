//! File parsing for uploaded tabular data.
//!
//! Turns CSV or JSON text into a [`Dataset`]: ordered column names plus rows
//! of typed cells. This is the only crate that touches the filesystem on the
//! input side; the transformation engine works on the parsed result.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use lens_ingest::read_dataset;
//!
//! let dataset = read_dataset(Path::new("org_chart.csv"))?;
//! println!("{} rows, {} columns", dataset.row_count(), dataset.columns.len());
//! ```

mod csv;
mod error;
mod format;
mod json;

// === Error Types ===
pub use error::{IngestError, Result};

// === Parsers ===
pub use csv::{CsvOptions, coerce_cell, parse_csv};
pub use json::parse_json;

// === Format Detection and File Loading ===
pub use format::{
    FileFormat, MAX_FILE_SIZE, parse_str, read_dataset, read_dataset_with_limit,
};

pub use lens_model::Dataset;
