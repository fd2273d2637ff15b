//! CSV reading utilities.

mod header;
mod reader;

pub use reader::{CsvOptions, coerce_cell, parse_csv};
