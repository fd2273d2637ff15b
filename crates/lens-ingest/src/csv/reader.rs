//! CSV parsing with a single header row and typed cells.

use ::csv::ReaderBuilder;
use tracing::debug;

use lens_model::{Dataset, Row, Value};

use super::header::build_columns;
use crate::error::{IngestError, Result};

/// CSV reader settings.
#[derive(Debug, Clone, Copy)]
pub struct CsvOptions {
    /// Field delimiter (default `,`).
    pub delimiter: u8,
    /// Trim whitespace around cells before typing them (default on).
    pub trim: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: true,
        }
    }
}

impl CsvOptions {
    /// Tab-separated input.
    #[must_use]
    pub fn tsv() -> Self {
        Self {
            delimiter: b'\t',
            ..Self::default()
        }
    }
}

/// Type a raw CSV cell.
///
/// Empty cells become null, `true`/`false` become booleans, finite numbers
/// become numbers, and everything else stays text.
pub fn coerce_cell(raw: &str, trim: bool) -> Value {
    let cell = if trim { raw.trim() } else { raw };
    if cell.trim().is_empty() {
        return Value::Null;
    }
    if cell.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if cell.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if let Ok(number) = cell.trim().parse::<f64>()
        && number.is_finite()
    {
        return Value::Number(number);
    }
    Value::Text(cell.to_string())
}

/// Parse CSV text whose first row holds the column names.
///
/// Short records are padded with nulls; extra trailing fields are dropped.
/// Records with no non-blank cell are skipped.
pub fn parse_csv(text: &str, options: &CsvOptions) -> Result<Dataset> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(options.delimiter)
        .from_reader(text.as_bytes());

    let headers = reader.headers().map_err(|err| csv_error(&err, 0))?.clone();
    if headers.iter().all(|header| header.trim().is_empty()) {
        return Err(IngestError::EmptyInput);
    }
    let columns = build_columns(headers.iter());

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|err| csv_error(&err, idx as u64 + 1))?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            skipped += 1;
            continue;
        }
        let mut row = Row::new();
        for (col_idx, column) in columns.iter().enumerate() {
            let value = record
                .get(col_idx)
                .map_or(Value::Null, |cell| coerce_cell(cell, options.trim));
            row.insert(column.clone(), value);
        }
        rows.push(row);
    }
    debug!(
        columns = columns.len(),
        rows = rows.len(),
        skipped,
        "parsed CSV"
    );
    Ok(Dataset::new(columns, rows))
}

fn csv_error(err: &::csv::Error, fallback_record: u64) -> IngestError {
    let record = err
        .position()
        .map_or(fallback_record, |position| position.record());
    IngestError::CsvParse {
        record,
        message: err.to_string(),
    }
}
