//! JSON input: an array of objects, or a single object.

use serde_json::Value as JsonValue;
use tracing::debug;

use lens_model::{Dataset, Row, Value};

use crate::error::{IngestError, Result};

/// Parse JSON text into a dataset.
///
/// Columns are the union of object keys in first-seen order. Nested arrays
/// and objects are kept as their JSON text.
pub fn parse_json(text: &str) -> Result<Dataset> {
    if text.trim().is_empty() {
        return Err(IngestError::EmptyInput);
    }
    let parsed: JsonValue = serde_json::from_str(text)?;
    let records = match parsed {
        JsonValue::Array(items) => items,
        object @ JsonValue::Object(_) => vec![object],
        other => {
            return Err(IngestError::JsonShape {
                reason: format!("expected an object or array, found {}", kind_name(&other)),
            });
        }
    };

    let mut columns: Vec<String> = Vec::new();
    let mut rows = Vec::with_capacity(records.len());
    for (idx, record) in records.into_iter().enumerate() {
        let fields = match record {
            JsonValue::Object(fields) => fields,
            other => {
                return Err(IngestError::JsonShape {
                    reason: format!(
                        "array element {idx} is {}, expected an object",
                        kind_name(&other)
                    ),
                });
            }
        };
        let mut row = Row::new();
        for (key, value) in fields {
            if !columns.contains(&key) {
                columns.push(key.clone());
            }
            row.insert(key, to_cell(value));
        }
        rows.push(row);
    }
    debug!(columns = columns.len(), rows = rows.len(), "parsed JSON");
    Ok(Dataset::new(columns, rows))
}

fn to_cell(value: JsonValue) -> Value {
    match value {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(flag) => Value::Bool(flag),
        JsonValue::Number(number) => number.as_f64().map_or(Value::Null, Value::Number),
        JsonValue::String(text) => Value::Text(text),
        nested @ (JsonValue::Array(_) | JsonValue::Object(_)) => Value::Text(nested.to_string()),
    }
}

fn kind_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
