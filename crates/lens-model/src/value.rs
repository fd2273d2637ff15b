//! Cell values, rows, and datasets.
//!
//! A [`Dataset`] is the parsed form of an uploaded file: an ordered list of
//! column names and the rows beneath them. Cells are loosely typed scalars,
//! the same way they arrive from CSV or JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

static NULL: Value = Value::Null;

/// A single scalar cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Value {
    /// True for explicit nulls and for text that is empty after trimming.
    pub fn is_null(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(text) => text.trim().is_empty(),
            Self::Bool(_) | Self::Number(_) => false,
        }
    }

    /// Stringified form used for ids, grouping and frequency counting.
    ///
    /// Nulls stringify to the empty string.
    pub fn to_key(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(flag) => flag.to_string(),
            Self::Number(number) => number.to_string(),
            Self::Text(text) => text.clone(),
        }
    }

    /// Strict numeric reading: numbers and numeric text only.
    pub fn as_f64(&self) -> Option<f64> {
        let number = match self {
            Self::Number(number) => *number,
            Self::Text(text) => text.trim().parse::<f64>().ok()?,
            Self::Null | Self::Bool(_) => return None,
        };
        number.is_finite().then_some(number)
    }

    /// Lenient numeric reading. Anything that is not a number becomes `0`,
    /// booleans count as `1`/`0`.
    pub fn coerce_f64(&self) -> f64 {
        match self {
            Self::Bool(true) => 1.0,
            Self::Bool(false) => 0.0,
            other => other.as_f64().unwrap_or(0.0),
        }
    }

    /// Boolean reading of `true`/`false` values and their text forms.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            Self::Text(text) => {
                let trimmed = text.trim();
                if trimmed.eq_ignore_ascii_case("true") {
                    Some(true)
                } else if trimmed.eq_ignore_ascii_case("false") {
                    Some(false)
                } else {
                    None
                }
            }
            Self::Null | Self::Number(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// One record: column name to cell value. Absent columns read as null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    pub cells: BTreeMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cell for `column`, or [`Value::Null`] when absent.
    pub fn get(&self, column: &str) -> &Value {
        self.cells.get(column).unwrap_or(&NULL)
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.cells.insert(column.into(), value.into());
    }

    /// Builder-style insert, handy for assembling rows in code and tests.
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(column, value);
        self
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(column, value)| (column.into(), value.into()))
                .collect(),
        }
    }
}

/// Parsed tabular input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Column names in file order.
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|name| name == column)
    }

    /// All cells of one column, one per row.
    pub fn column_values<'a>(&'a self, column: &str) -> Vec<&'a Value> {
        self.rows.iter().map(|row| row.get(column)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_detection_covers_blank_text() {
        assert!(Value::Null.is_null());
        assert!(Value::from("   ").is_null());
        assert!(!Value::from("x").is_null());
        assert!(!Value::Number(0.0).is_null());
        assert!(!Value::Bool(false).is_null());
    }

    #[test]
    fn keys_stringify_scalars() {
        assert_eq!(Value::Number(3.0).to_key(), "3");
        assert_eq!(Value::Number(2.5).to_key(), "2.5");
        assert_eq!(Value::Bool(true).to_key(), "true");
        assert_eq!(Value::Null.to_key(), "");
    }

    #[test]
    fn numeric_coercion_defaults_to_zero() {
        assert_eq!(Value::from(" 12 ").coerce_f64(), 12.0);
        assert_eq!(Value::from("abc").coerce_f64(), 0.0);
        assert_eq!(Value::Null.coerce_f64(), 0.0);
        assert_eq!(Value::Bool(true).coerce_f64(), 1.0);
        assert_eq!(Value::from("NaN").as_f64(), None);
    }

    #[test]
    fn missing_cells_read_as_null() {
        let row = Row::new().with("a", 1.0);
        assert_eq!(row.get("a"), &Value::Number(1.0));
        assert_eq!(row.get("b"), &Value::Null);
    }

    #[test]
    fn untagged_values_deserialize_from_json() {
        let row: Row =
            serde_json::from_str(r#"{"a":1,"b":"x","c":null,"d":true}"#).expect("parse row");
        assert_eq!(row.get("a"), &Value::Number(1.0));
        assert_eq!(row.get("b"), &Value::from("x"));
        assert_eq!(row.get("c"), &Value::Null);
        assert_eq!(row.get("d"), &Value::Bool(true));
    }
}
