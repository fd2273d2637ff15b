//! Column-to-role mappings.
//!
//! A mapping binds one raw dataset column to one semantic role of the chosen
//! schema. Mappings are supplied by the caller and are not checked against
//! the dataset here; see `lens_transform::validate_mappings` for that.

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Optional cell rewrite applied whenever a builder reads a mapped column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueTransform {
    /// Strip surrounding whitespace from text.
    Trim,
    /// Uppercase text.
    Uppercase,
    /// Lowercase text.
    Lowercase,
    /// Read the cell as a number; unparseable cells become null.
    Number,
}

impl ValueTransform {
    /// Parse a transform name (case-insensitive).
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "trim" => Some(Self::Trim),
            "uppercase" | "upper" => Some(Self::Uppercase),
            "lowercase" | "lower" => Some(Self::Lowercase),
            "number" | "numeric" => Some(Self::Number),
            _ => None,
        }
    }

    pub fn apply(self, value: &Value) -> Value {
        match (self, value) {
            (Self::Trim, Value::Text(text)) => Value::Text(text.trim().to_string()),
            (Self::Uppercase, Value::Text(text)) => Value::Text(text.to_uppercase()),
            (Self::Lowercase, Value::Text(text)) => Value::Text(text.to_lowercase()),
            (Self::Number, other) => other.as_f64().map_or(Value::Null, Value::Number),
            (_, other) => other.clone(),
        }
    }
}

/// Binds one source column to one semantic role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMapping {
    /// Column name in the dataset.
    pub source_column: String,
    /// Role identifier as declared by the schema (e.g. `node_id`).
    pub role_id: String,
    /// Human-facing name; also used as the metric name for `metric` roles.
    /// May be left out, in which case [`ColumnMapping::label`] falls back to
    /// the column.
    #[serde(default)]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<ValueTransform>,
}

impl ColumnMapping {
    /// Mapping whose display name is the source column itself.
    pub fn new(source_column: impl Into<String>, role_id: impl Into<String>) -> Self {
        let source_column = source_column.into();
        Self {
            display_name: source_column.clone(),
            source_column,
            role_id: role_id.into(),
            transform: None,
        }
    }

    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    #[must_use]
    pub fn with_transform(mut self, transform: ValueTransform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Display name, falling back to the source column when blank.
    pub fn label(&self) -> &str {
        if self.display_name.trim().is_empty() {
            &self.source_column
        } else {
            &self.display_name
        }
    }
}
