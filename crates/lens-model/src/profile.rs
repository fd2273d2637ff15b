//! Column profile types produced by the tabular profiler.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::issue::QualityIssue;

/// Inferred column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    String,
    Number,
    Boolean,
    Date,
    /// Not inferred; used for columns without a mapping.
    Mixed,
}

impl DataType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Mixed => "mixed",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptive statistics over the numeric cells of a column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Element at index `n / 2` of the sorted values.
    pub median: f64,
    /// Population standard deviation.
    pub std_dev: f64,
}

/// A distinct value and how often it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopValue {
    pub value: String,
    pub count: usize,
}

/// Profile of one dataset column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabularProfile {
    pub column: String,
    pub display_name: String,
    pub data_type: DataType,
    pub null_count: usize,
    /// Distinct non-null values.
    pub unique_count: usize,
    pub total_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_values: Option<Vec<TopValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric_stats: Option<NumericStats>,
    /// 0 to 100.
    pub quality_score: u8,
    pub quality_issues: Vec<QualityIssue>,
}

impl TabularProfile {
    pub fn non_null_count(&self) -> usize {
        self.total_count.saturating_sub(self.null_count)
    }
}
