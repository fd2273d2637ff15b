use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
    Info,
}

impl IssueSeverity {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Warning => "Warning",
            Self::Info => "Info",
        }
    }
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a [`QualityIssue`] is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    // Column quality
    HighNulls,
    LowCardinality,
    Outliers,
    FormatInconsistency,

    // Hierarchy structure
    MissingNodeId,
    DuplicateNodeId,
    DanglingParent,
    CycleDetected,

    // Mapping checks
    MissingRequiredRole,
    DuplicateRole,
    UnknownRole,
    UnknownColumn,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HighNulls => "high_nulls",
            Self::LowCardinality => "low_cardinality",
            Self::Outliers => "outliers",
            Self::FormatInconsistency => "format_inconsistency",
            Self::MissingNodeId => "missing_node_id",
            Self::DuplicateNodeId => "duplicate_node_id",
            Self::DanglingParent => "dangling_parent",
            Self::CycleDetected => "cycle_detected",
            Self::MissingRequiredRole => "missing_required_role",
            Self::DuplicateRole => "duplicate_role",
            Self::UnknownRole => "unknown_role",
            Self::UnknownColumn => "unknown_column",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-fatal finding about the data or its mappings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityIssue {
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub severity: IssueSeverity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

impl QualityIssue {
    pub fn new(kind: IssueKind, severity: IssueSeverity, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity,
            message: message.into(),
            count: None,
        }
    }

    #[must_use]
    pub fn with_count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }
}
