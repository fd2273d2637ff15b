//! Mapping checks against a schema and a dataset's columns.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use lens_model::{ColumnMapping, IssueKind, IssueSeverity, QualityIssue, SemanticSchema};

/// Findings for one set of mappings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingReport {
    pub schema_id: String,
    pub issues: Vec<QualityIssue>,
}

impl MappingReport {
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Warning)
            .count()
    }

    /// Errors mean the transformation would be rejected or ambiguous.
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}

/// Check `mappings` against `schema` and the dataset `columns`.
///
/// Reports, in this order: per-mapping problems (unknown role, unknown
/// column), roles mapped more often than allowed, and unmapped required
/// roles.
pub fn validate_mappings(
    schema: &SemanticSchema,
    mappings: &[ColumnMapping],
    columns: &[String],
) -> MappingReport {
    let mut issues = Vec::new();
    let mut role_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for mapping in mappings {
        let role_id = mapping.role_id.trim();
        if schema.role(role_id).is_none() {
            issues.push(QualityIssue::new(
                IssueKind::UnknownRole,
                IssueSeverity::Warning,
                format!(
                    "column '{}' is mapped to role '{role_id}', which schema '{}' does not declare",
                    mapping.source_column, schema.id
                ),
            ));
        } else {
            *role_counts.entry(role_id).or_insert(0) += 1;
        }
        if !columns.contains(&mapping.source_column) {
            issues.push(QualityIssue::new(
                IssueKind::UnknownColumn,
                IssueSeverity::Warning,
                format!("column '{}' is not in the dataset", mapping.source_column),
            ));
        }
    }
    for role in &schema.roles {
        let count = role_counts.get(role.id.as_str()).copied().unwrap_or(0);
        if count > 1 && !role.multiple {
            issues.push(
                QualityIssue::new(
                    IssueKind::DuplicateRole,
                    IssueSeverity::Error,
                    format!("role '{}' accepts one column but has {count}", role.id),
                )
                .with_count(count as u64),
            );
        }
    }
    for role in schema.required_roles() {
        if !role_counts.contains_key(role.id.as_str()) {
            issues.push(QualityIssue::new(
                IssueKind::MissingRequiredRole,
                IssueSeverity::Error,
                format!("required role '{}' ({}) has no column", role.id, role.name),
            ));
        }
    }
    MappingReport {
        schema_id: schema.id.clone(),
        issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lens_model::SchemaSet;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn complete_mapping_is_clean() {
        let set = SchemaSet::builtin();
        let schema = set.get("hierarchy").expect("schema");
        let mappings = vec![
            ColumnMapping::new("id", "node_id"),
            ColumnMapping::new("parent", "parent_id"),
            ColumnMapping::new("a", "metric"),
            ColumnMapping::new("b", "metric"),
        ];
        let report = validate_mappings(schema, &mappings, &columns(&["id", "parent", "a", "b"]));
        assert!(report.issues.is_empty(), "{:?}", report.issues);
    }

    #[test]
    fn reports_every_kind_of_problem() {
        let set = SchemaSet::builtin();
        let schema = set.get("network").expect("schema");
        let mappings = vec![
            ColumnMapping::new("from", "source_node"),
            ColumnMapping::new("from2", "source_node"),
            ColumnMapping::new("kind", "node_id"),
        ];
        let report = validate_mappings(schema, &mappings, &columns(&["from", "kind"]));
        let kinds: Vec<IssueKind> = report.issues.iter().map(|issue| issue.kind).collect();
        assert_eq!(
            kinds,
            vec![
                IssueKind::UnknownColumn,
                IssueKind::UnknownRole,
                IssueKind::DuplicateRole,
                IssueKind::MissingRequiredRole,
            ]
        );
        assert_eq!(report.error_count(), 2);
        assert_eq!(report.warning_count(), 2);
        assert!(report.has_errors());
    }
}
