//! Typed mapping records, resolved once before a builder walks the rows.
//!
//! Mappings arrive as `(column, role id)` strings. Each builder parses the
//! ones it understands into a record with one field per role, so the row
//! loop never searches mappings by string. Role ids a builder does not know
//! are ignored here; `validate_mappings` reports them.

use std::borrow::Cow;

use lens_model::{
    ColumnMapping, DataKind, HierarchyRole, NetworkRole, Role, Row, Value, ValueTransform,
};

use crate::error::{Result, TransformError};

/// A column bound to a role, with its optional cell transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedColumn {
    pub column: String,
    /// Display name of the mapping.
    pub name: String,
    pub transform: Option<ValueTransform>,
}

impl MappedColumn {
    pub fn from_mapping(mapping: &ColumnMapping) -> Self {
        Self {
            column: mapping.source_column.clone(),
            name: mapping.label().to_string(),
            transform: mapping.transform,
        }
    }

    /// Read this column from a row, applying the transform if any.
    pub fn read<'a>(&self, row: &'a Row) -> Cow<'a, Value> {
        let value = row.get(&self.column);
        match self.transform {
            Some(transform) => Cow::Owned(transform.apply(value)),
            None => Cow::Borrowed(value),
        }
    }

    /// Stringified cell, or `None` when the cell is null or blank.
    pub fn read_text(&self, row: &Row) -> Option<String> {
        let value = self.read(row);
        if value.is_null() {
            None
        } else {
            Some(value.to_key())
        }
    }
}

/// Mappings recognized for the given data kind, in mapping order.
fn recognized(kind: DataKind, mappings: &[ColumnMapping]) -> impl Iterator<Item = (Role, &ColumnMapping)> {
    mappings.iter().filter_map(move |mapping| {
        Role::parse(kind, mapping.role_id.trim()).map(|role| (role, mapping))
    })
}

fn required(slot: Option<MappedColumn>, kind: DataKind, role: Role) -> Result<MappedColumn> {
    slot.ok_or(TransformError::MissingRole {
        kind,
        role: role.id(),
    })
}

/// Resolved roles for the hierarchy builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyMapping {
    pub node_id: MappedColumn,
    pub parent_id: MappedColumn,
    pub label: Option<MappedColumn>,
    pub metrics: Vec<MappedColumn>,
}

impl HierarchyMapping {
    /// Resolve hierarchy roles. Single-valued roles take the first mapping.
    ///
    /// # Errors
    ///
    /// [`TransformError::MissingRole`] when `node_id` or `parent_id` is unmapped.
    pub fn resolve(mappings: &[ColumnMapping]) -> Result<Self> {
        let mut node_id = None;
        let mut parent_id = None;
        let mut label = None;
        let mut metrics = Vec::new();
        for (role, mapping) in recognized(DataKind::Hierarchy, mappings) {
            let Role::Hierarchy(role) = role else {
                continue;
            };
            let column = MappedColumn::from_mapping(mapping);
            match role {
                HierarchyRole::NodeId => {
                    node_id.get_or_insert(column);
                }
                HierarchyRole::ParentId => {
                    parent_id.get_or_insert(column);
                }
                HierarchyRole::NodeLabel => {
                    label.get_or_insert(column);
                }
                HierarchyRole::Metric => metrics.push(column),
            }
        }
        Ok(Self {
            node_id: required(
                node_id,
                DataKind::Hierarchy,
                Role::Hierarchy(HierarchyRole::NodeId),
            )?,
            parent_id: required(
                parent_id,
                DataKind::Hierarchy,
                Role::Hierarchy(HierarchyRole::ParentId),
            )?,
            label,
            metrics,
        })
    }
}

/// Resolved roles for the network builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkMapping {
    pub source: MappedColumn,
    pub target: MappedColumn,
    pub weight: Option<MappedColumn>,
    pub label: Option<MappedColumn>,
    pub group: Option<MappedColumn>,
    pub relationship_type: Option<MappedColumn>,
    pub cardinality: Option<MappedColumn>,
}

impl NetworkMapping {
    /// Resolve network roles. Every role takes the first mapping.
    ///
    /// # Errors
    ///
    /// [`TransformError::MissingRole`] when `source_node` or `target_node` is unmapped.
    pub fn resolve(mappings: &[ColumnMapping]) -> Result<Self> {
        let mut source = None;
        let mut target = None;
        let mut weight = None;
        let mut label = None;
        let mut group = None;
        let mut relationship_type = None;
        let mut cardinality = None;
        for (role, mapping) in recognized(DataKind::Network, mappings) {
            let Role::Network(role) = role else {
                continue;
            };
            let slot = match role {
                NetworkRole::SourceNode => &mut source,
                NetworkRole::TargetNode => &mut target,
                NetworkRole::EdgeWeight => &mut weight,
                NetworkRole::EdgeLabel => &mut label,
                NetworkRole::NodeGroup => &mut group,
                NetworkRole::RelationshipType => &mut relationship_type,
                NetworkRole::Cardinality => &mut cardinality,
            };
            if slot.is_none() {
                *slot = Some(MappedColumn::from_mapping(mapping));
            }
        }
        Ok(Self {
            source: required(
                source,
                DataKind::Network,
                Role::Network(NetworkRole::SourceNode),
            )?,
            target: required(
                target,
                DataKind::Network,
                Role::Network(NetworkRole::TargetNode),
            )?,
            weight,
            label,
            group,
            relationship_type,
            cardinality,
        })
    }
}
