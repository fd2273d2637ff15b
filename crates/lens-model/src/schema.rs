//! Semantic schemas and their roles.
//!
//! Each schema targets one [`DataKind`] and declares the roles a user may map
//! columns onto. Roles form a closed set per data kind; mappings carry role
//! ids as plain strings and are parsed into [`Role`] at the engine boundary.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::profile::DataType;

/// The derived structure a schema produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataKind {
    Hierarchy,
    Tabular,
    Network,
}

impl DataKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hierarchy => "hierarchy",
            Self::Tabular => "tabular",
            Self::Network => "network",
        }
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HierarchyRole {
    NodeId,
    ParentId,
    NodeLabel,
    Metric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabularRole {
    Identifier,
    Category,
    Measure,
    Dimension,
    Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkRole {
    SourceNode,
    TargetNode,
    EdgeWeight,
    EdgeLabel,
    NodeGroup,
    RelationshipType,
    Cardinality,
}

/// A recognized role, tagged by the data kind it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Hierarchy(HierarchyRole),
    Tabular(TabularRole),
    Network(NetworkRole),
}

impl Role {
    /// Every recognized role, grouped by data kind.
    pub const ALL: [Role; 16] = [
        Role::Hierarchy(HierarchyRole::NodeId),
        Role::Hierarchy(HierarchyRole::ParentId),
        Role::Hierarchy(HierarchyRole::NodeLabel),
        Role::Hierarchy(HierarchyRole::Metric),
        Role::Tabular(TabularRole::Identifier),
        Role::Tabular(TabularRole::Category),
        Role::Tabular(TabularRole::Measure),
        Role::Tabular(TabularRole::Dimension),
        Role::Tabular(TabularRole::Timestamp),
        Role::Network(NetworkRole::SourceNode),
        Role::Network(NetworkRole::TargetNode),
        Role::Network(NetworkRole::EdgeWeight),
        Role::Network(NetworkRole::EdgeLabel),
        Role::Network(NetworkRole::NodeGroup),
        Role::Network(NetworkRole::RelationshipType),
        Role::Network(NetworkRole::Cardinality),
    ];

    /// Resolve a role id within one data kind.
    pub fn parse(kind: DataKind, id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|role| role.kind() == kind && role.id() == id)
    }

    pub fn kind(self) -> DataKind {
        match self {
            Self::Hierarchy(_) => DataKind::Hierarchy,
            Self::Tabular(_) => DataKind::Tabular,
            Self::Network(_) => DataKind::Network,
        }
    }

    /// Wire identifier, as used in mappings and schema declarations.
    pub fn id(self) -> &'static str {
        match self {
            Self::Hierarchy(role) => match role {
                HierarchyRole::NodeId => "node_id",
                HierarchyRole::ParentId => "parent_id",
                HierarchyRole::NodeLabel => "node_label",
                HierarchyRole::Metric => "metric",
            },
            Self::Tabular(role) => match role {
                TabularRole::Identifier => "identifier",
                TabularRole::Category => "category",
                TabularRole::Measure => "measure",
                TabularRole::Dimension => "dimension",
                TabularRole::Timestamp => "timestamp",
            },
            Self::Network(role) => match role {
                NetworkRole::SourceNode => "source_node",
                NetworkRole::TargetNode => "target_node",
                NetworkRole::EdgeWeight => "edge_weight",
                NetworkRole::EdgeLabel => "edge_label",
                NetworkRole::NodeGroup => "node_group",
                NetworkRole::RelationshipType => "relationship_type",
                NetworkRole::Cardinality => "cardinality",
            },
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// One role declaration within a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleSpec {
    pub id: String,
    pub name: String,
    pub required: bool,
    /// Whether several columns may be mapped onto this role.
    #[serde(default)]
    pub multiple: bool,
    /// Expected column type, informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<DataType>,
}

impl RoleSpec {
    fn new(role: Role, name: &str) -> Self {
        Self {
            id: role.id().to_string(),
            name: name.to_string(),
            required: false,
            multiple: false,
            data_type: None,
        }
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    fn typed(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }
}

/// A named set of roles producing one kind of derived structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticSchema {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub kind: DataKind,
    pub roles: Vec<RoleSpec>,
}

impl SemanticSchema {
    pub fn role(&self, id: &str) -> Option<&RoleSpec> {
        self.roles.iter().find(|role| role.id == id)
    }

    pub fn required_roles(&self) -> impl Iterator<Item = &RoleSpec> {
        self.roles.iter().filter(|role| role.required)
    }
}

/// The schemas available to a caller. Passed explicitly into every
/// operation that needs to look one up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaSet {
    pub schemas: Vec<SemanticSchema>,
}

impl SchemaSet {
    pub fn new(schemas: Vec<SemanticSchema>) -> Self {
        Self { schemas }
    }

    /// One schema per data kind, covering every recognized role.
    pub fn builtin() -> Self {
        use self::{HierarchyRole as H, NetworkRole as N, TabularRole as T};

        let hierarchy = SemanticSchema {
            id: "hierarchy".to_string(),
            name: "Hierarchy".to_string(),
            description: "Parent/child tree built from node and parent ids".to_string(),
            kind: DataKind::Hierarchy,
            roles: vec![
                RoleSpec::new(Role::Hierarchy(H::NodeId), "Node ID").required(),
                RoleSpec::new(Role::Hierarchy(H::ParentId), "Parent ID").required(),
                RoleSpec::new(Role::Hierarchy(H::NodeLabel), "Label"),
                RoleSpec::new(Role::Hierarchy(H::Metric), "Metric")
                    .multiple()
                    .typed(DataType::Number),
            ],
        };
        let tabular = SemanticSchema {
            id: "tabular".to_string(),
            name: "Tabular".to_string(),
            description: "Per-column profiles with data quality scoring".to_string(),
            kind: DataKind::Tabular,
            roles: vec![
                RoleSpec::new(Role::Tabular(T::Identifier), "Identifier"),
                RoleSpec::new(Role::Tabular(T::Category), "Category").multiple(),
                RoleSpec::new(Role::Tabular(T::Measure), "Measure")
                    .multiple()
                    .typed(DataType::Number),
                RoleSpec::new(Role::Tabular(T::Dimension), "Dimension").multiple(),
                RoleSpec::new(Role::Tabular(T::Timestamp), "Timestamp").typed(DataType::Date),
            ],
        };
        let network = SemanticSchema {
            id: "network".to_string(),
            name: "Network".to_string(),
            description: "Nodes and edges built from source/target pairs".to_string(),
            kind: DataKind::Network,
            roles: vec![
                RoleSpec::new(Role::Network(N::SourceNode), "Source").required(),
                RoleSpec::new(Role::Network(N::TargetNode), "Target").required(),
                RoleSpec::new(Role::Network(N::EdgeWeight), "Weight").typed(DataType::Number),
                RoleSpec::new(Role::Network(N::EdgeLabel), "Edge label"),
                RoleSpec::new(Role::Network(N::NodeGroup), "Group"),
                RoleSpec::new(Role::Network(N::RelationshipType), "Relationship type"),
                RoleSpec::new(Role::Network(N::Cardinality), "Cardinality"),
            ],
        };
        Self::new(vec![hierarchy, tabular, network])
    }

    pub fn get(&self, id: &str) -> Option<&SemanticSchema> {
        self.schemas.iter().find(|schema| schema.id == id)
    }

    pub fn by_kind(&self, kind: DataKind) -> impl Iterator<Item = &SemanticSchema> {
        self.schemas.iter().filter(move |schema| schema.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SemanticSchema> {
        self.schemas.iter()
    }
}

impl Default for SchemaSet {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_ids_round_trip_within_their_kind() {
        for role in Role::ALL {
            assert_eq!(Role::parse(role.kind(), role.id()), Some(role));
        }
        assert_eq!(Role::parse(DataKind::Network, "node_id"), None);
    }

    #[test]
    fn builtin_schemas_declare_every_role() {
        let set = SchemaSet::builtin();
        for role in Role::ALL {
            let schema = set
                .by_kind(role.kind())
                .next()
                .expect("schema for every kind");
            assert!(schema.role(role.id()).is_some(), "missing {role}");
        }
    }

    #[test]
    fn hierarchy_requires_node_and_parent() {
        let set = SchemaSet::builtin();
        let schema = set.get("hierarchy").expect("hierarchy schema");
        let required: Vec<&str> = schema.required_roles().map(|r| r.id.as_str()).collect();
        assert_eq!(required, vec!["node_id", "parent_id"]);
        assert!(schema.role("metric").is_some_and(|r| r.multiple));
    }
}
