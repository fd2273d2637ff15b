//! Data model for reinterpreting flat tabular data through semantic schemas.
//!
//! Inputs ([`Dataset`], [`ColumnMapping`], [`SchemaSet`]) and the derived
//! outputs ([`HierarchyOutput`], [`TabularProfile`], [`NetworkData`]) are plain
//! serde-friendly structures with no behavior beyond small accessors.

pub mod hierarchy;
pub mod issue;
pub mod mapping;
pub mod network;
pub mod profile;
pub mod schema;
pub mod value;

pub use hierarchy::{FlatNode, HierarchyNode, HierarchyOutput, HierarchyStats};
pub use issue::{IssueKind, IssueSeverity, QualityIssue};
pub use mapping::{ColumnMapping, ValueTransform};
pub use network::{NetworkData, NetworkEdge, NetworkNode, NetworkStats};
pub use profile::{DataType, NumericStats, TabularProfile, TopValue};
pub use schema::{
    DataKind, HierarchyRole, NetworkRole, Role, RoleSpec, SchemaSet, SemanticSchema, TabularRole,
};
pub use value::{Dataset, Row, Value};
