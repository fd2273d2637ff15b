//! Dispatch to the builder selected by a schema's data kind.

use serde::{Deserialize, Serialize};
use tracing::info;

use lens_model::{
    ColumnMapping, DataKind, Dataset, HierarchyOutput, NetworkData, SchemaSet, TabularProfile,
};

use crate::error::{Result, TransformError};
use crate::hierarchy::build_hierarchy;
use crate::network::build_network;
use crate::options::ProfileOptions;
use crate::profile::profile_dataset;

/// A derived structure, tagged by the data kind that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "lowercase")]
pub enum Derived {
    Hierarchy(HierarchyOutput),
    Tabular(Vec<TabularProfile>),
    Network(NetworkData),
}

impl Derived {
    pub fn kind(&self) -> DataKind {
        match self {
            Self::Hierarchy(_) => DataKind::Hierarchy,
            Self::Tabular(_) => DataKind::Tabular,
            Self::Network(_) => DataKind::Network,
        }
    }
}

/// Run the builder for `kind` directly.
///
/// # Errors
///
/// [`TransformError::MissingRole`] from the hierarchy and network builders.
pub fn transform_kind(
    kind: DataKind,
    dataset: &Dataset,
    mappings: &[ColumnMapping],
    options: &ProfileOptions,
) -> Result<Derived> {
    let derived = match kind {
        DataKind::Hierarchy => Derived::Hierarchy(build_hierarchy(dataset, mappings)?),
        DataKind::Tabular => Derived::Tabular(profile_dataset(dataset, mappings, options)),
        DataKind::Network => Derived::Network(build_network(dataset, mappings)?),
    };
    info!(%kind, rows = dataset.row_count(), "transformation complete");
    Ok(derived)
}

/// Look up `schema_id` in `schemas` and run the matching builder.
///
/// # Errors
///
/// [`TransformError::UnknownSchema`] when the id is not in `schemas`, or a
/// builder's configuration error.
pub fn transform(
    dataset: &Dataset,
    schemas: &SchemaSet,
    schema_id: &str,
    mappings: &[ColumnMapping],
    options: &ProfileOptions,
) -> Result<Derived> {
    let schema = schemas
        .get(schema_id)
        .ok_or_else(|| TransformError::UnknownSchema {
            id: schema_id.to_string(),
        })?;
    transform_kind(schema.kind, dataset, mappings, options)
}
