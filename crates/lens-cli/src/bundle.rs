//! Mapping bundles: a schema id plus the column mappings to run it with.
//!
//! Bundles are JSON files:
//!
//! ```json
//! {
//!   "schema": "hierarchy",
//!   "mappings": [
//!     { "sourceColumn": "id", "roleId": "node_id" },
//!     { "sourceColumn": "manager", "roleId": "parent_id" },
//!     { "sourceColumn": "salary", "roleId": "metric", "displayName": "Salary", "transform": "number" }
//!   ]
//! }
//! ```

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use lens_model::{ColumnMapping, SchemaSet, ValueTransform};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
    /// Schema id, looked up in the active schema set.
    pub schema: String,
    #[serde(default)]
    pub mappings: Vec<ColumnMapping>,
}

impl Bundle {
    pub fn new(schema: impl Into<String>, mappings: Vec<ColumnMapping>) -> Self {
        Self {
            schema: schema.into(),
            mappings,
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("parse mapping bundle")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read mapping bundle {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("in {}", path.display()))
    }
}

/// Parse a `COLUMN=ROLE[:TRANSFORM]` command-line mapping.
///
/// The column is split at the last `=`, so column names may contain `=`.
pub fn parse_mapping_arg(arg: &str) -> Result<ColumnMapping> {
    let Some((column, rest)) = arg.rsplit_once('=') else {
        bail!("mapping '{arg}' must look like COLUMN=ROLE or COLUMN=ROLE:TRANSFORM");
    };
    let column = column.trim();
    if column.is_empty() {
        bail!("mapping '{arg}' has no column name");
    }
    let (role, transform) = match rest.split_once(':') {
        Some((role, name)) => {
            let transform = ValueTransform::parse(name).with_context(|| {
                format!("unknown transform '{name}' (expected trim, uppercase, lowercase or number)")
            })?;
            (role.trim(), Some(transform))
        }
        None => (rest.trim(), None),
    };
    if role.is_empty() {
        bail!("mapping '{arg}' has no role id");
    }
    let mapping = ColumnMapping::new(column, role);
    Ok(match transform {
        Some(transform) => mapping.with_transform(transform),
        None => mapping,
    })
}

/// Schema set from a JSON file, or the built-in set.
pub fn load_schema_set(path: Option<&Path>) -> Result<SchemaSet> {
    let Some(path) = path else {
        return Ok(SchemaSet::builtin());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read schema set {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse schema set {}", path.display()))
}
