//! Tree structures produced by the hierarchy builder.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::issue::QualityIssue;

/// A node in the derived forest. Children are owned in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyNode {
    pub id: String,
    pub label: String,
    pub parent_id: Option<String>,
    pub metrics: BTreeMap<String, f64>,
    pub children: Vec<HierarchyNode>,
    /// Distance from the root; roots are 0.
    pub depth: usize,
}

impl HierarchyNode {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            parent_id: None,
            metrics: BTreeMap::new(),
            children: Vec::new(),
            depth: 0,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

// Deep chains would otherwise recurse once per level when dropped.
impl Drop for HierarchyNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Result of building a hierarchy: the forest plus structural findings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HierarchyOutput {
    pub roots: Vec<HierarchyNode>,
    pub issues: Vec<QualityIssue>,
}

/// One node of a flattened forest, in pre-order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatNode {
    pub id: String,
    pub label: String,
    pub parent_id: Option<String>,
    pub depth: usize,
    pub child_count: usize,
    pub metrics: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyStats {
    pub node_count: usize,
    pub root_count: usize,
    pub leaf_count: usize,
    pub max_depth: usize,
}
