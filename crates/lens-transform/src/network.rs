//! Node/edge graph construction.
//!
//! Each row with both endpoints present contributes exactly one edge.
//! Endpoints are registered once by id; the first row to introduce a node
//! decides its group.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info_span};

use lens_model::{
    ColumnMapping, Dataset, NetworkData, NetworkEdge, NetworkNode, NetworkStats, Row,
};

use crate::error::Result;
use crate::resolve::{MappedColumn, NetworkMapping};

/// Edge weight used when the weight cell is missing or not numeric.
pub const DEFAULT_EDGE_WEIGHT: f64 = 1.0;

/// Build a graph from `dataset` using the network roles in `mappings`.
///
/// # Errors
///
/// Returns [`crate::TransformError::MissingRole`] when `source_node` or
/// `target_node` has no mapping.
pub fn build_network(dataset: &Dataset, mappings: &[ColumnMapping]) -> Result<NetworkData> {
    let mapping = NetworkMapping::resolve(mappings)?;
    let span = info_span!("build_network", rows = dataset.row_count());
    let _guard = span.enter();

    let mut registry = NodeRegistry::default();
    let mut edges = Vec::new();
    let mut skipped = 0usize;
    for row in &dataset.rows {
        let (Some(source), Some(target)) =
            (mapping.source.read_text(row), mapping.target.read_text(row))
        else {
            skipped += 1;
            continue;
        };
        let group = optional_text(mapping.group.as_ref(), row);
        registry.register(&source, group.as_deref());
        registry.register(&target, group.as_deref());
        let weight = mapping
            .weight
            .as_ref()
            .and_then(|column| column.read(row).as_f64())
            .unwrap_or(DEFAULT_EDGE_WEIGHT);
        edges.push(NetworkEdge {
            source,
            target,
            weight,
            label: optional_text(mapping.label.as_ref(), row),
            relationship_type: optional_text(mapping.relationship_type.as_ref(), row),
            cardinality: optional_text(mapping.cardinality.as_ref(), row),
        });
    }
    debug!(
        nodes = registry.nodes.len(),
        edges = edges.len(),
        skipped,
        "built network"
    );
    Ok(NetworkData {
        nodes: registry.nodes,
        edges,
    })
}

fn optional_text(column: Option<&MappedColumn>, row: &Row) -> Option<String> {
    column.and_then(|column| column.read_text(row))
}

/// Id-keyed nodes in first-insertion order.
#[derive(Debug, Default)]
struct NodeRegistry {
    index: BTreeMap<String, usize>,
    nodes: Vec<NetworkNode>,
}

impl NodeRegistry {
    /// Add a node unless already present. Existing nodes are never updated.
    fn register(&mut self, id: &str, group: Option<&str>) {
        if self.index.contains_key(id) {
            return;
        }
        self.index.insert(id.to_string(), self.nodes.len());
        self.nodes.push(NetworkNode {
            id: id.to_string(),
            label: id.to_string(),
            group: group.map(str::to_string),
        });
    }
}

/// Edge counts touching one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDegree {
    pub id: String,
    pub in_degree: usize,
    pub out_degree: usize,
}

impl NodeDegree {
    pub fn total(&self) -> usize {
        self.in_degree + self.out_degree
    }
}

pub fn network_stats(network: &NetworkData) -> NetworkStats {
    NetworkStats {
        node_count: network.nodes.len(),
        edge_count: network.edges.len(),
        total_weight: network.edges.iter().map(|edge| edge.weight).sum(),
    }
}

/// In/out degree per node, in node order. Duplicate edges count each time.
pub fn node_degrees(network: &NetworkData) -> Vec<NodeDegree> {
    let mut degrees: Vec<NodeDegree> = network
        .nodes
        .iter()
        .map(|node| NodeDegree {
            id: node.id.clone(),
            in_degree: 0,
            out_degree: 0,
        })
        .collect();
    let index: BTreeMap<&str, usize> = network
        .nodes
        .iter()
        .enumerate()
        .map(|(idx, node)| (node.id.as_str(), idx))
        .collect();
    for edge in &network.edges {
        if let Some(&idx) = index.get(edge.source.as_str()) {
            degrees[idx].out_degree += 1;
        }
        if let Some(&idx) = index.get(edge.target.as_str()) {
            degrees[idx].in_degree += 1;
        }
    }
    degrees
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mappings() -> Vec<ColumnMapping> {
        vec![
            ColumnMapping::new("s", "source_node"),
            ColumnMapping::new("t", "target_node"),
            ColumnMapping::new("w", "edge_weight"),
            ColumnMapping::new("g", "node_group"),
        ]
    }

    #[test]
    fn first_group_wins() {
        let dataset = Dataset::new(
            vec!["s".into(), "t".into(), "g".into()],
            vec![
                Row::new().with("s", "a").with("t", "b").with("g", "red"),
                Row::new().with("s", "a").with("t", "c").with("g", "blue"),
            ],
        );
        let network = build_network(&dataset, &mappings()).expect("build");
        let groups: Vec<(&str, Option<&str>)> = network
            .nodes
            .iter()
            .map(|node| (node.id.as_str(), node.group.as_deref()))
            .collect();
        assert_eq!(
            groups,
            vec![("a", Some("red")), ("b", Some("red")), ("c", Some("blue"))]
        );
    }

    #[test]
    fn rows_missing_an_endpoint_have_no_side_effects() {
        let dataset = Dataset::new(
            vec!["s".into(), "t".into()],
            vec![
                Row::new().with("s", "lonely"),
                Row::new().with("s", "").with("t", "also"),
                Row::new().with("s", "x").with("t", "y"),
            ],
        );
        let network = build_network(&dataset, &mappings()).expect("build");
        assert_eq!(network.nodes.len(), 2);
        assert_eq!(network.edges.len(), 1);
    }

    #[test]
    fn non_numeric_weight_defaults_to_one() {
        let dataset = Dataset::new(
            vec!["s".into(), "t".into(), "w".into()],
            vec![
                Row::new().with("s", "x").with("t", "y").with("w", "heavy"),
                Row::new().with("s", "x").with("t", "y").with("w", "0"),
            ],
        );
        let network = build_network(&dataset, &mappings()).expect("build");
        assert_eq!(network.edges[0].weight, 1.0);
        assert_eq!(network.edges[1].weight, 0.0);
    }

    #[test]
    fn degrees_count_duplicate_edges() {
        let dataset = Dataset::new(
            vec!["s".into(), "t".into()],
            vec![
                Row::new().with("s", "x").with("t", "y"),
                Row::new().with("s", "x").with("t", "y"),
                Row::new().with("s", "y").with("t", "z"),
            ],
        );
        let network = build_network(&dataset, &mappings()).expect("build");
        let degrees = node_degrees(&network);
        assert_eq!(degrees[0].out_degree, 2);
        assert_eq!(degrees[1].in_degree, 2);
        assert_eq!(degrees[1].total(), 3);
        assert_eq!(network_stats(&network).total_weight, 3.0);
    }
}
