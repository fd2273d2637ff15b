//! Parent/child forest construction.
//!
//! Three passes over an index-based arena:
//! 1. one node per row keyed by the stringified `node_id`; a repeated id
//!    overwrites the earlier node in place (last write wins)
//! 2. link each node under its parent, or promote it to a root when the
//!    parent is blank, itself, or not in the node set
//! 3. walk down from the roots with an explicit stack assigning depths, then
//!    materialize owned trees bottom-up
//!
//! Nodes never reached from a root (parent cycles) are left out of the
//! forest and reported as `cycle_detected`.

use std::collections::BTreeMap;

use tracing::{debug, info_span, warn};

use lens_model::{
    ColumnMapping, Dataset, FlatNode, HierarchyNode, HierarchyOutput, HierarchyStats, IssueKind,
    IssueSeverity, QualityIssue,
};

use crate::error::Result;
use crate::resolve::HierarchyMapping;

#[derive(Debug)]
struct Slot {
    id: String,
    label: String,
    parent_id: Option<String>,
    metrics: BTreeMap<String, f64>,
    children: Vec<usize>,
}

#[derive(Debug, Default)]
struct Irregularities {
    missing_ids: usize,
    duplicate_ids: usize,
    dangling_parents: usize,
    self_parents: usize,
    unreachable: usize,
}

/// Build a forest from `dataset` using the hierarchy roles in `mappings`.
///
/// # Errors
///
/// Returns [`crate::TransformError::MissingRole`] when `node_id` or
/// `parent_id` has no mapping. Irregular rows never fail the build.
pub fn build_hierarchy(dataset: &Dataset, mappings: &[ColumnMapping]) -> Result<HierarchyOutput> {
    let mapping = HierarchyMapping::resolve(mappings)?;
    let span = info_span!("build_hierarchy", rows = dataset.row_count());
    let _guard = span.enter();

    let mut irregular = Irregularities::default();
    let mut slots = collect_nodes(dataset, &mapping, &mut irregular);
    let roots = link_parents(&mut slots, &mut irregular);
    let (order, depths) = assign_depths(&slots, &roots);
    irregular.unreachable = slots.len() - order.len();
    if irregular.unreachable > 0 {
        warn!(
            nodes = irregular.unreachable,
            "parent cycle left nodes unreachable from any root"
        );
    }
    let roots = materialize(slots, &roots, &order, &depths);
    debug!(roots = roots.len(), "built hierarchy");
    Ok(HierarchyOutput {
        roots,
        issues: irregularity_issues(&irregular),
    })
}

/// Pass 1: one slot per distinct id, in first-seen order.
fn collect_nodes(
    dataset: &Dataset,
    mapping: &HierarchyMapping,
    irregular: &mut Irregularities,
) -> Vec<Slot> {
    let mut index: BTreeMap<String, usize> = BTreeMap::new();
    let mut slots: Vec<Slot> = Vec::new();
    for row in &dataset.rows {
        let Some(id) = mapping.node_id.read_text(row) else {
            irregular.missing_ids += 1;
            continue;
        };
        let label = mapping
            .label
            .as_ref()
            .and_then(|column| column.read_text(row))
            .unwrap_or_else(|| id.clone());
        let metrics = mapping
            .metrics
            .iter()
            .map(|column| (column.name.clone(), column.read(row).coerce_f64()))
            .collect();
        let slot = Slot {
            id: id.clone(),
            label,
            parent_id: mapping.parent_id.read_text(row),
            metrics,
            children: Vec::new(),
        };
        match index.get(&id) {
            Some(&existing) => {
                irregular.duplicate_ids += 1;
                slots[existing] = slot;
            }
            None => {
                index.insert(id, slots.len());
                slots.push(slot);
            }
        }
    }
    debug!(nodes = slots.len(), "collected nodes");
    slots
}

/// Pass 2: attach children to parents; returns root indices in slot order.
fn link_parents(slots: &mut [Slot], irregular: &mut Irregularities) -> Vec<usize> {
    let index: BTreeMap<&str, usize> = slots
        .iter()
        .enumerate()
        .map(|(idx, slot)| (slot.id.as_str(), idx))
        .collect();
    let mut roots = Vec::new();
    let mut links = Vec::new();
    for (idx, slot) in slots.iter().enumerate() {
        let Some(parent_id) = slot.parent_id.as_deref() else {
            roots.push(idx);
            continue;
        };
        if parent_id == slot.id {
            irregular.self_parents += 1;
            roots.push(idx);
            continue;
        }
        match index.get(parent_id) {
            Some(&parent) => links.push((parent, idx)),
            None => {
                irregular.dangling_parents += 1;
                roots.push(idx);
            }
        }
    }
    for (parent, child) in links {
        slots[parent].children.push(child);
    }
    debug!(roots = roots.len(), "linked parents");
    roots
}

/// Pass 3: depth-first walk from the roots. Returns the visit order
/// (parents before children) and each slot's depth.
fn assign_depths(slots: &[Slot], roots: &[usize]) -> (Vec<usize>, Vec<Option<usize>>) {
    let mut depths: Vec<Option<usize>> = vec![None; slots.len()];
    let mut order = Vec::with_capacity(slots.len());
    let mut stack: Vec<(usize, usize)> = roots.iter().rev().map(|&root| (root, 0)).collect();
    while let Some((idx, depth)) = stack.pop() {
        if depths[idx].is_some() {
            continue;
        }
        depths[idx] = Some(depth);
        order.push(idx);
        for &child in slots[idx].children.iter().rev() {
            if depths[child].is_none() {
                stack.push((child, depth + 1));
            }
        }
    }
    (order, depths)
}

/// Build owned nodes children-first, so each parent takes finished subtrees.
fn materialize(
    mut slots: Vec<Slot>,
    roots: &[usize],
    order: &[usize],
    depths: &[Option<usize>],
) -> Vec<HierarchyNode> {
    let mut built: Vec<Option<HierarchyNode>> = Vec::new();
    built.resize_with(slots.len(), || None);
    for &idx in order.iter().rev() {
        let slot = &mut slots[idx];
        let children = slot
            .children
            .iter()
            .filter_map(|&child| built[child].take())
            .collect();
        built[idx] = Some(HierarchyNode {
            id: std::mem::take(&mut slot.id),
            label: std::mem::take(&mut slot.label),
            parent_id: slot.parent_id.take(),
            metrics: std::mem::take(&mut slot.metrics),
            children,
            depth: depths[idx].unwrap_or_default(),
        });
    }
    roots.iter().filter_map(|&root| built[root].take()).collect()
}

fn irregularity_issues(irregular: &Irregularities) -> Vec<QualityIssue> {
    let mut issues = Vec::new();
    if irregular.missing_ids > 0 {
        issues.push(
            QualityIssue::new(
                IssueKind::MissingNodeId,
                IssueSeverity::Info,
                format!("{} rows without a node id were skipped", irregular.missing_ids),
            )
            .with_count(irregular.missing_ids as u64),
        );
    }
    if irregular.duplicate_ids > 0 {
        issues.push(
            QualityIssue::new(
                IssueKind::DuplicateNodeId,
                IssueSeverity::Info,
                format!(
                    "{} rows repeated an earlier node id and replaced it",
                    irregular.duplicate_ids
                ),
            )
            .with_count(irregular.duplicate_ids as u64),
        );
    }
    let promoted = irregular.dangling_parents + irregular.self_parents;
    if promoted > 0 {
        issues.push(
            QualityIssue::new(
                IssueKind::DanglingParent,
                IssueSeverity::Info,
                format!(
                    "{promoted} nodes reference a missing parent or themselves and were promoted to roots"
                ),
            )
            .with_count(promoted as u64),
        );
    }
    if irregular.unreachable > 0 {
        issues.push(
            QualityIssue::new(
                IssueKind::CycleDetected,
                IssueSeverity::Warning,
                format!(
                    "{} nodes form a parent cycle and are not part of any tree",
                    irregular.unreachable
                ),
            )
            .with_count(irregular.unreachable as u64),
        );
    }
    issues
}

/// Pre-order listing of every node in the forest.
pub fn flatten(roots: &[HierarchyNode]) -> Vec<FlatNode> {
    let mut flat = Vec::new();
    let mut stack: Vec<&HierarchyNode> = roots.iter().rev().collect();
    while let Some(node) = stack.pop() {
        flat.push(FlatNode {
            id: node.id.clone(),
            label: node.label.clone(),
            parent_id: node.parent_id.clone(),
            depth: node.depth,
            child_count: node.children.len(),
            metrics: node.metrics.clone(),
        });
        stack.extend(node.children.iter().rev());
    }
    flat
}

/// Shape summary of a forest.
pub fn hierarchy_stats(roots: &[HierarchyNode]) -> HierarchyStats {
    let mut stats = HierarchyStats {
        root_count: roots.len(),
        ..HierarchyStats::default()
    };
    let mut stack: Vec<&HierarchyNode> = roots.iter().collect();
    while let Some(node) = stack.pop() {
        stats.node_count += 1;
        stats.max_depth = stats.max_depth.max(node.depth);
        if node.is_leaf() {
            stats.leaf_count += 1;
        }
        stack.extend(node.children.iter());
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use lens_model::Row;

    fn mappings() -> Vec<ColumnMapping> {
        vec![
            ColumnMapping::new("id", "node_id"),
            ColumnMapping::new("parent", "parent_id"),
        ]
    }

    fn dataset(pairs: &[(&str, &str)]) -> Dataset {
        Dataset::new(
            vec!["id".to_string(), "parent".to_string()],
            pairs
                .iter()
                .map(|(id, parent)| Row::new().with("id", *id).with("parent", *parent))
                .collect(),
        )
    }

    #[test]
    fn self_parent_becomes_root() {
        let output = build_hierarchy(&dataset(&[("A", "A")]), &mappings()).expect("build");
        assert_eq!(output.roots.len(), 1);
        assert_eq!(output.roots[0].depth, 0);
        assert_eq!(output.issues[0].kind, IssueKind::DanglingParent);
    }

    #[test]
    fn two_node_cycle_is_reported_not_looped() {
        let output = build_hierarchy(
            &dataset(&[("R", ""), ("A", "B"), ("B", "A")]),
            &mappings(),
        )
        .expect("build");
        assert_eq!(output.roots.len(), 1);
        assert_eq!(output.roots[0].id, "R");
        let cycle = output
            .issues
            .iter()
            .find(|issue| issue.kind == IssueKind::CycleDetected)
            .expect("cycle issue");
        assert_eq!(cycle.count, Some(2));
    }

    #[test]
    fn rows_without_id_are_skipped() {
        let output =
            build_hierarchy(&dataset(&[("", ""), ("A", "")]), &mappings()).expect("build");
        assert_eq!(output.roots.len(), 1);
        assert_eq!(output.issues[0].kind, IssueKind::MissingNodeId);
    }

    #[test]
    fn flatten_is_pre_order() {
        let output = build_hierarchy(
            &dataset(&[("A", ""), ("B", "A"), ("C", "B"), ("D", "A"), ("E", "")]),
            &mappings(),
        )
        .expect("build");
        let ids: Vec<String> = flatten(&output.roots).into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec!["A", "B", "C", "D", "E"]);
        let stats = hierarchy_stats(&output.roots);
        assert_eq!(
            stats,
            HierarchyStats {
                node_count: 5,
                root_count: 2,
                leaf_count: 3,
                max_depth: 2,
            }
        );
    }
}
