//! Integration tests for the hierarchy builder.

use std::collections::BTreeSet;

use proptest::prelude::*;

use lens_model::{ColumnMapping, Dataset, HierarchyNode, IssueKind, Row, Value};
use lens_transform::{TransformError, build_hierarchy, flatten, hierarchy_stats};

fn mappings() -> Vec<ColumnMapping> {
    vec![
        ColumnMapping::new("id", "node_id"),
        ColumnMapping::new("parent", "parent_id"),
    ]
}

fn dataset(rows: Vec<Row>) -> Dataset {
    Dataset::new(vec!["id".to_string(), "parent".to_string()], rows)
}

fn pair(id: &str, parent: &str) -> Row {
    Row::new().with("id", id).with("parent", parent)
}

#[test]
fn dangling_parent_is_promoted_to_root() {
    let output = build_hierarchy(
        &dataset(vec![pair("A", ""), pair("B", "A"), pair("C", "Z")]),
        &mappings(),
    )
    .expect("build");

    let root_ids: Vec<&str> = output.roots.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(root_ids, vec!["A", "C"]);

    let a = &output.roots[0];
    assert_eq!(a.depth, 0);
    assert_eq!(a.children.len(), 1);
    assert_eq!(a.children[0].id, "B");
    assert_eq!(a.children[0].depth, 1);

    let c = &output.roots[1];
    assert_eq!(c.depth, 0);
    assert_eq!(c.parent_id.as_deref(), Some("Z"));

    let dangling = output
        .issues
        .iter()
        .find(|issue| issue.kind == IssueKind::DanglingParent)
        .expect("dangling issue");
    assert_eq!(dangling.count, Some(1));
}

#[test]
fn duplicate_id_keeps_last_row_in_first_position() {
    let output = build_hierarchy(
        &dataset(vec![
            pair("A", ""),
            pair("B", ""),
            Row::new().with("id", "A").with("parent", "B"),
        ]),
        &mappings(),
    )
    .expect("build");

    // The second "A" row replaced the first, so A now hangs under B.
    assert_eq!(output.roots.len(), 1);
    assert_eq!(output.roots[0].id, "B");
    assert_eq!(output.roots[0].children[0].id, "A");
    assert!(
        output
            .issues
            .iter()
            .any(|issue| issue.kind == IssueKind::DuplicateNodeId && issue.count == Some(1))
    );
}

#[test]
fn children_keep_row_order() {
    let output = build_hierarchy(
        &dataset(vec![
            pair("C2", "P"),
            pair("P", ""),
            pair("C1", "P"),
            pair("C3", "P"),
        ]),
        &mappings(),
    )
    .expect("build");
    let children: Vec<&str> = output.roots[0]
        .children
        .iter()
        .map(|n| n.id.as_str())
        .collect();
    assert_eq!(children, vec!["C2", "C1", "C3"]);
}

#[test]
fn labels_and_metrics_are_read_from_mapped_columns() {
    let mut mappings = mappings();
    mappings.push(ColumnMapping::new("name", "node_label"));
    mappings.push(ColumnMapping::new("budget", "metric").with_display_name("Budget"));
    mappings.push(ColumnMapping::new("staff", "metric"));

    let rows = vec![
        Row::new()
            .with("id", 1.0)
            .with("parent", Value::Null)
            .with("name", "Head office")
            .with("budget", "1200.5")
            .with("staff", "n/a"),
        Row::new().with("id", 2.0).with("parent", 1.0).with("staff", 7.0),
    ];
    let output = build_hierarchy(&dataset(rows), &mappings).expect("build");

    let root = &output.roots[0];
    assert_eq!(root.id, "1");
    assert_eq!(root.label, "Head office");
    assert_eq!(root.metrics.get("Budget"), Some(&1200.5));
    assert_eq!(root.metrics.get("staff"), Some(&0.0));

    let child = &root.children[0];
    assert_eq!(child.label, "2");
    assert_eq!(child.parent_id.as_deref(), Some("1"));
    assert_eq!(child.metrics.get("Budget"), Some(&0.0));
    assert_eq!(child.metrics.get("staff"), Some(&7.0));
}

#[test]
fn missing_node_id_mapping_fails_fast() {
    let err = build_hierarchy(
        &dataset(vec![pair("A", "")]),
        &[ColumnMapping::new("parent", "parent_id")],
    )
    .unwrap_err();
    assert!(matches!(
        err,
        TransformError::MissingRole {
            role: "node_id",
            ..
        }
    ));
}

#[test]
fn deep_chain_builds_without_recursion() {
    let rows: Vec<Row> = (0..50_000)
        .map(|i| {
            let parent = if i == 0 {
                String::new()
            } else {
                (i - 1).to_string()
            };
            Row::new().with("id", i.to_string()).with("parent", parent)
        })
        .collect();
    let output = build_hierarchy(&dataset(rows), &mappings()).expect("build");
    let stats = hierarchy_stats(&output.roots);
    assert_eq!(stats.node_count, 50_000);
    assert_eq!(stats.max_depth, 49_999);
    assert_eq!(flatten(&output.roots).len(), 50_000);
}

/// Check depth and child-count invariants with an explicit stack.
fn check_forest(roots: &[HierarchyNode]) -> usize {
    let mut child_links = 0usize;
    let mut stack: Vec<&HierarchyNode> = Vec::new();
    for root in roots {
        assert_eq!(root.depth, 0);
        stack.push(root);
    }
    let mut seen = 0usize;
    while let Some(node) = stack.pop() {
        seen += 1;
        child_links += node.children.len();
        for child in &node.children {
            assert_eq!(child.depth, node.depth + 1);
            assert_eq!(child.parent_id.as_deref(), Some(node.id.as_str()));
            stack.push(child);
        }
    }
    assert_eq!(child_links + roots.len(), seen);
    seen
}

fn acyclic_rows() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec(prop::option::of(0usize..64), 1..40).prop_map(|parents| {
        parents
            .into_iter()
            .enumerate()
            .map(|(idx, parent)| {
                let parent = match parent {
                    // Earlier rows only, so no cycles; index 63 is never an id here.
                    Some(p) if p < idx => format!("n{p}"),
                    Some(63) => "missing".to_string(),
                    _ => String::new(),
                };
                Row::new()
                    .with("id", format!("n{idx}"))
                    .with("parent", parent)
            })
            .collect()
    })
}

fn arbitrary_rows() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec((0u8..12, prop::option::of(0u8..12)), 0..40).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(id, parent)| {
                Row::new()
                    .with("id", format!("k{id}"))
                    .with("parent", parent.map(|p| format!("k{p}")).unwrap_or_default())
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn acyclic_input_keeps_every_node(rows in acyclic_rows()) {
        let expected = rows.len();
        let output = build_hierarchy(&dataset(rows), &mappings()).expect("build");
        prop_assert_eq!(check_forest(&output.roots), expected);
    }

    #[test]
    fn arbitrary_input_accounts_for_every_id(rows in arbitrary_rows()) {
        let distinct: BTreeSet<String> = rows.iter().map(|row| row.get("id").to_key()).collect();
        let input = dataset(rows);
        let output = build_hierarchy(&input, &mappings()).expect("build");
        let in_forest = check_forest(&output.roots);
        let unreachable = output
            .issues
            .iter()
            .find(|issue| issue.kind == IssueKind::CycleDetected)
            .and_then(|issue| issue.count)
            .unwrap_or(0) as usize;
        prop_assert_eq!(in_forest + unreachable, distinct.len());

        let again = build_hierarchy(&input, &mappings()).expect("build");
        prop_assert_eq!(again, output);
    }
}
