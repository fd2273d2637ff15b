//! Tests for lens-model types.

use lens_model::{
    DataType, Dataset, HierarchyNode, NetworkData, NetworkEdge, NetworkNode, Row, SchemaSet,
    TabularProfile, Value,
};

#[test]
fn dataset_reads_column_values_in_row_order() {
    let dataset = Dataset::new(
        vec!["id".to_string(), "score".to_string()],
        vec![
            Row::new().with("id", "a").with("score", 1.0),
            Row::new().with("id", "b"),
        ],
    );
    let values = dataset.column_values("score");
    assert_eq!(values, vec![&Value::Number(1.0), &Value::Null]);
    assert!(dataset.has_column("id"));
    assert!(!dataset.has_column("missing"));
}

#[test]
fn profile_serializes_without_absent_sections() {
    let profile = TabularProfile {
        column: "name".to_string(),
        display_name: "Name".to_string(),
        data_type: DataType::String,
        null_count: 0,
        unique_count: 1,
        total_count: 1,
        top_values: None,
        numeric_stats: None,
        quality_score: 100,
        quality_issues: vec![],
    };
    let json = serde_json::to_value(&profile).expect("serialize profile");
    assert_eq!(json["dataType"], "string");
    assert_eq!(json["qualityScore"], 100);
    assert!(json.get("topValues").is_none());
    assert!(json.get("numericStats").is_none());
}

#[test]
fn network_round_trips_through_json() {
    let data = NetworkData {
        nodes: vec![NetworkNode {
            id: "x".to_string(),
            label: "x".to_string(),
            group: Some("g".to_string()),
        }],
        edges: vec![NetworkEdge {
            source: "x".to_string(),
            target: "x".to_string(),
            weight: 2.0,
            label: None,
            relationship_type: Some("self".to_string()),
            cardinality: None,
        }],
    };
    let json = serde_json::to_string(&data).expect("serialize network");
    assert!(json.contains(r#""relationshipType":"self""#));
    let round: NetworkData = serde_json::from_str(&json).expect("deserialize network");
    assert_eq!(round, data);
}

#[test]
fn dropping_a_deep_chain_does_not_overflow() {
    let mut root = HierarchyNode::new("0", "0");
    for level in 1..200_000 {
        let mut parent = HierarchyNode::new(level.to_string(), level.to_string());
        parent.children.push(root);
        root = parent;
    }
    drop(root);
}

#[test]
fn schema_set_round_trips_through_json() {
    let set = SchemaSet::builtin();
    let json = serde_json::to_string(&set).expect("serialize schemas");
    let round: SchemaSet = serde_json::from_str(&json).expect("deserialize schemas");
    assert_eq!(round, set);
}
