//! Integration tests for the tabular profiler.

use proptest::prelude::*;

use lens_model::{ColumnMapping, DataType, Dataset, IssueKind, Row, Value, ValueTransform};
use lens_transform::{ProfileOptions, profile_dataset};

fn single_column(values: Vec<Value>) -> Dataset {
    let rows = values
        .into_iter()
        .map(|value| Row::new().with("v", value))
        .collect();
    Dataset::new(vec!["v".to_string()], rows)
}

fn measure() -> Vec<ColumnMapping> {
    vec![ColumnMapping::new("v", "measure")]
}

fn ones_and_a_spike(ones: usize) -> Dataset {
    let mut values: Vec<Value> = (0..ones).map(|_| Value::from("1")).collect();
    values.push(Value::from("1000"));
    single_column(values)
}

#[test]
fn one_outlier_in_twenty_is_tolerated() {
    let profiles = profile_dataset(&ones_and_a_spike(19), &measure(), &ProfileOptions::default());
    let profile = &profiles[0];
    assert_eq!(profile.data_type, DataType::Number);
    assert!(profile.quality_issues.is_empty(), "{:?}", profile.quality_issues);
    assert_eq!(profile.quality_score, 100);
}

#[test]
fn one_outlier_in_nineteen_is_reported() {
    let profiles = profile_dataset(&ones_and_a_spike(18), &measure(), &ProfileOptions::default());
    let profile = &profiles[0];
    let outliers = profile
        .quality_issues
        .iter()
        .find(|issue| issue.kind == IssueKind::Outliers)
        .expect("outlier issue");
    assert_eq!(outliers.count, Some(1));
    assert_eq!(profile.quality_score, 85);
}

#[test]
fn mostly_null_column_scores_low() {
    let mut values = vec![Value::Null; 9];
    values.push(Value::from("x"));
    let profiles = profile_dataset(&single_column(values), &measure(), &ProfileOptions::default());
    let profile = &profiles[0];
    assert_eq!(profile.null_count, 9);
    assert_eq!(profile.total_count, 10);
    assert_eq!(profile.quality_issues[0].kind, IssueKind::HighNulls);
    assert_eq!(profile.quality_issues[0].message, "90.0% of values are missing");
    assert!(profile.quality_score < 50);
}

#[test]
fn even_count_median_takes_upper_middle() {
    let values = ["1", "2", "3", "4"].into_iter().map(Value::from).collect();
    let profiles = profile_dataset(&single_column(values), &measure(), &ProfileOptions::default());
    let stats = profiles[0].numeric_stats.as_ref().expect("numeric stats");
    assert_eq!(stats.median, 3.0);
    assert_eq!(stats.mean, 2.5);
}

#[test]
fn mapped_columns_lead_then_unmapped_in_file_order() {
    let dataset = Dataset::new(
        vec!["a".into(), "b".into(), "c".into(), "d".into()],
        vec![
            Row::new()
                .with("a", 1.0)
                .with("b", "x")
                .with("c", 2.0)
                .with("d", true),
            Row::new()
                .with("a", 3.0)
                .with("b", "y")
                .with("c", 4.0)
                .with("d", false),
        ],
    );
    let mappings = vec![
        ColumnMapping::new("c", "measure").with_display_name("Cost"),
        ColumnMapping::new("a", "identifier"),
    ];
    let profiles = profile_dataset(&dataset, &mappings, &ProfileOptions::default());
    let order: Vec<&str> = profiles.iter().map(|p| p.column.as_str()).collect();
    assert_eq!(order, vec!["c", "a", "b", "d"]);
    assert_eq!(profiles[0].display_name, "Cost");
    assert_eq!(profiles[0].data_type, DataType::Number);
    assert!(profiles[0].numeric_stats.is_some());

    for unmapped in &profiles[2..] {
        assert_eq!(unmapped.data_type, DataType::Mixed);
        assert!(unmapped.numeric_stats.is_none());
        assert!(unmapped.top_values.is_some());
    }
}

#[test]
fn mapping_to_absent_column_profiles_all_nulls() {
    let profiles = profile_dataset(
        &single_column(vec![Value::from("a")]),
        &[ColumnMapping::new("ghost", "category")],
        &ProfileOptions::default(),
    );
    assert_eq!(profiles[0].column, "ghost");
    assert_eq!(profiles[0].null_count, 1);
    assert_eq!(profiles[0].data_type, DataType::String);
    assert_eq!(profiles[1].column, "v");
}

#[test]
fn top_values_are_dropped_above_the_limit() {
    let values: Vec<Value> = ["a", "b", "c", "a"].into_iter().map(Value::from).collect();
    let dataset = single_column(values);

    let roomy = profile_dataset(&dataset, &measure(), &ProfileOptions::default());
    let top = roomy[0].top_values.as_ref().expect("top values");
    assert_eq!(top[0].value, "a");
    assert_eq!(top[0].count, 2);

    let tight = profile_dataset(
        &dataset,
        &measure(),
        &ProfileOptions::default().with_top_values_limit(2),
    );
    assert!(tight[0].top_values.is_none());
    assert_eq!(tight[0].unique_count, 3);
}

#[test]
fn inference_only_samples_the_leading_values() {
    let mut values: Vec<Value> = (0..5).map(|i| Value::from(f64::from(i))).collect();
    values.push(Value::from("not a number"));
    let dataset = single_column(values);

    let full = profile_dataset(&dataset, &measure(), &ProfileOptions::default());
    assert_eq!(full[0].data_type, DataType::String);

    let sampled = profile_dataset(
        &dataset,
        &measure(),
        &ProfileOptions::default().with_sample_size(5),
    );
    assert_eq!(sampled[0].data_type, DataType::Number);
    let stats = sampled[0].numeric_stats.as_ref().expect("numeric stats");
    assert_eq!(stats.max, 4.0);
}

#[test]
fn transform_applies_before_profiling() {
    let values = ["Red", "RED", " red "].into_iter().map(Value::from).collect();
    let mappings =
        vec![ColumnMapping::new("v", "category").with_transform(ValueTransform::Lowercase)];
    let profiles = profile_dataset(&single_column(values), &mappings, &ProfileOptions::default());
    // Lowercasing leaves the padded value distinct.
    assert_eq!(profiles[0].unique_count, 2);
    let top = profiles[0].top_values.as_ref().expect("top values");
    assert_eq!(top[0].value, "red");
    assert_eq!(top[0].count, 2);
}

#[test]
fn number_transform_nulls_unparseable_cells() {
    let values = ["12", "n/a", "30"].into_iter().map(Value::from).collect();
    let mappings = vec![ColumnMapping::new("v", "measure").with_transform(ValueTransform::Number)];
    let profiles = profile_dataset(&single_column(values), &mappings, &ProfileOptions::default());
    assert_eq!(profiles[0].null_count, 1);
    assert_eq!(profiles[0].data_type, DataType::Number);
    let stats = profiles[0].numeric_stats.as_ref().expect("numeric stats");
    assert_eq!(stats.mean, 21.0);
}

#[test]
fn date_columns_are_detected() {
    let values = ["2024-01-05", "2024-02-10", "2024-03-15"]
        .into_iter()
        .map(Value::from)
        .collect();
    let profiles = profile_dataset(
        &single_column(values),
        &[ColumnMapping::new("v", "timestamp")],
        &ProfileOptions::default(),
    );
    assert_eq!(profiles[0].data_type, DataType::Date);
    assert!(profiles[0].numeric_stats.is_none());
}

fn cell() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1.0e6f64..1.0e6).prop_map(Value::Number),
        "[a-zA-Z0-9 ]{0,6}".prop_map(Value::Text),
    ]
}

proptest! {
    #[test]
    fn scores_stay_in_range_and_repeat(values in prop::collection::vec(cell(), 0..60)) {
        let dataset = single_column(values);
        let options = ProfileOptions::default();
        let first = profile_dataset(&dataset, &measure(), &options);
        prop_assert!(first[0].quality_score <= 100);
        prop_assert_eq!(first[0].total_count, dataset.row_count());
        prop_assert!(first[0].null_count + first[0].unique_count <= dataset.row_count());

        let second = profile_dataset(&dataset, &measure(), &options);
        prop_assert_eq!(first, second);
    }
}
