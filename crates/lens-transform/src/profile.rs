//! Per-column profiling of a dataset.
//!
//! Mapped columns come first, in mapping order, and get full detail: type
//! inference, numeric statistics and outlier-aware quality scoring. Every
//! remaining dataset column follows in file order at reduced detail
//! (`mixed` type, no numeric statistics).

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info_span};

use lens_model::{
    ColumnMapping, DataType, Dataset, NumericStats, TabularProfile, TopValue, Value,
};

use crate::inference::infer_type;
use crate::options::ProfileOptions;
use crate::quality::{ColumnCounts, score_quality};
use crate::resolve::MappedColumn;

/// Profile every column of `dataset`.
pub fn profile_dataset(
    dataset: &Dataset,
    mappings: &[ColumnMapping],
    options: &ProfileOptions,
) -> Vec<TabularProfile> {
    let span = info_span!(
        "profile_dataset",
        rows = dataset.row_count(),
        columns = dataset.columns.len()
    );
    let _guard = span.enter();

    let mut profiles = Vec::with_capacity(dataset.columns.len().max(mappings.len()));
    let mut mapped_columns = BTreeSet::new();
    for mapping in mappings {
        let column = MappedColumn::from_mapping(mapping);
        profiles.push(profile_mapped_column(dataset, &column, options));
        mapped_columns.insert(mapping.source_column.as_str());
    }
    for column in &dataset.columns {
        if mapped_columns.contains(column.as_str()) {
            continue;
        }
        profiles.push(profile_unmapped_column(dataset, column, options));
    }
    debug!(profiles = profiles.len(), "profiled dataset");
    profiles
}

/// Full-detail profile of a mapped column.
pub fn profile_mapped_column(
    dataset: &Dataset,
    column: &MappedColumn,
    options: &ProfileOptions,
) -> TabularProfile {
    let cells: Vec<Cow<'_, Value>> = dataset.rows.iter().map(|row| column.read(row)).collect();
    let values: Vec<&Value> = cells.iter().map(|cell| &**cell).collect();

    let sample: Vec<&Value> = values
        .iter()
        .copied()
        .filter(|value| !value.is_null())
        .take(options.sample_size)
        .collect();
    let data_type = infer_type(&sample);
    let numeric_stats = if data_type == DataType::Number {
        numeric_stats(&values)
    } else {
        None
    };
    build_profile(
        &column.column,
        &column.name,
        &values,
        data_type,
        numeric_stats,
        options,
    )
}

/// Reduced-detail profile of a column without a mapping.
pub fn profile_unmapped_column(
    dataset: &Dataset,
    column: &str,
    options: &ProfileOptions,
) -> TabularProfile {
    let values = dataset.column_values(column);
    build_profile(column, column, &values, DataType::Mixed, None, options)
}

fn build_profile(
    column: &str,
    display_name: &str,
    values: &[&Value],
    data_type: DataType,
    numeric_stats: Option<NumericStats>,
    options: &ProfileOptions,
) -> TabularProfile {
    let null_count = values.iter().filter(|value| value.is_null()).count();
    let frequencies = value_frequencies(values);
    let counts = ColumnCounts {
        null_count,
        unique_count: frequencies.len(),
        total_count: values.len(),
    };
    let top_values = (frequencies.len() <= options.top_values_limit).then(|| top_values(frequencies));
    let quality = score_quality(values, data_type, counts, numeric_stats.as_ref());
    debug!(
        column,
        %data_type,
        score = quality.score,
        issues = quality.issues.len(),
        "profiled column"
    );
    TabularProfile {
        column: column.to_string(),
        display_name: display_name.to_string(),
        data_type,
        null_count,
        unique_count: counts.unique_count,
        total_count: counts.total_count,
        top_values,
        numeric_stats,
        quality_score: quality.score,
        quality_issues: quality.issues,
    }
}

/// Distinct non-null values with counts, in order of first occurrence.
pub fn value_frequencies(values: &[&Value]) -> Vec<(String, usize)> {
    let mut index: BTreeMap<String, usize> = BTreeMap::new();
    let mut frequencies: Vec<(String, usize)> = Vec::new();
    for value in values.iter().filter(|value| !value.is_null()) {
        let key = value.to_key();
        match index.get(&key) {
            Some(&slot) => frequencies[slot].1 += 1,
            None => {
                index.insert(key.clone(), frequencies.len());
                frequencies.push((key, 1));
            }
        }
    }
    frequencies
}

/// Sort frequencies by descending count. The sort is stable, so ties keep
/// first-occurrence order.
pub fn top_values(mut frequencies: Vec<(String, usize)>) -> Vec<TopValue> {
    frequencies.sort_by(|a, b| b.1.cmp(&a.1));
    frequencies
        .into_iter()
        .map(|(value, count)| TopValue { value, count })
        .collect()
}

/// Statistics over the numeric cells. `None` when no cell is numeric.
///
/// The median is the element at index `n / 2` of the sorted values, so even
/// counts take the upper of the two middle elements. The standard deviation
/// is the population form (divides by `n`).
pub fn numeric_stats(values: &[&Value]) -> Option<NumericStats> {
    let mut numbers: Vec<f64> = values.iter().filter_map(|value| value.as_f64()).collect();
    if numbers.is_empty() {
        return None;
    }
    numbers.sort_by(f64::total_cmp);
    let count = numbers.len() as f64;
    let mean = numbers.iter().sum::<f64>() / count;
    let variance = numbers
        .iter()
        .map(|number| (number - mean).powi(2))
        .sum::<f64>()
        / count;
    Some(NumericStats {
        min: numbers[0],
        max: numbers[numbers.len() - 1],
        mean,
        median: numbers[numbers.len() / 2],
        std_dev: variance.sqrt(),
    })
}
