//! Column quality scoring.
//!
//! A column scores out of 100 across three independently weighted
//! components:
//!
//! | Component    | Weight | Deductions                                   |
//! |--------------|--------|----------------------------------------------|
//! | Completeness | 40     | proportional to the share of null cells      |
//! | Consistency  | 30     | all 30 for a single repeated value; 15 for outliers |
//! | Validity     | 30     | 10 for mixed upper/lower case text           |
//!
//! Every finding is also reported as a [`QualityIssue`]. Nothing here fails.

use lens_model::{DataType, IssueKind, IssueSeverity, NumericStats, QualityIssue, Value};

pub const COMPLETENESS_WEIGHT: f64 = 40.0;
pub const CONSISTENCY_WEIGHT: f64 = 30.0;
pub const VALIDITY_WEIGHT: f64 = 30.0;

/// Completeness below this rate raises `high_nulls`.
const HIGH_NULLS_RATE: f64 = 0.8;
/// Completeness below this rate makes `high_nulls` an error.
const HIGH_NULLS_ERROR_RATE: f64 = 0.5;
const OUTLIER_SIGMAS: f64 = 3.0;
/// Outliers must exceed this share of numeric values to count.
const OUTLIER_SHARE: f64 = 0.05;
const OUTLIER_PENALTY: f64 = 15.0;
/// Case checks only run on string columns with more non-null values than this.
const CASE_CHECK_MIN_VALUES: usize = 10;
const CASE_IMBALANCE_SHARE: f64 = 0.3;
const CASE_PENALTY: f64 = 10.0;

/// Counts the scorer needs about a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnCounts {
    pub null_count: usize,
    pub unique_count: usize,
    pub total_count: usize,
}

impl ColumnCounts {
    pub fn non_null(&self) -> usize {
        self.total_count.saturating_sub(self.null_count)
    }
}

/// Per-component points before rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub completeness: f64,
    pub consistency: f64,
    pub validity: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.completeness + self.consistency + self.validity
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QualityReport {
    /// Rounded sum of the breakdown. The weights keep it within 0 to 100.
    pub score: u8,
    pub breakdown: ScoreBreakdown,
    pub issues: Vec<QualityIssue>,
}

/// Score one column.
///
/// `values` holds every cell of the column (one per row). `stats` enables
/// outlier detection and is only passed for numeric columns.
pub fn score_quality(
    values: &[&Value],
    data_type: DataType,
    counts: ColumnCounts,
    stats: Option<&NumericStats>,
) -> QualityReport {
    let mut issues = Vec::new();
    let completeness = completeness(counts, &mut issues);
    let consistency = consistency(values, counts, stats, &mut issues);
    let validity = validity(values, data_type, counts, &mut issues);
    let breakdown = ScoreBreakdown {
        completeness,
        consistency,
        validity,
    };
    let score = breakdown.total().round() as u8;
    QualityReport {
        score,
        breakdown,
        issues,
    }
}

fn completeness(counts: ColumnCounts, issues: &mut Vec<QualityIssue>) -> f64 {
    if counts.total_count == 0 {
        return 0.0;
    }
    let rate = counts.non_null() as f64 / counts.total_count as f64;
    if rate < HIGH_NULLS_RATE {
        let severity = if rate < HIGH_NULLS_ERROR_RATE {
            IssueSeverity::Error
        } else {
            IssueSeverity::Warning
        };
        issues.push(
            QualityIssue::new(
                IssueKind::HighNulls,
                severity,
                format!("{:.1}% of values are missing", (1.0 - rate) * 100.0),
            )
            .with_count(counts.null_count as u64),
        );
    }
    COMPLETENESS_WEIGHT * rate
}

fn consistency(
    values: &[&Value],
    counts: ColumnCounts,
    stats: Option<&NumericStats>,
    issues: &mut Vec<QualityIssue>,
) -> f64 {
    if counts.unique_count == 1 && counts.total_count > 1 {
        issues.push(
            QualityIssue::new(
                IssueKind::LowCardinality,
                IssueSeverity::Warning,
                "All non-null values are identical",
            )
            .with_count(counts.non_null() as u64),
        );
        return 0.0;
    }
    let mut score = CONSISTENCY_WEIGHT;
    if let Some(stats) = stats {
        let numbers: Vec<f64> = values.iter().filter_map(|value| value.as_f64()).collect();
        let upper = stats.mean + OUTLIER_SIGMAS * stats.std_dev;
        let lower = stats.mean - OUTLIER_SIGMAS * stats.std_dev;
        let outliers = numbers
            .iter()
            .filter(|&&number| number > upper || number < lower)
            .count();
        if outliers > 0 && outliers as f64 / numbers.len() as f64 > OUTLIER_SHARE {
            score -= OUTLIER_PENALTY;
            issues.push(
                QualityIssue::new(
                    IssueKind::Outliers,
                    IssueSeverity::Info,
                    format!("{outliers} values lie more than 3 standard deviations from the mean"),
                )
                .with_count(outliers as u64),
            );
        }
    }
    score
}

fn validity(
    values: &[&Value],
    data_type: DataType,
    counts: ColumnCounts,
    issues: &mut Vec<QualityIssue>,
) -> f64 {
    let mut score = VALIDITY_WEIGHT;
    let non_null = counts.non_null();
    if data_type != DataType::String || non_null <= CASE_CHECK_MIN_VALUES {
        return score;
    }
    let mut upper = 0usize;
    let mut lower = 0usize;
    for value in values.iter().filter(|value| !value.is_null()) {
        let text = value.to_key();
        let uppercased = text.to_uppercase();
        let lowercased = text.to_lowercase();
        // Text without cased letters is neither.
        if uppercased == lowercased {
            continue;
        }
        if text == uppercased {
            upper += 1;
        } else if text == lowercased {
            lower += 1;
        }
    }
    if upper > 0 && lower > 0 {
        let imbalance = upper.abs_diff(lower) as f64 / non_null as f64;
        if imbalance > CASE_IMBALANCE_SHARE {
            score -= CASE_PENALTY;
            issues.push(
                QualityIssue::new(
                    IssueKind::FormatInconsistency,
                    IssueSeverity::Info,
                    format!(
                        "Inconsistent casing: {upper} upper-case and {lower} lower-case values"
                    ),
                )
                .with_count((upper + lower) as u64),
            );
        }
    }
    score
}
