//! Column type inference from a sample of non-null values.
//!
//! Priority order (first rule that every sampled value satisfies wins):
//! 1. Number
//! 2. Boolean
//! 3. Date
//! 4. String (fallback)

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use lens_model::{DataType, Value};

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Classify a sample of non-null values.
///
/// An empty sample yields [`DataType::String`]. Callers decide separately
/// whether a column is inferred at all; unmapped columns are reported as
/// [`DataType::Mixed`] without calling this.
pub fn infer_type(sample: &[&Value]) -> DataType {
    if sample.is_empty() {
        return DataType::String;
    }
    if sample.iter().all(|value| value.as_f64().is_some()) {
        DataType::Number
    } else if sample.iter().all(|value| value.as_bool().is_some()) {
        DataType::Boolean
    } else if sample.iter().all(|value| is_date(value)) {
        DataType::Date
    } else {
        DataType::String
    }
}

/// True for text cells in a recognized date or datetime layout.
pub fn is_date(value: &Value) -> bool {
    value.as_text().is_some_and(|text| parse_date(text).is_some())
}

/// Parse common date and datetime layouts (RFC 3339, RFC 2822, ISO 8601
/// without offset, US and European numeric dates, month names).
pub fn parse_date(text: &str) -> Option<NaiveDateTime> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.naive_utc());
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(parsed.naive_utc());
    }
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(parsed);
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}
