//! Header row normalization.

use std::collections::BTreeMap;

/// Trim, strip a UTF-8 BOM, and collapse internal whitespace runs.
pub(crate) fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize a header row into unique column names.
///
/// Blank headers become `column_<n>` (1-based position). Repeated names get
/// a `_2`, `_3`, … suffix so every column stays addressable.
pub(crate) fn build_columns<'a>(raw: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen: BTreeMap<String, usize> = BTreeMap::new();
    let mut columns = Vec::new();
    for (idx, header) in raw.into_iter().enumerate() {
        let mut name = normalize_header(header);
        if name.is_empty() {
            name = format!("column_{}", idx + 1);
        }
        let occurrences = seen.entry(name.clone()).or_insert(0);
        *occurrences += 1;
        if *occurrences > 1 {
            name = format!("{name}_{occurrences}");
        }
        columns.push(name);
    }
    columns
}
