//! Conversions between the free-text form fields and the typed config
//! values. Nothing here fails: text that doesn't parse degrades to a
//! fallback and the backend stays the authority on what is acceptable.

use std::collections::BTreeSet;

pub fn parse_cadence_list(raw: &str) -> Vec<u32> {
    raw.split(',')
        .filter_map(|segment| segment.trim().parse::<u32>().ok())
        .collect()
}

pub fn format_cadence_list(values: &[u32]) -> String {
    values
        .iter()
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Reads a numeric field. Non-numeric text maps to `default`; numbers are
/// kept as given even when they fall outside the field's declared range.
pub fn clamp_attempts(raw: &str, default: i32) -> i32 {
    raw.trim().parse::<i32>().unwrap_or(default)
}

pub fn parse_label_set(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(|segment| segment.trim())
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.to_owned())
        .collect()
}

pub fn format_label_set<'a>(labels: impl IntoIterator<Item = &'a String>) -> String {
    labels
        .into_iter()
        .map(|label| label.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
