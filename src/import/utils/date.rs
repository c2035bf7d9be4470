use once_cell::sync::Lazy;
use regex::Regex;

static LEADING_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{4}-\d{2}-\d{2})").unwrap());

/// Returns the `YYYY-MM-DD` prefix of a timestamp cell, dropping any time of day.
///
/// Only the shape is checked, not whether the date exists.
pub fn leading_date(cell: &str) -> Option<&str> {
    LEADING_DATE
        .captures(cell)
        .and_then(|captures| captures.get(1))
        .map(|date| date.as_str())
}
