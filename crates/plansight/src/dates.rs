//! Calendar date parsing for loosely formatted cell values.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

/// Output format for every date handed back to callers.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

// Cheap shape check before handing a value to chrono.
static DATE_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4}[-/]\d{1,2}[-/]\d{1,2}|\d{1,2}[/.]\d{1,2}[/.]\d{4}|\d{8})")
        .expect("Invalid regex: date shape")
});

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a value as a calendar date.
///
/// Accepts ISO dates, ISO/RFC 3339 datetimes (the time part is dropped),
/// `YYYY/MM/DD`, US `MM/DD/YYYY`, dotted `DD.MM.YYYY` and compact `YYYYMMDD`.
/// Anything else yields `None`.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() || !DATE_SHAPE.is_match(trimmed) {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt.date());
        }
    }

    if trimmed.len() == 8 && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return parse_compact(trimmed);
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}

/// Compact `YYYYMMDD` form.
fn parse_compact(value: &str) -> Option<NaiveDate> {
    let year = value.get(0..4)?.parse().ok()?;
    let month = value.get(4..6)?.parse().ok()?;
    let day = value.get(6..8)?.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Format a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_date("2025-01-05"), Some(ymd(2025, 1, 5)));
        assert_eq!(parse_date("  2025-01-05 "), Some(ymd(2025, 1, 5)));
    }

    #[test]
    fn test_parse_datetime_variants() {
        assert_eq!(parse_date("2025-03-01T10:30:00"), Some(ymd(2025, 3, 1)));
        assert_eq!(parse_date("2025-03-01 10:30:00"), Some(ymd(2025, 3, 1)));
        assert_eq!(parse_date("2025-03-01T23:30:00+02:00"), Some(ymd(2025, 3, 1)));
        assert_eq!(parse_date("2025-03-01T00:00:00.000Z"), Some(ymd(2025, 3, 1)));
    }

    #[test]
    fn test_parse_other_layouts() {
        assert_eq!(parse_date("2025/02/09"), Some(ymd(2025, 2, 9)));
        assert_eq!(parse_date("02/09/2025"), Some(ymd(2025, 2, 9)));
        assert_eq!(parse_date("09.02.2025"), Some(ymd(2025, 2, 9)));
        assert_eq!(parse_date("20250209"), Some(ymd(2025, 2, 9)));
    }

    #[test]
    fn test_reject_garbage() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date("2025-13-45"), None);
        assert_eq!(parse_date("SKU-001"), None);
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(ymd(2025, 1, 1)), "2025-01-01");
    }
}
