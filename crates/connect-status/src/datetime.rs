//! Date rendering for status rows.
//!
//! The backend stores timestamps as ISO 8601 strings, usually RFC 3339 with a
//! `Z` offset. Rows show the UTC calendar date as `MM/DD/YYYY`; anything that
//! does not parse renders as `N/A` instead of failing the derivation.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use connect_model::NOT_AVAILABLE;

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Parse a backend timestamp to its UTC calendar date.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc).date_naive());
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed.date());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Render a timestamp as `MM/DD/YYYY`, or `N/A` when it cannot be parsed.
pub fn format_mdy(value: &str) -> String {
    parse_calendar_date(value)
        .map(|date| date.format("%m/%d/%Y").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// [`format_mdy`] over an optional value.
pub fn format_mdy_opt(value: Option<&str>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), format_mdy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_normalized_to_utc() {
        assert_eq!(format_mdy("2024-01-02T23:30:00-05:00"), "01/03/2024");
        assert_eq!(format_mdy("2024-01-02T00:00:00.000Z"), "01/02/2024");
    }

    #[test]
    fn naive_forms_are_accepted() {
        assert_eq!(format_mdy("2023-11-05T08:15:00"), "11/05/2023");
        assert_eq!(format_mdy("2023-11-05 08:15:00"), "11/05/2023");
        assert_eq!(format_mdy(" 2023-11-05 "), "11/05/2023");
    }

    #[test]
    fn garbage_is_not_available() {
        assert_eq!(format_mdy(""), NOT_AVAILABLE);
        assert_eq!(format_mdy("yesterday"), NOT_AVAILABLE);
        assert_eq!(format_mdy("2024-13-01"), NOT_AVAILABLE);
        assert_eq!(format_mdy_opt(None), NOT_AVAILABLE);
    }
}
