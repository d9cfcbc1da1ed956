//! Timestamp parsing and display.
//!
//! Status page timestamps arrive as RFC 3339 strings and are shown in the
//! local time zone. A value that does not parse is replaced by a caller
//! supplied fallback and logged, so one bad field never breaks a render.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use tracing::warn;

/// Display format for timestamps, e.g. "Jan 1, 2024, 00:00:00".
const DISPLAY_FORMAT: &str = "%b %-d, %Y, %H:%M:%S";

/// Naive layouts accepted when the value carries no offset (read as UTC).
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse timestamps like "2024-01-01T00:00:00Z", "2024-01-01T00:00:00.000-07:00",
/// "2024-01-01T00:00:00" or "2024-01-01".
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Render a raw timestamp in local time, or `fallback` if it does not parse.
pub fn format_timestamp(raw: &str, fallback: &str) -> String {
    format_timestamp_in(raw, fallback, "timestamp")
}

/// Like [`format_timestamp`], naming `context` in the warning on failure.
pub fn format_timestamp_in(raw: &str, fallback: &str, context: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.with_timezone(&Local).format(DISPLAY_FORMAT).to_string(),
        None => {
            warn!(context, raw, "invalid date");
            fallback.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rfc3339_utc() {
        let dt = parse_timestamp("2024-01-01T00:00:00Z").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_parse_rfc3339_offset() {
        let dt = parse_timestamp("2024-03-05T10:15:30.123-07:00").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-03-05 17:15:30");
    }

    #[test]
    fn test_parse_naive_and_date_only() {
        let naive = parse_timestamp("2024-03-05T10:15:30").unwrap();
        assert_eq!(naive.format("%H:%M").to_string(), "10:15");

        let date = parse_timestamp("2024-03-05").unwrap();
        assert_eq!(date.format("%Y-%m-%d %H:%M").to_string(), "2024-03-05 00:00");
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("not-a-date").is_none());
        assert!(parse_timestamp("2024-13-45T99:99:99Z").is_none());
    }

    #[test]
    fn test_format_fallback() {
        assert_eq!(format_timestamp("not-a-date", "N/A"), "N/A");
        assert_eq!(format_timestamp("", "Loading..."), "Loading...");
    }

    #[test]
    fn test_format_valid() {
        let rendered = format_timestamp("2024-01-01T00:00:00Z", "N/A");
        assert!(!rendered.is_empty());
        assert_ne!(rendered, "N/A");
        // Local offset can move the date across a year boundary.
        assert!(rendered.contains("2024") || rendered.contains("2023"));
    }

    #[test]
    fn test_format_in_context() {
        assert_eq!(format_timestamp_in("garbage", "N/A", "component: LAX (LAX)"), "N/A");
    }
}
