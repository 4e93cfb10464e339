//! Parsing of the textual timestamps found in wind-measurement tables.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Canonical format used when a timestamp is written back out (config dumps, logs).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// `%.f` also accepts values without a fractional part.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y", "%d/%m/%Y"];

/// Parses a timestamp string into a timezone-naive datetime.
///
/// Accepts ISO-like datetimes (space or `T` separated, optional seconds and
/// fractional seconds), a few day-first variants, RFC 3339 strings with an
/// offset (converted to UTC), and plain dates, which resolve to midnight.
///
/// Returns `None` when no known format matches. Callers decide how to report
/// that; nothing is silently coerced.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(parsed) = DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
    {
        return Some(parsed);
    }

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(with_offset.with_timezone(&Utc).naive_utc());
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn parses_common_datetime_layouts() {
        let expected = at(2023, 5, 19, 14, 30, 0);
        assert_eq!(parse_timestamp("2023-05-19 14:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2023-05-19T14:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2023-05-19 14:30"), Some(expected));
        assert_eq!(parse_timestamp("2023/05/19 14:30:00"), Some(expected));
        assert_eq!(parse_timestamp("19-05-2023 14:30"), Some(expected));
        assert_eq!(parse_timestamp("  2023-05-19 14:30:00 "), Some(expected));
    }

    #[test]
    fn fractional_seconds_are_kept() {
        let parsed = parse_timestamp("2023-05-19 14:30:00.250").unwrap();
        assert_eq!(parsed, at(2023, 5, 19, 14, 30, 0) + chrono::Duration::milliseconds(250));
    }

    #[test]
    fn offsets_are_normalized_to_utc() {
        assert_eq!(
            parse_timestamp("2023-05-19T14:30:00+02:00"),
            Some(at(2023, 5, 19, 12, 30, 0))
        );
    }

    #[test]
    fn plain_dates_resolve_to_midnight() {
        assert_eq!(parse_timestamp("2024-04-28"), Some(at(2024, 4, 28, 0, 0, 0)));
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("not a date"), None);
        assert_eq!(parse_timestamp("2023-13-01 00:00:00"), None);
        assert_eq!(parse_timestamp("2023-02-30"), None);
    }
}
