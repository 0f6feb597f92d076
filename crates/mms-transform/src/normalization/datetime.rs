//! Timestamp parsing.
//!
//! Scraped listings carry dates in whatever format the source site uses.
//! Accepted inputs, tried in order:
//!
//! 1. RFC 3339 with offset (`2024-03-01T09:30:00+09:00`), normalized to UTC
//! 2. Date-time without offset (`2024-03-01 09:30:00`, `2024-03-01T09:30`)
//! 3. Date only (`2024-03-01`, `2024.03.01`, `2024/03/01`, `20240301`), at midnight
//! 4. Unix epoch seconds (`1709251200`)

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y.%m.%d %H:%M:%S",
    "%Y.%m.%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y.%m.%d", "%Y/%m/%d"];

/// Parse a timestamp string. Returns `None` when no supported format matches.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim().trim_end_matches('.');
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.naive_utc());
    }

    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(parsed);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(parsed.and_time(NaiveTime::MIN));
        }
    }

    if !trimmed.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    // Eight digits are a compact date, never epoch seconds.
    if trimmed.len() == 8 {
        return parse_compact_date(trimmed).map(|date| date.and_time(NaiveTime::MIN));
    }
    if trimmed.len() > 8 {
        return trimmed.parse::<i64>().ok().and_then(from_epoch_seconds);
    }
    None
}

/// `YYYYMMDD`
fn parse_compact_date(digits: &str) -> Option<NaiveDate> {
    let year = digits.get(0..4)?.parse().ok()?;
    let month = digits.get(4..6)?.parse().ok()?;
    let day = digits.get(6..8)?.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Convert Unix epoch seconds to a UTC timestamp.
pub fn from_epoch_seconds(seconds: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp(seconds, 0).map(|parsed| parsed.naive_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd_hms(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn parses_rfc3339_to_utc() {
        assert_eq!(
            parse_timestamp("2024-03-01T09:30:00+09:00"),
            Some(ymd_hms(2024, 3, 1, 0, 30, 0))
        );
        assert_eq!(
            parse_timestamp("2024-03-01T09:30:00Z"),
            Some(ymd_hms(2024, 3, 1, 9, 30, 0))
        );
    }

    #[test]
    fn parses_naive_datetimes() {
        assert_eq!(
            parse_timestamp("2024-03-01 09:30:00"),
            Some(ymd_hms(2024, 3, 1, 9, 30, 0))
        );
        assert_eq!(
            parse_timestamp("2024-03-01T09:30"),
            Some(ymd_hms(2024, 3, 1, 9, 30, 0))
        );
    }

    #[test]
    fn parses_dates_at_midnight() {
        let expected = Some(ymd_hms(2024, 3, 1, 0, 0, 0));
        assert_eq!(parse_timestamp("2024-03-01"), expected);
        assert_eq!(parse_timestamp("2024.03.01"), expected);
        assert_eq!(parse_timestamp("2024.03.01."), expected);
        assert_eq!(parse_timestamp("2024/03/01"), expected);
        assert_eq!(parse_timestamp("20240301"), expected);
    }

    #[test]
    fn parses_epoch_seconds() {
        assert_eq!(
            parse_timestamp("1709251200"),
            Some(ymd_hms(2024, 3, 1, 0, 0, 0))
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp("2024-13-45"), None);
        assert_eq!(parse_timestamp(""), None);
    }
}
