//! Parsing of textual timestamps into milliseconds since the Unix epoch.
//!
//! Accepted forms are the ones found in `when` elements of map files: full RFC 3339 date-times, date-times without a
//! zone (interpreted as UTC), dates, year-months and bare years.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const NAIVE_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses a timestamp string. Returns `None` if the string is not in any of the supported formats.
pub fn parse_timestamp(value: &str) -> Option<i64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(date_time) = DateTime::parse_from_rfc3339(value) {
        return Some(date_time.timestamp_millis());
    }

    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(date_time) = NaiveDateTime::parse_from_str(value, format) {
            return Some(date_time.and_utc().timestamp_millis());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date_millis(date);
    }

    parse_partial_date(value)
}

fn parse_partial_date(value: &str) -> Option<i64> {
    let (year, month) = match value.split_once('-') {
        Some((year, month)) => (year, month.parse::<u32>().ok()?),
        None => (value, 1),
    };

    if year.len() != 4 {
        return None;
    }

    let year = year.parse::<i32>().ok()?;
    date_millis(NaiveDate::from_ymd_opt(year, month, 1)?)
}

fn date_millis(date: NaiveDate) -> Option<i64> {
    date.and_hms_opt(0, 0, 0)
        .map(|date_time| date_time.and_utc().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_date_time() {
        assert_eq!(parse_timestamp("1970-01-01T00:00:01Z"), Some(1000));
        assert_eq!(parse_timestamp("1970-01-01T01:00:00+01:00"), Some(0));
        assert_eq!(parse_timestamp("1970-01-01T00:00:00.250"), Some(250));
        assert_eq!(parse_timestamp("1970-01-02 00:00:00"), Some(86_400_000));
    }

    #[test]
    fn partial_dates() {
        assert_eq!(parse_timestamp("1970-01-02"), Some(86_400_000));
        assert_eq!(parse_timestamp("1970-02"), Some(31 * 86_400_000));
        assert_eq!(parse_timestamp("1971"), Some(365 * 86_400_000));
    }

    #[test]
    fn malformed() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp("1970-13"), None);
        assert_eq!(parse_timestamp("70"), None);
    }
}
