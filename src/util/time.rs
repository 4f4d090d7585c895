//! Timestamp helpers for the ISO-8601 strings kept in the store.
//!
//! Everything the bot writes is RFC 3339 in UTC. Older documents hold naive ISO timestamps
//! without an offset; those are read as UTC.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Display format for timestamps shown in embeds.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats a timestamp for storage.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339()
}

/// Parses a stored timestamp.
///
/// # Returns
/// - `Some(DateTime<Utc>)` - RFC 3339 or naive ISO-8601 timestamp
/// - `None` - Value is not a recognised timestamp
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(value) {
        return Some(at.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    /// Tests parsing the timestamp formats found in stored documents.
    ///
    /// Expected: RFC 3339 with offset and naive ISO with fraction both parse to UTC
    #[test]
    fn parses_stored_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 9, 18, 30, 0).unwrap();

        assert_eq!(parse_timestamp("2024-03-09T18:30:00+00:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-09T20:30:00+02:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-09T18:30:00"), Some(expected));
        assert_eq!(
            parse_timestamp("2024-03-09T18:30:00.250000"),
            Some(expected + chrono::Duration::milliseconds(250))
        );
    }

    /// Tests that malformed timestamps are reported as absent.
    ///
    /// Expected: None for garbage text
    #[test]
    fn malformed_timestamp_is_none() {
        assert_eq!(parse_timestamp("next tuesday"), None);
        assert_eq!(parse_timestamp(""), None);
    }
}
