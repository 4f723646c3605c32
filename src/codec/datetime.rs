//! Date/time wire profiles
//!
//! - date: `YYYY-MM-DD`
//! - date-time: `YYYY-MM-DDTHH:MM:SS+hhmm` (numeric offset, no colon, no
//!   fractional seconds)

use chrono::{DateTime, FixedOffset, NaiveDate};

/// `strftime` pattern of the date profile.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// `strftime` pattern of the date-time profile.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Renders a calendar date.
pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Renders a timestamp; sub-second precision is truncated.
pub fn format_date_time(dt: &DateTime<FixedOffset>) -> String {
    dt.format(DATE_TIME_FORMAT).to_string()
}

/// Renders a date as a timestamp at midnight UTC.
pub fn format_date_as_date_time(date: &NaiveDate) -> String {
    format!("{}T00:00:00+0000", format_date(date))
}

/// Parses the date profile.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

/// Parses the date-time profile, or RFC 3339 as a fallback.
pub fn parse_date_time(s: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(s, DATE_TIME_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(s))
        .ok()
}
