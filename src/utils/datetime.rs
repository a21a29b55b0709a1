//! Date and time helpers
//!
//! Due dates travel over the wire as `YYYY-MM-DD` strings and timestamps as
//! ISO 8601. This module parses both and produces the short human labels shown
//! next to tasks and notes ("today", "in 3 days", "Jan 15").

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, TimeZone};

/// Calendar date format used by the API for due dates
pub const API_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a date string in YYYY-MM-DD format to NaiveDate
pub fn parse_date(date_str: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(date_str.trim(), API_DATE_FORMAT)
}

/// Format a NaiveDate to YYYY-MM-DD string
pub fn format_ymd(d: NaiveDate) -> String {
    d.format(API_DATE_FORMAT).to_string()
}

/// Current local calendar date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a server timestamp.
///
/// Accepts RFC 3339 (`2025-01-15T14:30:00Z`), naive ISO 8601
/// (`2025-01-15T14:30:00[.ffffff]`) and the space separated form some
/// serializers emit. Naive values are read as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<chrono::Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&chrono::Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| chrono::Utc.from_utc_datetime(&naive))
}

/// Format a server timestamp in local time, falling back to the raw value
pub fn format_timestamp(value: &str) -> String {
    match parse_timestamp(value) {
        Some(dt) => dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        None => value.to_string(),
    }
}

/// Human-readable label for `date` relative to `today`
pub fn format_human_date_from(date: NaiveDate, today: NaiveDate) -> String {
    let days_diff = (date - today).num_days();

    match days_diff {
        -1 => "yesterday".to_string(),
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        diff if diff > 1 && diff <= 30 => format!("in {} days", diff),
        diff if (-30..-1).contains(&diff) => format!("{} days ago", -diff),
        _ => {
            if date.year() == today.year() {
                date.format("%b %d").to_string()
            } else {
                date.format("%b %d, %Y").to_string()
            }
        }
    }
}

/// Human-readable label for a YYYY-MM-DD string, relative to the local date.
/// Unparseable input is returned unchanged.
pub fn format_human_date(date_str: &str) -> String {
    match parse_date(date_str) {
        Ok(date) => format_human_date_from(date, today()),
        Err(_) => date_str.to_string(),
    }
}
