/// Utilities for date and time formatting
///
/// Timestamps from integrations arrive as RFC 3339 strings
use chrono::{DateTime, Local, TimeZone};

/// Placeholder for absent values in tables
pub const NOT_AVAILABLE: &str = "N/A";

/// Format an RFC 3339 timestamp as DD.MM.YYYY HH:MM:SS in local time
/// Example: "2024-03-15T14:02:26.123Z" -> "15.03.2024 17:02:26" (UTC+3)
pub fn format_timestamp(raw: Option<&str>) -> String {
    format_timestamp_in(raw, &Local)
}

/// Same as [`format_timestamp`] for an explicit time zone
pub fn format_timestamp_in<Tz>(raw: Option<&str>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let raw = match raw.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return NOT_AVAILABLE.to_string(),
    };
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.with_timezone(tz).format("%d.%m.%Y %H:%M:%S").to_string(),
        Err(_) => raw.to_string(),
    }
}
