//! Formatting helpers shared by the report renderers and the CLI.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// Format a timestamp as a wall-clock time in `tz` (e.g., "14:05:09").
pub fn format_time_in<Tz: TimeZone>(ts: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    ts.with_timezone(tz).format("%H:%M:%S").to_string()
}

/// Format a date for report titles (e.g., "Monday, January 15, 2024").
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Format an hour count with one decimal place (e.g., "7.5h").
pub fn format_hours(hours: f64) -> String {
    format!("{:.1}h", hours)
}
