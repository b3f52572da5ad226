//! Time utilities: elapsed-time formatting and timestamps.

use chrono::{DateTime, Local};
use std::time::Duration;

/// `HH:MM:SS` from whole seconds. Hours grow past 24, there is no day rollover.
pub fn format_hms(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Same as [`format_hms`], sub-second remainder truncated.
pub fn format_duration(d: Duration) -> String {
    format_hms(d.as_secs())
}

/// Timestamp stored in `logs.created_at` (second resolution).
pub fn db_timestamp(at: DateTime<Local>) -> String {
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}
