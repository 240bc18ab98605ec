//! Wall-clock helpers for hosts. Core logic takes `now_ms` explicitly.

use chrono::{Local, NaiveDateTime, TimeZone, Utc};

/// Current instant as Unix epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Parses a `YYYY-MM-DDTHH:MM` (optionally `:SS`) local date-time, the shape
/// produced by date-time pickers, into epoch milliseconds.
///
/// Returns `None` for malformed input and for local times that do not exist
/// (DST gaps). Ambiguous local times resolve to the earlier instant.
pub fn parse_local_datetime(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    let naive = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S"))
        .ok()?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|instant| instant.timestamp_millis())
}
