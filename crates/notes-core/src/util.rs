//! Shared utility functions used across multiple modules.

use chrono::{DateTime, Local, TimeZone, Utc};

/// Normalize optional text by trimming whitespace and removing empties.
///
/// Returns `None` when the input is `None` or the trimmed value is empty.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    let value = value?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Check if a string starts with `http://` or `https://`.
pub fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

/// Current Unix timestamp in milliseconds.
pub fn unix_millis_now() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert a Unix millisecond timestamp into local time.
///
/// Out-of-range values fall back to the Unix epoch.
pub fn local_datetime(unix_ms: i64) -> DateTime<Local> {
    Local
        .timestamp_millis_opt(unix_ms)
        .single()
        .unwrap_or_else(|| DateTime::<Utc>::UNIX_EPOCH.with_timezone(&Local))
}

/// Format a timestamp as a `dd/mm/yyyy` date.
pub fn format_short_date(unix_ms: i64) -> String {
    local_datetime(unix_ms).format("%d/%m/%Y").to_string()
}
