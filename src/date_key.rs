use chrono::{DateTime, Local};

/// Calendar-day key (`YYYY-MM-DD`) of a local timestamp.
pub fn day_key(timestamp: &DateTime<Local>) -> String {
    timestamp.date_naive().to_string()
}

/// Returns the current local date key as `YYYY-MM-DD`.
pub fn today_key() -> String {
    day_key(&Local::now())
}
