use std::time::Duration;

/// One accepted sample is attributed this many seconds of usage.
pub const SECS_PER_SAMPLE: i64 = 1;

/// Sampling period of the tracker loop.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Separator of the nested report's key space; never appears in an app or title key.
pub const KEY_SEPARATOR: char = '.';

/// Stored in place of an empty application name or window title.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Maximum stored window title length, in characters
pub const MAX_WINDOW_TITLE_CHARS: usize = 512;

/// Maximum application name length, in characters
pub const MAX_APP_NAME_CHARS: usize = 512;

/// Default focus session length in minutes
pub const DEFAULT_FOCUS_MINUTES: i32 = 25;

/// Maximum focus session length in minutes (24 hours)
pub const MAX_FOCUS_MINUTES: i32 = 24 * 60;

/// Bridge messages larger than this are rejected (1 MiB)
pub const MAX_MESSAGE_SIZE: usize = 1024 * 1024;
