//! Human-readable durations and countdowns

use crate::types::Timestamp;

pub const SECONDS_PER_MINUTE: u64 = 60;
pub const SECONDS_PER_HOUR: u64 = 3_600;
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Subscription lengths offered at checkout
pub const DURATION_PRESETS: [(&str, u64); 5] = [
    ("1 Hour", 3_600),
    ("1 Day", 86_400),
    ("1 Week", 604_800),
    ("1 Month", 2_592_000),
    ("3 Months", 7_776_000),
];

fn plural(count: u64, unit: &str) -> String {
    if count == 1 {
        format!("{count} {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

/// Largest whole unit only: `90000 -> "1 day"`, `59 -> "59 seconds"`
pub fn format_duration(seconds: u64) -> String {
    if seconds >= SECONDS_PER_DAY {
        plural(seconds / SECONDS_PER_DAY, "day")
    } else if seconds >= SECONDS_PER_HOUR {
        plural(seconds / SECONDS_PER_HOUR, "hour")
    } else if seconds >= SECONDS_PER_MINUTE {
        plural(seconds / SECONDS_PER_MINUTE, "minute")
    } else {
        plural(seconds, "second")
    }
}

/// `"{h}h {m}m"`, or just `"{m}m"` under an hour
pub fn format_hours_minutes(seconds: u64) -> String {
    let hours = seconds / SECONDS_PER_HOUR;
    let minutes = (seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Remaining time on a membership; an `expiry` of zero means none was ever bought
pub fn format_time_remaining(expiry: Timestamp, now: Timestamp) -> String {
    if expiry == 0 {
        return "N/A".to_string();
    }
    if expiry <= now {
        return "Expired".to_string();
    }
    let remaining = expiry - now;
    let days = remaining / SECONDS_PER_DAY;
    let hours = (remaining % SECONDS_PER_DAY) / SECONDS_PER_HOUR;
    let minutes = (remaining % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;

    if days > 0 {
        format!("{days}d {hours}h remaining")
    } else if hours > 0 {
        format!("{hours}h {minutes}m remaining")
    } else {
        format!("{minutes}m remaining")
    }
}

/// Second-resolution countdown to the end of an active rental
pub fn format_countdown(end: Timestamp, now: Timestamp) -> String {
    if end <= now {
        return "Expired".to_string();
    }
    let diff = end - now;
    let days = diff / SECONDS_PER_DAY;
    let hours = (diff % SECONDS_PER_DAY) / SECONDS_PER_HOUR;
    let minutes = (diff % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let seconds = diff % SECONDS_PER_MINUTE;

    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}
