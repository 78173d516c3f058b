//! Human-readable elapsed time between two captures.

use crate::model::parse_timestamp;

/// Reported when either timestamp is missing or unparsable.
pub const UNKNOWN_ELAPSED: &str = "unknown";

/// Format the time between two raw timestamps.
///
/// `N minute(s)` below one hour, otherwise `H hour(s), M minute(s)`. Minutes
/// are truncated toward zero.
#[must_use]
pub fn format_elapsed(previous: Option<&str>, current: Option<&str>) -> String {
    let (Some(previous), Some(current)) = (
        previous.and_then(parse_timestamp),
        current.and_then(parse_timestamp),
    ) else {
        return UNKNOWN_ELAPSED.to_string();
    };

    let minutes = (current - previous).num_minutes();
    if minutes < 60 {
        return plural(minutes, "minute");
    }
    format!(
        "{}, {}",
        plural(minutes / 60, "hour"),
        plural(minutes % 60, "minute")
    )
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("{count} {unit}")
    } else {
        format!("{count} {unit}s")
    }
}
