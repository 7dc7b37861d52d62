//! Durations expressed in working time.
//!
//! Jira counts estimates in business units: a day is eight hours and a week is
//! five days.

/// Seconds in a minute.
pub const MINUTE: i64 = 60;
/// Seconds in an hour.
pub const HOUR: i64 = 60 * MINUTE;
/// Seconds in a working day.
pub const DAY: i64 = 8 * HOUR;
/// Seconds in a working week.
pub const WEEK: i64 = 5 * DAY;

const UNITS: [(i64, &str); 4] = [(WEEK, "w"), (DAY, "d"), (HOUR, "h"), (MINUTE, "m")];

/// Formats a duration in business units, e.g. `1w 2d 3h 4m`.
///
/// Zero units are omitted and leftover seconds are dropped. Missing, zero,
/// negative and sub-minute durations all render as `0m`.
///
/// ```
/// use jirapilot::domain::business_time::format;
///
/// assert_eq!(format(Some(28_800)), "1d");
/// assert_eq!(format(Some(9_000)), "2h 30m");
/// assert_eq!(format(None), "0m");
/// ```
#[must_use]
pub fn format(seconds: Option<i64>) -> String {
    let mut remaining = seconds.unwrap_or(0);
    if remaining < MINUTE {
        return "0m".to_string();
    }

    let mut parts = Vec::new();
    for (size, suffix) in UNITS {
        let count = remaining / size;
        if count > 0 {
            parts.push(format!("{count}{suffix}"));
            remaining -= count * size;
        }
    }
    parts.join(" ")
}
