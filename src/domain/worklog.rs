use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use regex::Regex;
use serde_json::{Map, Value, json};

static DURATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+(\.\d+)?\s*[wdhm]\s*)+$").expect("duration pattern is valid")
});

/// The shape accepted for manually entered start dates.
pub const STARTED_FORMAT: &str = "%Y/%m/%d";

/// The timestamp layout Jira expects in the `started` field.
const JIRA_TIMESTAMP: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// Time logged against an issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Worklog {
    /// Jira duration string, e.g. `3h` or `1d 4h`.
    pub time_spent: String,
    /// What the time was spent on.
    pub comment: String,
    /// When the work started. `None` lets Jira use the current time.
    pub started: Option<DateTime<Utc>>,
}

impl Worklog {
    /// The request body for the worklog endpoint.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut body = Map::new();
        body.insert("timeSpent".into(), json!(self.time_spent));
        body.insert("comment".into(), json!(self.comment));
        if let Some(started) = self.started {
            body.insert(
                "started".into(),
                json!(started.format(JIRA_TIMESTAMP).to_string()),
            );
        }
        Value::Object(body)
    }
}

/// Parses a `YYYY/MM/DD` start date as midnight UTC.
///
/// # Errors
///
/// Returns [`WorklogDateError`] for anything that is not a calendar date in
/// that shape.
pub fn parse_started(input: &str) -> Result<DateTime<Utc>, WorklogDateError> {
    let date = NaiveDate::parse_from_str(input.trim(), STARTED_FORMAT)
        .map_err(|_| WorklogDateError(input.to_string()))?;
    Ok(date.and_time(NaiveTime::MIN).and_utc())
}

/// Whether the input looks like a Jira duration (`3h`, `2d 4h`, `1.5h`).
#[must_use]
pub fn is_duration(input: &str) -> bool {
    DURATION_PATTERN.is_match(input)
}

/// A start date that is not in `YYYY/MM/DD` form.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid date format '{0}'. Please use YYYY/MM/DD.")]
pub struct WorklogDateError(String);

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};
    use test_case::test_case;

    use super::*;

    #[test]
    fn parses_started_date_as_utc_midnight() {
        let started = parse_started("2024/03/15").unwrap();
        assert_eq!(
            (started.year(), started.month(), started.day()),
            (2024, 3, 15)
        );
        assert_eq!((started.hour(), started.minute()), (0, 0));
    }

    #[test_case("2024-03-15"; "dashes")]
    #[test_case("15/03/2024"; "day first")]
    #[test_case("2024/13/01"; "month out of range")]
    #[test_case("2024/02/30"; "no such day")]
    #[test_case("yesterday"; "words")]
    fn rejects_other_shapes(input: &str) {
        let error = parse_started(input).unwrap_err();
        assert!(error.to_string().ends_with("Please use YYYY/MM/DD."));
    }

    #[test]
    fn body_without_start_date() {
        let worklog = Worklog {
            time_spent: "3h".into(),
            comment: "pairing".into(),
            started: None,
        };
        assert_eq!(
            worklog.to_json(),
            json!({ "timeSpent": "3h", "comment": "pairing" })
        );
    }

    #[test]
    fn body_with_jira_timestamp() {
        let worklog = Worklog {
            time_spent: "1d".into(),
            comment: "release".into(),
            started: Some(parse_started("2024/01/02").unwrap()),
        };
        assert_eq!(
            worklog.to_json()["started"],
            json!("2024-01-02T00:00:00.000+0000")
        );
    }

    #[test_case("3h", true; "hours")]
    #[test_case("2d 4h", true; "days and hours")]
    #[test_case("1.5h", true; "fractional")]
    #[test_case("1w2d", true; "no space")]
    #[test_case("", false; "empty")]
    #[test_case("three hours", false; "words")]
    #[test_case("3", false; "missing unit")]
    fn duration_shapes(input: &str, expected: bool) {
        assert_eq!(is_duration(input), expected);
    }
}
