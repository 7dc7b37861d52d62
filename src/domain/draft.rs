//! Issues under construction.
//!
//! A [`DraftIssue`] collects what the user typed during the creation prompts.
//! [`DraftIssue::to_fields`] maps it onto the `fields` object Jira's create
//! endpoint expects, using the custom fields of the configured
//! [`TrackerMode`].

use chrono::{DateTime, Duration, NaiveDate, Utc};
use non_empty_string::NonEmptyString;
use serde_json::{Map, Value, json};

use super::{AccountRef, IssueKey, TrackerMode};

/// Issue types offered for top-level issues.
pub const ISSUE_TYPES: [&str; 4] = ["Story", "Task", "Bug", "Epic"];

/// Issue type name of sub-tasks.
pub const SUBTASK_TYPE: &str = "Sub-task";

/// Days from now a blank due date resolves to.
pub const DUE_DATE_OFFSET_DAYS: i64 = 30;

/// Date layout of the `duedate` field and of due-date input.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Whether a draft is a top-level issue or a sub-task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftKind {
    /// A top-level issue.
    Issue {
        /// Issue type name, e.g. `Story`.
        issue_type: String,
        /// Story point estimate.
        story_points: Option<u32>,
        /// Epic the issue belongs to.
        epic: Option<IssueKey>,
    },
    /// A sub-task of an existing issue. Sub-tasks live in their parent's
    /// project and never carry story points.
    SubTask {
        /// The parent issue.
        parent: IssueKey,
    },
}

/// An issue that has been described but not yet created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftIssue {
    /// One-line summary.
    pub summary: NonEmptyString,
    /// Longer description.
    pub description: NonEmptyString,
    /// Top-level issue or sub-task.
    pub kind: DraftKind,
    /// Priority name.
    pub priority: Option<String>,
    /// Labels, already merged from the selected categories.
    pub labels: Vec<String>,
    /// Original estimate as a Jira duration, e.g. `3h`.
    pub estimate: Option<String>,
    /// Due date.
    pub due_date: Option<NaiveDate>,
    /// Who the issue is assigned to, as entered (name or email).
    pub assignee: Option<String>,
    /// Watchers (only sent where the deployment supports it).
    pub watchers: Vec<String>,
}

impl DraftIssue {
    /// Starts a draft from its required text fields.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError`] when the summary or description is blank.
    pub fn new(summary: &str, description: &str, kind: DraftKind) -> Result<Self, DraftError> {
        let summary = non_blank(summary).ok_or(DraftError::EmptySummary)?;
        let description = non_blank(description).ok_or(DraftError::EmptyDescription)?;
        Ok(Self {
            summary,
            description,
            kind,
            priority: None,
            labels: Vec::new(),
            estimate: None,
            due_date: None,
            assignee: None,
            watchers: Vec::new(),
        })
    }

    /// The issue type name sent to Jira.
    #[must_use]
    pub fn issue_type(&self) -> &str {
        match &self.kind {
            DraftKind::Issue { issue_type, .. } => issue_type,
            DraftKind::SubTask { .. } => SUBTASK_TYPE,
        }
    }

    /// Builds the `fields` object of the create request.
    ///
    /// `project_key` is used for top-level issues; sub-tasks are created in
    /// their parent's project. `assignee` is the already resolved account
    /// reference, see [`crate::workflow::create`].
    #[must_use]
    pub fn to_fields(
        &self,
        project_key: &str,
        mode: TrackerMode,
        assignee: Option<&AccountRef>,
    ) -> Map<String, Value> {
        let mapping = mode.fields();
        let mut fields = Map::new();

        let project = match &self.kind {
            DraftKind::Issue { .. } => project_key,
            DraftKind::SubTask { parent } => parent.project(),
        };
        fields.insert("project".into(), json!({ "key": project }));
        fields.insert("summary".into(), json!(self.summary.as_str()));
        fields.insert("description".into(), json!(self.description.as_str()));
        fields.insert("issuetype".into(), json!({ "name": self.issue_type() }));

        match &self.kind {
            DraftKind::Issue {
                story_points, epic, ..
            } => {
                if let Some(points) = story_points {
                    fields.insert(mapping.story_points.into(), json!(points));
                }
                if let Some(epic) = epic {
                    let (field, value) = mapping.epic_entry(epic);
                    fields.insert(field.into(), value);
                }
            }
            DraftKind::SubTask { parent } => {
                fields.insert("parent".into(), json!({ "key": parent.as_str() }));
            }
        }

        if let Some(priority) = &self.priority {
            fields.insert("priority".into(), json!({ "name": priority }));
        }
        if !self.labels.is_empty() {
            fields.insert("labels".into(), json!(self.labels));
        }
        if let Some(estimate) = &self.estimate {
            fields.insert(
                "timetracking".into(),
                json!({ "originalEstimate": estimate }),
            );
        }
        if let Some(due) = self.due_date {
            fields.insert(
                "duedate".into(),
                json!(due.format(DUE_DATE_FORMAT).to_string()),
            );
        }
        if let Some(account) = assignee {
            fields.insert("assignee".into(), account.to_json());
        }
        if let Some((field, value)) = mapping.watchers_entry(&self.watchers) {
            fields.insert(field.into(), value);
        }

        fields
    }
}

fn non_blank(value: &str) -> Option<NonEmptyString> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    NonEmptyString::new(trimmed.to_string()).ok()
}

/// The due date used when none is entered: thirty days after `now`.
#[must_use]
pub fn default_due_date(now: DateTime<Utc>) -> NaiveDate {
    (now + Duration::days(DUE_DATE_OFFSET_DAYS)).date_naive()
}

/// Parses due-date input, defaulting blank input to [`default_due_date`].
///
/// # Errors
///
/// Returns [`DraftError::DueDate`] for non-blank input that is not
/// `YYYY-MM-DD`.
pub fn parse_due_date(input: &str, now: DateTime<Utc>) -> Result<NaiveDate, DraftError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(default_due_date(now));
    }
    NaiveDate::parse_from_str(input, DUE_DATE_FORMAT)
        .map_err(|_| DraftError::DueDate(input.to_string()))
}

/// Parses a story point estimate.
///
/// # Errors
///
/// Returns [`DraftError::StoryPoints`] unless the input is made of digits
/// only.
pub fn parse_story_points(input: &str) -> Result<u32, DraftError> {
    let input = input.trim();
    if input.is_empty() || !input.chars().all(|c| c.is_ascii_digit()) {
        return Err(DraftError::StoryPoints(input.to_string()));
    }
    input
        .parse()
        .map_err(|_| DraftError::StoryPoints(input.to_string()))
}

/// Invalid draft input.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DraftError {
    /// The summary is blank.
    #[error("Summary cannot be empty")]
    EmptySummary,

    /// The description is blank.
    #[error("Description cannot be empty")]
    EmptyDescription,

    /// The due date is not `YYYY-MM-DD`.
    #[error("Invalid due date '{0}'. Please use YYYY-MM-DD.")]
    DueDate(String),

    /// Story points are not a whole number.
    #[error("Story points must be a number, got '{0}'")]
    StoryPoints(String),
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use test_case::test_case;

    use super::*;

    fn story() -> DraftIssue {
        let mut draft = DraftIssue::new(
            "Export invoices",
            "CSV export for the billing page",
            DraftKind::Issue {
                issue_type: "Story".into(),
                story_points: Some(5),
                epic: None,
            },
        )
        .unwrap();
        draft.priority = Some("P1".into());
        draft.labels = vec!["customer".into(), "billing".into()];
        draft.estimate = Some("2d".into());
        draft.due_date = NaiveDate::from_ymd_opt(2024, 6, 1);
        draft.watchers = vec!["alice".into()];
        draft
    }

    fn subtask() -> DraftIssue {
        let mut draft = DraftIssue::new(
            "Write tests",
            "Cover the exporter",
            DraftKind::SubTask {
                parent: "OPS-12".parse().unwrap(),
            },
        )
        .unwrap();
        draft.estimate = Some("3h".into());
        draft
    }

    #[test]
    fn server_issue_fields() {
        let assignee = AccountRef::Name("jdoe".into());
        let fields = story().to_fields("SPF", TrackerMode::Server, Some(&assignee));

        assert_eq!(
            Value::Object(fields),
            json!({
                "project": { "key": "SPF" },
                "summary": "Export invoices",
                "description": "CSV export for the billing page",
                "issuetype": { "name": "Story" },
                "customfield_10002": 5,
                "priority": { "name": "P1" },
                "labels": ["customer", "billing"],
                "timetracking": { "originalEstimate": "2d" },
                "duedate": "2024-06-01",
                "assignee": { "name": "jdoe" },
                "customfield_44300": [{ "name": "alice" }]
            })
        );
    }

    #[test]
    fn cloud_issue_fields() {
        let assignee = AccountRef::AccountId("abc123".into());
        let mut draft = story();
        draft.kind = DraftKind::Issue {
            issue_type: "Task".into(),
            story_points: Some(3),
            epic: Some("SPF-1".parse().unwrap()),
        };
        let fields = draft.to_fields("SPF", TrackerMode::Cloud, Some(&assignee));

        assert_eq!(fields["customfield_10016"], json!(3));
        assert_eq!(fields["parent"], json!({ "key": "SPF-1" }));
        assert_eq!(fields["assignee"], json!({ "accountId": "abc123" }));
        assert!(!fields.contains_key("customfield_10002"));
        assert!(!fields.contains_key("customfield_44300"));
    }

    #[test]
    fn server_epic_goes_to_epic_link() {
        let mut draft = story();
        draft.kind = DraftKind::Issue {
            issue_type: "Story".into(),
            story_points: None,
            epic: Some("SPF-1".parse().unwrap()),
        };
        let fields = draft.to_fields("SPF", TrackerMode::Server, None);

        assert_eq!(fields["customfield_10008"], json!("SPF-1"));
        assert!(!fields.contains_key("parent"));
        assert!(!fields.contains_key("customfield_10002"));
        assert!(!fields.contains_key("assignee"));
    }

    #[test]
    fn subtask_uses_parent_project_and_no_story_points() {
        let fields = subtask().to_fields("SPF", TrackerMode::Server, None);

        assert_eq!(fields["project"], json!({ "key": "OPS" }));
        assert_eq!(fields["issuetype"], json!({ "name": "Sub-task" }));
        assert_eq!(fields["parent"], json!({ "key": "OPS-12" }));
        assert!(!fields.contains_key("customfield_10002"));
        assert!(!fields.contains_key("labels"));
    }

    #[test]
    fn subtask_of_lowercase_parent_targets_upper_case_project() {
        let parent = IssueKey::normalize("spf-12", "SPF").unwrap();
        let draft = DraftIssue::new("s", "d", DraftKind::SubTask { parent }).unwrap();
        let fields = draft.to_fields("SPF", TrackerMode::Server, None);

        assert_eq!(fields["project"], json!({ "key": "SPF" }));
        assert_eq!(fields["parent"], json!({ "key": "SPF-12" }));
    }

    #[test_case("", "Summary cannot be empty"; "empty summary")]
    #[test_case("   ", "Summary cannot be empty"; "blank summary")]
    fn blank_summary_rejected(summary: &str, message: &str) {
        let error = DraftIssue::new(summary, "d", DraftKind::SubTask {
            parent: "SPF-1".parse().unwrap(),
        })
        .unwrap_err();
        assert_eq!(error.to_string(), message);
    }

    #[test]
    fn blank_description_rejected() {
        let error = DraftIssue::new("s", " ", DraftKind::SubTask {
            parent: "SPF-1".parse().unwrap(),
        })
        .unwrap_err();
        assert_eq!(error, DraftError::EmptyDescription);
    }

    #[test]
    fn blank_due_date_is_thirty_days_out() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 23, 30, 0).unwrap();
        let due = parse_due_date("", now).unwrap();
        assert_eq!(due.format(DUE_DATE_FORMAT).to_string(), "2024-02-14");
        assert_eq!(due, default_due_date(now));
    }

    #[test]
    fn due_date_crosses_year_end() {
        let now = Utc.with_ymd_and_hms(2024, 12, 20, 0, 0, 0).unwrap();
        assert_eq!(
            parse_due_date("  ", now).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 19).unwrap()
        );
    }

    #[test]
    fn explicit_due_date() {
        let now = Utc::now();
        assert_eq!(
            parse_due_date("2030-05-04", now).unwrap(),
            NaiveDate::from_ymd_opt(2030, 5, 4).unwrap()
        );
        assert_eq!(
            parse_due_date("04/05/2030", now),
            Err(DraftError::DueDate("04/05/2030".into()))
        );
    }

    #[test_case("5", Ok(5); "digits")]
    #[test_case(" 13 ", Ok(13); "padded")]
    #[test_case("", Err(DraftError::StoryPoints(String::new())); "empty")]
    #[test_case("-1", Err(DraftError::StoryPoints("-1".into())); "negative")]
    #[test_case("2.5", Err(DraftError::StoryPoints("2.5".into())); "fraction")]
    fn story_points(input: &str, expected: Result<u32, DraftError>) {
        assert_eq!(parse_story_points(input), expected);
    }
}
