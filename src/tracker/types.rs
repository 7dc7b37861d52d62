//! Tracker resources, flattened from the REST API's response shapes.

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use serde_json::{Value, json};

/// Fields requested for issue listings.
pub(crate) const ISSUE_FIELDS: &str = "summary,status,issuetype,priority,assignee,labels";

/// An issue as shown in listings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "IssueWire")]
pub struct Issue {
    /// Issue key, e.g. `SPF-101`.
    pub key: String,
    /// One-line summary.
    pub summary: String,
    /// Current status name.
    pub status: String,
    /// Issue type name.
    pub issue_type: Option<String>,
    /// Priority name.
    pub priority: Option<String>,
    /// Display name of the assignee.
    pub assignee: Option<String>,
    /// Labels on the issue.
    pub labels: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct IssueWire {
    key: String,
    #[serde(default)]
    fields: IssueFieldsWire,
}

#[derive(Debug, Default, Deserialize)]
struct IssueFieldsWire {
    #[serde(default)]
    summary: String,
    status: Option<Named>,
    issuetype: Option<Named>,
    priority: Option<Named>,
    assignee: Option<UserWire>,
    #[serde(default)]
    labels: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Named {
    name: String,
}

impl From<IssueWire> for Issue {
    fn from(wire: IssueWire) -> Self {
        let fields = wire.fields;
        Self {
            key: wire.key,
            summary: fields.summary,
            status: fields.status.map(|s| s.name).unwrap_or_default(),
            issue_type: fields.issuetype.map(|t| t.name),
            priority: fields.priority.map(|p| p.name),
            assignee: fields.assignee.map(|u| User::from(u).display_name),
            labels: fields.labels,
        }
    }
}

/// A workflow transition available on an issue.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "TransitionWire")]
pub struct Transition {
    /// Identifier used to apply the transition.
    pub id: String,
    /// Display name, e.g. `Start Progress`.
    pub name: String,
    /// Name of the status the transition leads to.
    pub to: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TransitionWire {
    id: String,
    name: String,
    to: Option<Named>,
}

impl From<TransitionWire> for Transition {
    fn from(wire: TransitionWire) -> Self {
        Self {
            id: wire.id,
            name: wire.name,
            to: wire.to.map(|to| to.name),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TransitionsResponse {
    #[serde(default)]
    pub transitions: Vec<Transition>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub issues: Vec<Issue>,
}

/// A comment on an issue.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "CommentWire")]
pub struct Comment {
    /// Display name of the author.
    pub author: String,
    /// When the comment was written, if the timestamp could be read.
    pub created: Option<DateTime<FixedOffset>>,
    /// Comment text.
    pub body: String,
}

#[derive(Debug, Deserialize)]
struct CommentWire {
    author: Option<UserWire>,
    #[serde(default)]
    created: String,
    #[serde(default)]
    body: Value,
}

impl From<CommentWire> for Comment {
    fn from(wire: CommentWire) -> Self {
        Self {
            author: wire
                .author
                .map_or_else(|| "Unknown".to_string(), |u| User::from(u).display_name),
            created: parse_timestamp(&wire.created),
            body: body_text(&wire.body),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentsResponse {
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// Parses Jira's `2024-01-02T10:00:00.000+0000` timestamps.
fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z").ok()
}

/// Plain text of a comment body.
///
/// Server returns a string; Cloud may return an Atlassian document, whose
/// text nodes are concatenated paragraph by paragraph.
fn body_text(body: &Value) -> String {
    match body {
        Value::String(text) => text.clone(),
        Value::Object(_) => {
            let mut paragraphs = Vec::new();
            collect_paragraphs(body, &mut paragraphs);
            paragraphs.join("\n")
        }
        _ => String::new(),
    }
}

fn collect_paragraphs(node: &Value, out: &mut Vec<String>) {
    let Some(content) = node.get("content").and_then(Value::as_array) else {
        return;
    };
    if node.get("type").and_then(Value::as_str) == Some("paragraph") {
        let text: String = content
            .iter()
            .filter_map(|child| child.get("text").and_then(Value::as_str))
            .collect();
        out.push(text);
        return;
    }
    for child in content {
        collect_paragraphs(child, out);
    }
}

/// A user account.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "UserWire")]
pub struct User {
    /// Opaque account id (Cloud).
    pub account_id: Option<String>,
    /// Login name (Server).
    pub name: Option<String>,
    /// Human readable name.
    pub display_name: String,
    /// Email address, when visible.
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserWire {
    account_id: Option<String>,
    name: Option<String>,
    #[serde(default)]
    display_name: String,
    email_address: Option<String>,
}

impl From<UserWire> for User {
    fn from(wire: UserWire) -> Self {
        Self {
            account_id: wire.account_id,
            name: wire.name,
            display_name: wire.display_name,
            email: wire.email_address,
        }
    }
}

/// The key of a newly created issue.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedIssue {
    /// Numeric id.
    pub id: String,
    /// Issue key, e.g. `SPF-102`.
    pub key: String,
}

/// Time tracking figures of an issue, in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct TimeTracking {
    /// The original estimate.
    #[serde(rename = "originalEstimateSeconds")]
    pub original: Option<i64>,
    /// Time logged so far.
    #[serde(rename = "timeSpentSeconds")]
    pub spent: Option<i64>,
    /// Estimated time left.
    #[serde(rename = "remainingEstimateSeconds")]
    pub remaining: Option<i64>,
}

impl TimeTracking {
    /// The length both gauge bars are measured against: the larger of the
    /// original estimate and spent plus remaining.
    #[must_use]
    pub fn scale(&self) -> i64 {
        let spent = self.spent.unwrap_or(0).max(0);
        let remaining = self.remaining.unwrap_or(0).max(0);
        self.original.unwrap_or(0).max(spent.saturating_add(remaining))
    }

    /// How many of `width` cells a value fills on the gauge, rounded to the
    /// nearest cell.
    #[must_use]
    pub fn cells(&self, value: Option<i64>, width: usize) -> usize {
        let scale = i128::from(self.scale());
        let value = i128::from(value.unwrap_or(0).max(0));
        if scale == 0 || value == 0 {
            return 0;
        }
        let width = i128::try_from(width).unwrap_or(i128::MAX);
        let cells = value.saturating_mul(width).saturating_add(scale / 2) / scale;
        usize::try_from(cells.min(width)).unwrap_or(0)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TimeTrackingResponse {
    #[serde(default)]
    pub fields: TimeTrackingFields,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TimeTrackingFields {
    #[serde(default)]
    pub timetracking: TimeTracking,
}

/// Labels to add to and remove from an issue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelChange {
    /// Labels to add.
    pub add: Vec<String>,
    /// Labels to remove.
    pub remove: Vec<String>,
}

impl LabelChange {
    /// Whether the change does nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty()
    }

    /// The body of the issue edit request.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let operations: Vec<Value> = self
            .remove
            .iter()
            .map(|label| json!({ "remove": label }))
            .chain(self.add.iter().map(|label| json!({ "add": label })))
            .collect();
        json!({ "update": { "labels": operations } })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_flattens_nested_fields() {
        let issue: Issue = serde_json::from_value(json!({
            "id": "10001",
            "key": "SPF-101",
            "fields": {
                "summary": "Fix login",
                "status": { "name": "In Progress" },
                "issuetype": { "name": "Bug" },
                "priority": { "name": "P1" },
                "assignee": { "displayName": "Jane Doe", "name": "jdoe" },
                "labels": ["customer"]
            }
        }))
        .unwrap();

        assert_eq!(
            issue,
            Issue {
                key: "SPF-101".into(),
                summary: "Fix login".into(),
                status: "In Progress".into(),
                issue_type: Some("Bug".into()),
                priority: Some("P1".into()),
                assignee: Some("Jane Doe".into()),
                labels: vec!["customer".into()],
            }
        );
    }

    #[test]
    fn unassigned_issue_without_optional_fields() {
        let issue: Issue = serde_json::from_value(json!({
            "key": "SPF-5",
            "fields": { "summary": "Docs", "status": { "name": "Open" }, "assignee": null }
        }))
        .unwrap();

        assert_eq!(issue.assignee, None);
        assert_eq!(issue.priority, None);
        assert!(issue.labels.is_empty());
    }

    #[test]
    fn transitions_response() {
        let response: TransitionsResponse = serde_json::from_value(json!({
            "expand": "transitions",
            "transitions": [
                { "id": "11", "name": "Start Progress", "to": { "name": "In Progress" } },
                { "id": "31", "name": "Done" }
            ]
        }))
        .unwrap();

        assert_eq!(response.transitions.len(), 2);
        assert_eq!(response.transitions[0].to.as_deref(), Some("In Progress"));
        assert_eq!(response.transitions[1].to, None);
    }

    #[test]
    fn comment_with_plain_body() {
        let comment: Comment = serde_json::from_value(json!({
            "author": { "displayName": "Jane Doe" },
            "created": "2024-01-02T10:15:30.000+0000",
            "body": "Looks good"
        }))
        .unwrap();

        assert_eq!(comment.author, "Jane Doe");
        assert_eq!(comment.body, "Looks good");
        assert_eq!(
            comment.created.unwrap().to_rfc3339(),
            "2024-01-02T10:15:30+00:00"
        );
    }

    #[test]
    fn comment_with_document_body() {
        let comment: Comment = serde_json::from_value(json!({
            "author": { "displayName": "Sam" },
            "created": "not a date",
            "body": {
                "type": "doc",
                "content": [
                    { "type": "paragraph", "content": [
                        { "type": "text", "text": "First " },
                        { "type": "text", "text": "line" }
                    ]},
                    { "type": "paragraph", "content": [
                        { "type": "text", "text": "Second" }
                    ]}
                ]
            }
        }))
        .unwrap();

        assert_eq!(comment.body, "First line\nSecond");
        assert!(comment.created.is_none());
    }

    #[test]
    fn time_tracking_fields() {
        let response: TimeTrackingResponse = serde_json::from_value(json!({
            "fields": { "timetracking": {
                "originalEstimate": "1w",
                "originalEstimateSeconds": 144000,
                "timeSpentSeconds": 28800
            }}
        }))
        .unwrap();

        let tracking = response.fields.timetracking;
        assert_eq!(tracking.original, Some(144_000));
        assert_eq!(tracking.spent, Some(28_800));
        assert_eq!(tracking.remaining, None);
    }

    #[test]
    fn gauge_scales_to_largest_total() {
        let tracking = TimeTracking {
            original: Some(100),
            spent: Some(25),
            remaining: Some(50),
        };
        assert_eq!(tracking.scale(), 100);
        assert_eq!(tracking.cells(tracking.spent, 20), 5);
        assert_eq!(tracking.cells(tracking.remaining, 20), 10);

        let overrun = TimeTracking {
            original: Some(100),
            spent: Some(150),
            remaining: Some(50),
        };
        assert_eq!(overrun.scale(), 200);
        assert_eq!(overrun.cells(overrun.spent, 20), 15);
        assert_eq!(overrun.cells(overrun.remaining, 20), 5);
    }

    #[test]
    fn gauge_without_any_time_is_empty() {
        let tracking = TimeTracking::default();
        assert_eq!(tracking.scale(), 0);
        assert_eq!(tracking.cells(Some(10), 20), 0);
    }

    #[test]
    fn gauge_handles_huge_durations() {
        let tracking = TimeTracking {
            original: Some(i64::MAX),
            spent: Some(i64::MAX),
            remaining: Some(i64::MAX),
        };
        assert_eq!(tracking.scale(), i64::MAX);
        assert_eq!(tracking.cells(tracking.spent, 30), 30);
        assert_eq!(tracking.cells(Some(i64::MAX / 2), 30), 15);
    }

    #[test]
    fn label_change_body() {
        let change = LabelChange {
            add: vec!["fixed".into()],
            remove: vec!["triage".into()],
        };
        assert_eq!(
            change.to_json(),
            json!({ "update": { "labels": [{ "remove": "triage" }, { "add": "fixed" }] } })
        );
        assert!(!change.is_empty());
        assert!(LabelChange::default().is_empty());
    }

    #[test]
    fn users_from_search() {
        let users: Vec<User> = serde_json::from_value(json!([
            { "accountId": "abc", "displayName": "Jane", "emailAddress": "jane@example.com" }
        ]))
        .unwrap();

        assert_eq!(users[0].account_id.as_deref(), Some("abc"));
        assert_eq!(users[0].email.as_deref(), Some("jane@example.com"));
    }
}
