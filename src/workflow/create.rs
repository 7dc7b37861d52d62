//! Submitting drafted issues.

use tracing::{debug, instrument, warn};

use crate::{
    Config, DraftIssue, Jql, TrackerMode,
    domain::{AccountRef, StatusFilter, query::MAX_RESULTS},
    tracker::{CreatedIssue, Error, Issue, Tracker, User},
};

/// Resolves what the user typed as an assignee into an account reference.
///
/// Server takes the name literally. Cloud looks the person up and prefers an
/// exact email match over the first search result; `None` means nobody was
/// found.
///
/// # Errors
///
/// Returns an error if the user search fails.
#[instrument(level = "debug", skip(tracker))]
pub fn resolve_account<T>(
    tracker: &T,
    mode: TrackerMode,
    assignee: &str,
) -> Result<Option<AccountRef>, Error>
where
    T: Tracker + ?Sized,
{
    if !mode.resolves_accounts() {
        return Ok(Some(AccountRef::Name(assignee.to_string())));
    }
    let users = tracker.find_users(assignee)?;
    Ok(pick_account(&users, assignee).map(AccountRef::AccountId))
}

fn pick_account(users: &[User], wanted: &str) -> Option<String> {
    let exact = users.iter().find(|user| {
        user.email
            .as_deref()
            .is_some_and(|email| email.eq_ignore_ascii_case(wanted))
    });
    exact
        .or_else(|| users.iter().find(|user| user.account_id.is_some()))
        .and_then(|user| user.account_id.clone())
}

/// Creates an issue or sub-task from a draft.
///
/// Returns `Ok(None)`, without creating anything, when the draft names an
/// assignee that cannot be resolved to an account.
///
/// # Errors
///
/// Returns an error if the account lookup or the create request fails. The
/// request is not retried.
#[instrument(level = "debug", skip_all, fields(summary = draft.summary.as_str()))]
pub fn create<T>(
    tracker: &T,
    config: &Config,
    draft: &DraftIssue,
) -> Result<Option<CreatedIssue>, Error>
where
    T: Tracker + ?Sized,
{
    let account = match draft.assignee.as_deref() {
        Some(assignee) => match resolve_account(tracker, config.mode, assignee)? {
            Some(account) => Some(account),
            None => {
                warn!(assignee, "no account found");
                return Ok(None);
            }
        },
        None => None,
    };

    let fields = draft.to_fields(&config.project_key, config.mode, account.as_ref());
    let created = tracker.create_issue(&fields)?;
    debug!(key = %created.key, "issue created");
    Ok(Some(created))
}

/// The open epics of the configured project, for linking new issues.
///
/// # Errors
///
/// Returns an error if the search fails.
pub fn epics<T>(tracker: &T, config: &Config) -> Result<Vec<Issue>, Error>
where
    T: Tracker + ?Sized,
{
    let jql = Jql::new()
        .project(&config.project_key)
        .issue_type("Epic")
        .status(&StatusFilter::Open);
    tracker.search(&jql, MAX_RESULTS)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{
        domain::DraftKind,
        tracker::fake::{FakeTracker, issue, user},
    };

    fn config(mode: TrackerMode) -> Config {
        Config {
            server_url: "https://jira.example.com".into(),
            project_key: "SPF".into(),
            username: "dev@example.com".into(),
            api_token: "token".into(),
            mode,
            verify_tls: true,
            labels: None,
            watchers: vec!["qa".into()],
            assignees: Vec::new(),
            priorities: Vec::new(),
        }
    }

    fn draft(assignee: &str) -> DraftIssue {
        let mut draft = DraftIssue::new(
            "Export invoices",
            "CSV export",
            DraftKind::Issue {
                issue_type: "Story".into(),
                story_points: Some(3),
                epic: None,
            },
        )
        .unwrap();
        draft.assignee = Some(assignee.into());
        draft
    }

    #[test]
    fn cloud_without_matching_account_creates_nothing() {
        let tracker = FakeTracker::default();

        let created = create(&tracker, &config(TrackerMode::Cloud), &draft("ghost@example.com"))
            .unwrap();

        assert_eq!(created, None);
        assert!(tracker.created.borrow().is_empty());
        assert_eq!(*tracker.user_queries.borrow(), ["ghost@example.com"]);
    }

    #[test]
    fn cloud_prefers_exact_email_match() {
        let tracker = FakeTracker {
            users: vec![
                user("first", "Jane Doe", "jane.doe@example.com"),
                user("exact", "Jane", "jane@example.com"),
            ],
            ..FakeTracker::default()
        };

        let created = create(&tracker, &config(TrackerMode::Cloud), &draft("JANE@example.com"))
            .unwrap()
            .unwrap();

        assert_eq!(created.key, "SPF-101");
        let created = tracker.created.borrow();
        let fields = &created[0];
        assert_eq!(fields["assignee"], json!({ "accountId": "exact" }));
        assert_eq!(fields["customfield_10016"], json!(3));
    }

    #[test]
    fn cloud_falls_back_to_first_result() {
        let users = vec![user("only", "Jane", "jane.doe@example.com")];
        assert_eq!(pick_account(&users, "jane"), Some("only".into()));
        assert_eq!(pick_account(&[], "jane"), None);
    }

    #[test]
    fn server_uses_literal_name() {
        let tracker = FakeTracker::default();
        let mut draft = draft("jdoe");
        draft.watchers = vec!["qa".into()];

        create(&tracker, &config(TrackerMode::Server), &draft)
            .unwrap()
            .unwrap();

        assert!(tracker.user_queries.borrow().is_empty());
        let created = tracker.created.borrow();
        let fields = &created[0];
        assert_eq!(fields["assignee"], json!({ "name": "jdoe" }));
        assert_eq!(fields["customfield_44300"], json!([{ "name": "qa" }]));
    }

    #[test]
    fn unassigned_draft_skips_lookup() {
        let tracker = FakeTracker::default();
        let mut draft = draft("nobody");
        draft.assignee = None;

        let created = create(&tracker, &config(TrackerMode::Cloud), &draft).unwrap();

        assert!(created.is_some());
        assert!(tracker.user_queries.borrow().is_empty());
        assert!(!tracker.created.borrow()[0].contains_key("assignee"));
    }

    #[test]
    fn epics_search_open_epics_of_project() {
        let tracker = FakeTracker {
            issues: vec![issue("SPF-1", "Billing", "In Progress")],
            ..FakeTracker::default()
        };

        let epics = epics(&tracker, &config(TrackerMode::Server)).unwrap();

        assert_eq!(epics.len(), 1);
        assert_eq!(
            *tracker.searches.borrow(),
            [r#"project = "SPF" AND issuetype = "Epic" AND resolution = Unresolved"#]
        );
    }
}
