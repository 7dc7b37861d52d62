use jirapilot::{
    Jql,
    domain::{AssigneeScope, StatusFilter, query::MAX_RESULTS},
    tracker::Tracker,
};
use tracing::{debug, instrument};

use super::{fetch, print_issues};
use crate::cli::{prompt, session::Session};

const SEARCH_MODES: [&str; 2] = ["By issue key", "By text"];
const SCOPES: [&str; 3] = ["Assigned to me", "Assigned to someone else", "Anyone"];
const OTHER_STATUS: &str = "Another status...";

/// Looks an issue up by key, or searches the project's text fields.
#[instrument(level = "debug", skip_all)]
pub fn search(session: &mut Session) -> anyhow::Result<()> {
    let jql = if prompt::select("Search", &SEARCH_MODES, 0)? == 0 {
        Jql::new().key(&prompt::issue_key(session)?)
    } else {
        let text = prompt::required("Text to search for")?;
        Jql::new().project(&session.config.project_key).text(&text)
    };
    run(session, &jql)
}

/// Lists the project's issues for an assignee and a status filter.
#[instrument(level = "debug", skip_all)]
pub fn list(session: &mut Session) -> anyhow::Result<()> {
    let scope = match prompt::select("Whose issues", &SCOPES, 0)? {
        0 => AssigneeScope::CurrentUser,
        1 => AssigneeScope::User(prompt::required("Assignee")?),
        _ => AssigneeScope::Any,
    };

    let mut filters: Vec<String> = StatusFilter::PRESETS
        .iter()
        .map(ToString::to_string)
        .collect();
    filters.push(OTHER_STATUS.to_string());
    let idx = prompt::select("Filter", &filters, 1)?;
    let status = match StatusFilter::PRESETS.get(idx) {
        Some(preset) => preset.clone(),
        None => StatusFilter::Named(prompt::required("Status name")?),
    };

    let jql = Jql::new()
        .project(&session.config.project_key)
        .assignee(&scope)
        .status(&status);
    run(session, &jql)
}

fn run(session: &Session, jql: &Jql) -> anyhow::Result<()> {
    debug!(%jql, "running search");
    let issues = fetch("Searching...", || session.tracker.search(jql, MAX_RESULTS))?;
    print_issues(&issues);
    Ok(())
}
