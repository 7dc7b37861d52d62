use jirapilot::tracker::Tracker;
use tracing::instrument;

use super::{fetch, print_issues};
use crate::cli::{prompt, session::Session};

/// Lists the sub-tasks (or, for an epic, the issues) under an issue.
#[instrument(level = "debug", skip_all)]
pub fn show(session: &mut Session) -> anyhow::Result<()> {
    let key = prompt::issue_key(session)?;
    let children = fetch("Fetching child tasks...", || session.tracker.children(&key))?;
    print_issues(&children);
    Ok(())
}
