use jirapilot::{DraftIssue, IssueKey, workflow};
use tracing::instrument;

use super::{fetch, transition::walk_issue};
use crate::cli::{
    prompt::{self, Target},
    session::Session,
    terminal::Colorize,
};

/// Creates a top-level issue, then offers a walk and a sub-task.
#[instrument(level = "debug", skip_all)]
pub fn issue(session: &mut Session) -> anyhow::Result<()> {
    let draft = prompt::draft_issue(session, Target::Issue)?;
    let Some(key) = submit(session, &draft)? else {
        return Ok(());
    };

    offer_walk(session, &key)?;
    if prompt::confirm(&format!("Create a sub-task of {key}?"), false)? {
        subtask_of(session, key)?;
    }
    Ok(())
}

/// Creates a sub-task of an existing issue.
#[instrument(level = "debug", skip_all)]
pub fn subtask(session: &mut Session) -> anyhow::Result<()> {
    let parent = prompt::issue_key(session)?;
    subtask_of(session, parent)
}

fn subtask_of(session: &mut Session, parent: IssueKey) -> anyhow::Result<()> {
    println!("{}", format!("New sub-task of {parent}").info());
    let draft = prompt::draft_issue(session, Target::SubTask(parent))?;
    if let Some(key) = submit(session, &draft)? {
        offer_walk(session, &key)?;
    }
    Ok(())
}

fn submit(session: &mut Session, draft: &DraftIssue) -> anyhow::Result<Option<IssueKey>> {
    let created = fetch("Creating issue...", || {
        workflow::create::create(&session.tracker, &session.config, draft)
    })?;

    let Some(created) = created else {
        let assignee = draft.assignee.as_deref().unwrap_or_default();
        println!(
            "{}",
            format!("⚠️ No account found for '{assignee}'. Nothing was created.").warning()
        );
        return Ok(None);
    };

    let key: IssueKey = created.key.parse()?;
    println!(
        "{}",
        format!("✅ Created {key}: {}", session.config.browse_url(&key)).success()
    );
    session.remember(key.clone());
    Ok(Some(key))
}

fn offer_walk(session: &Session, key: &IssueKey) -> anyhow::Result<()> {
    if prompt::confirm(&format!("Transition {key} now?"), false)? {
        walk_issue(session, key)?;
    }
    Ok(())
}
