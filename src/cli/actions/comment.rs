use jirapilot::{IssueKey, tracker::Tracker};
use tracing::instrument;

use super::fetch;
use crate::cli::{display, prompt, session::Session, terminal::Colorize};

/// Adds a comment, then offers to log work with the same text.
#[instrument(level = "debug", skip_all)]
pub fn add(session: &mut Session) -> anyhow::Result<()> {
    let key = prompt::issue_key(session)?;
    let comment = prompt::multiline("Comment")?;

    fetch("Adding comment...", || session.tracker.add_comment(&key, &comment))?;
    println!("{}", format!("✅ Comment added to {key}.").success());

    if prompt::confirm(&format!("Log work for {key} with the same comment?"), false)? {
        log(session, &key, comment)?;
    }
    Ok(())
}

/// Logs time spent on an issue.
#[instrument(level = "debug", skip_all)]
pub fn log_work(session: &mut Session) -> anyhow::Result<()> {
    let key = prompt::issue_key(session)?;
    let comment = prompt::multiline("What was the time spent on")?;
    log(session, &key, comment)
}

fn log(session: &Session, key: &IssueKey, comment: String) -> anyhow::Result<()> {
    let worklog = prompt::worklog(comment)?;
    fetch("Logging work...", || session.tracker.add_worklog(key, &worklog))?;
    println!(
        "{}",
        format!("✅ Logged {} on {key}.", worklog.time_spent).success()
    );
    Ok(())
}

/// Shows the comments of an issue.
#[instrument(level = "debug", skip_all)]
pub fn show(session: &mut Session) -> anyhow::Result<()> {
    let key = prompt::issue_key(session)?;
    let comments = fetch("Fetching comments...", || session.tracker.comments(&key))?;
    if comments.is_empty() {
        println!("{}", format!("{key} has no comments.").dim());
    } else {
        print!("{}", display::comments(&comments));
    }
    Ok(())
}
