use jirapilot::{
    domain::{
        LabelCategory,
        labels::{split_csv, union},
    },
    tracker::Tracker,
    workflow::labels::{apply, plan},
};
use tracing::instrument;

use super::fetch;
use crate::cli::{prompt, session::Session, terminal::Colorize};

/// Removes and adds labels on an issue in a single update.
#[instrument(level = "debug", skip_all)]
pub fn update(session: &mut Session) -> anyhow::Result<()> {
    let key = prompt::issue_key(session)?;
    let issue = fetch("Fetching issue...", || session.tracker.issue(&key))?;

    if issue.labels.is_empty() {
        println!("{}", format!("{key} has no labels.").dim());
    } else {
        println!("Current labels: {}", issue.labels.join(", ").info());
    }

    let remove = prompt::multi_select("Labels to remove", &issue.labels)?;

    let offered = session.config.labels.as_ref().map_or_else(Vec::new, |taxonomy| {
        union(LabelCategory::ALL.map(|category| taxonomy.values(category)))
    });
    let mut add = prompt::multi_select("Labels to add", &offered)?;
    add.extend(split_csv(&prompt::optional("Other labels to add (comma separated)")?));

    let change = plan(&issue.labels, &remove, &add);
    let sent = fetch("Updating labels...", || apply(&session.tracker, &key, &change))?;
    if sent {
        println!("{}", format!("✅ Labels of {key} updated.").success());
    } else {
        println!("{}", "No label changes.".dim());
    }
    Ok(())
}
