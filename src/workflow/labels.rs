//! Editing the labels of an existing issue.

use tracing::{debug, instrument};

use crate::{
    IssueKey,
    domain::labels::union,
    tracker::{Error, LabelChange, Tracker},
};

/// Turns the user's selections into the smallest change against the labels
/// an issue currently has.
///
/// Only present labels are removed and present labels are never added again,
/// so selecting a label for both removal and addition removes it. Duplicate
/// selections are dropped.
#[must_use]
pub fn plan(current: &[String], remove: &[String], add: &[String]) -> LabelChange {
    let remove: Vec<String> = union([remove])
        .into_iter()
        .filter(|label| current.contains(label))
        .collect();
    let add = union([add])
        .into_iter()
        .filter(|label| !current.contains(label))
        .collect();
    LabelChange { add, remove }
}

/// Sends a label change. Returns `false` without contacting the tracker when
/// there is nothing to change.
///
/// # Errors
///
/// Returns an error if the update request fails.
#[instrument(level = "debug", skip_all, fields(key = %key))]
pub fn apply<T>(tracker: &T, key: &IssueKey, change: &LabelChange) -> Result<bool, Error>
where
    T: Tracker + ?Sized,
{
    if change.is_empty() {
        debug!("no label changes");
        return Ok(false);
    }
    tracker.update_labels(key, change)?;
    Ok(true)
}
