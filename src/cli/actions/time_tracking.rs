use jirapilot::tracker::Tracker;
use tracing::instrument;

use super::fetch;
use crate::cli::{display, prompt, session::Session, terminal::Colorize};

/// Shows estimate, time spent and remaining time of an issue.
#[instrument(level = "debug", skip_all)]
pub fn show(session: &mut Session) -> anyhow::Result<()> {
    let key = prompt::issue_key(session)?;
    let tracking = fetch("Fetching time tracking...", || {
        session.tracker.time_tracking(&key)
    })?;
    println!("{}", format!("Time tracking of {key}").accent());
    print!("{}", display::time_tracking(&tracking, display::gauge_width()));
    Ok(())
}
