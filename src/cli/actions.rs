//! Handlers behind the menu entries.

pub mod children;
pub mod comment;
pub mod create;
pub mod labels;
pub mod search;
pub mod time_tracking;
pub mod transition;

use jirapilot::tracker::Issue;

use super::{
    display,
    terminal::{Colorize, with_spinner},
};

/// Prints issues as a table, or a notice when there are none.
fn print_issues(issues: &[Issue]) {
    if issues.is_empty() {
        println!("{}", "No issues found.".warning());
        return;
    }
    print!("{}", display::issue_table(issues, display::table_width()));
    println!("{}", format!("{} issue(s)", issues.len()).dim());
}

/// Runs a tracker call behind a spinner, converting its error.
fn fetch<T>(
    message: &str,
    f: impl FnOnce() -> Result<T, jirapilot::tracker::Error>,
) -> anyhow::Result<T> {
    Ok(with_spinner(message, f)?)
}
