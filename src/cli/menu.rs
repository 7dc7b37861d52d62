//! The main menu loop.

use dialoguer::Select;
use tracing::{instrument, warn};

use super::{
    actions::{children, comment, create, labels, search, time_tracking, transition},
    prompt::theme,
    session::Session,
    terminal::Colorize,
};

/// One entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateIssue,
    CreateSubTask,
    Search,
    List,
    Transition,
    Comment,
    LogWork,
    UpdateLabels,
    TimeTracking,
    Children,
    Comments,
    Exit,
}

impl Action {
    /// Menu order.
    pub const ALL: [Self; 12] = [
        Self::CreateIssue,
        Self::CreateSubTask,
        Self::Search,
        Self::List,
        Self::Transition,
        Self::Comment,
        Self::LogWork,
        Self::UpdateLabels,
        Self::TimeTracking,
        Self::Children,
        Self::Comments,
        Self::Exit,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::CreateIssue => "Create a new issue in the project",
            Self::CreateSubTask => "Create a sub-task for an existing issue",
            Self::Search => "Search for an issue by key or text",
            Self::List => "List the issues in the current project",
            Self::Transition => "Transition an issue from one state to another",
            Self::Comment => "Add a comment to an issue",
            Self::LogWork => "Log time spent on an issue",
            Self::UpdateLabels => "Update the labels of an issue",
            Self::TimeTracking => "Show time tracking of an issue",
            Self::Children => "Show the child tasks of an issue",
            Self::Comments => "Show the comments of an issue",
            Self::Exit => "Exit the application",
        }
    }

    /// Numbered menu lines.
    fn items() -> Vec<String> {
        Self::ALL
            .iter()
            .enumerate()
            .map(|(idx, action)| format!("{}. {}", idx + 1, action.label()))
            .collect()
    }

    fn run(self, session: &mut Session) -> anyhow::Result<()> {
        match self {
            Self::CreateIssue => create::issue(session),
            Self::CreateSubTask => create::subtask(session),
            Self::Search => search::search(session),
            Self::List => search::list(session),
            Self::Transition => transition::run(session),
            Self::Comment => comment::add(session),
            Self::LogWork => comment::log_work(session),
            Self::UpdateLabels => labels::update(session),
            Self::TimeTracking => time_tracking::show(session),
            Self::Children => children::show(session),
            Self::Comments => comment::show(session),
            Self::Exit => Ok(()),
        }
    }
}

/// Shows the menu until the user exits.
///
/// A failing action is reported and the menu is shown again. Failing to show
/// the menu itself ends the loop with that error.
#[instrument(level = "debug", skip_all)]
pub fn run(session: &mut Session) -> anyhow::Result<()> {
    let items = Action::items();
    let exit = Action::ALL.len() - 1;
    loop {
        let idx = Select::with_theme(&theme())
            .with_prompt("What do you want to do?")
            .items(&items)
            .default(exit)
            .interact()?;
        let action = Action::ALL[idx];
        if action == Action::Exit {
            println!("{}", "Bye!".dim());
            return Ok(());
        }

        if let Err(e) = action.run(session) {
            warn!(?action, error = %e, "action failed");
            println!("{}", format!("⚠️ {e:#}").warning());
        }
        println!();
    }
}
