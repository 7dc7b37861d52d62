//! Interactive status transitions.
//!
//! [`walk`] repeatedly offers the transitions an issue currently allows until
//! the user exits or the workflow has nowhere left to go. The transition set
//! is fetched fresh on every step since it depends on the status just reached.

use tracing::{debug, instrument, warn};

use crate::{
    IssueKey,
    tracker::{self, Tracker, Transition},
};

/// What the user picked at one step of the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    /// Apply this transition.
    Apply(Transition),
    /// Stop walking.
    Exit,
}

/// The front end a walk talks to.
pub trait WalkPrompt {
    /// Shows the issue's current status.
    fn show_status(&mut self, key: &IssueKey, status: &str);

    /// Asks for the next transition.
    ///
    /// # Errors
    ///
    /// Returns an error if the user could not be asked, e.g. because the
    /// terminal went away. The walk ends with that error.
    fn choose(&mut self, transitions: &[Transition]) -> std::io::Result<Choice>;

    /// Reports a transition that was applied.
    fn applied(&mut self, transition: &Transition);

    /// Reports a transition the tracker refused.
    fn failed(&mut self, transition: &Transition, error: &tracker::Error);
}

/// Why a walk stopped.
#[derive(Debug)]
pub enum WalkEnd {
    /// The user chose to exit.
    Exited,
    /// No transitions are available from the current status.
    DeadEnd,
    /// The transitions or the status could not be fetched.
    FetchFailed(tracker::Error),
}

/// The outcome of a walk.
#[derive(Debug)]
pub struct WalkSummary {
    /// Transitions applied, in order.
    pub applied: Vec<Transition>,
    /// Why the walk stopped.
    pub end: WalkEnd,
}

/// Walks `key` through its workflow until the user exits or no transitions
/// remain.
///
/// A refused transition is reported through the prompt and the walk carries
/// on from the unchanged status.
///
/// # Errors
///
/// Returns an error only if the prompt fails. Tracker failures end the walk
/// and are reported in [`WalkSummary::end`].
#[instrument(level = "debug", skip_all, fields(key = %key))]
pub fn walk<T, P>(tracker: &T, key: &IssueKey, prompt: &mut P) -> std::io::Result<WalkSummary>
where
    T: Tracker + ?Sized,
    P: WalkPrompt + ?Sized,
{
    let mut applied = Vec::new();
    let end = loop {
        let transitions = match tracker.transitions(key) {
            Ok(transitions) => transitions,
            Err(e) => break WalkEnd::FetchFailed(e),
        };
        if transitions.is_empty() {
            debug!("no transitions available");
            break WalkEnd::DeadEnd;
        }

        match tracker.issue(key) {
            Ok(issue) => prompt.show_status(key, &issue.status),
            Err(e) => break WalkEnd::FetchFailed(e),
        }

        let transition = match prompt.choose(&transitions)? {
            Choice::Apply(transition) => transition,
            Choice::Exit => break WalkEnd::Exited,
        };

        match tracker.transition(key, &transition.id) {
            Ok(()) => {
                debug!(transition = %transition.name, "applied transition");
                prompt.applied(&transition);
                applied.push(transition);
            }
            Err(e) => {
                warn!(transition = %transition.name, error = %e, "transition failed");
                prompt.failed(&transition, &e);
            }
        }
    };

    Ok(WalkSummary { applied, end })
}
