//! Multi-step operations built on a [`crate::Tracker`].
//!
//! These hold the decisions that do not depend on how the user is asked:
//! walking an issue through its workflow, resolving accounts and submitting
//! drafts, and reducing label selections to a change set.

/// Creating issues and sub-tasks.
pub mod create;

/// Label edits.
pub mod labels;

/// The transition walk.
pub mod transition;
pub use transition::{Choice, WalkEnd, WalkPrompt, WalkSummary, walk};
