//! Interactive Jira workflows
//!
//! Domain types, the credential store and the tracker gateway behind the `jp`
//! menu-driven client.

pub mod domain;
pub use domain::{Config, DraftIssue, IssueKey, Jql, TrackerMode};

/// Credential file persistence.
pub mod storage;
pub use storage::CredentialStore;

/// Blocking gateway to the Jira REST API.
pub mod tracker;
pub use tracker::{JiraClient, Tracker};

/// Multi-step flows built on top of the [`Tracker`] trait.
pub mod workflow;
