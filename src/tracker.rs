//! The boundary to Jira.
//!
//! [`Tracker`] lists every call the client makes. [`JiraClient`] implements it
//! over the REST API; tests drive the workflows with an in-memory fake.

mod client;
mod types;

#[cfg(test)]
pub(crate) mod fake;

pub use client::JiraClient;
use serde_json::{Map, Value};
pub use types::{Comment, CreatedIssue, Issue, LabelChange, TimeTracking, Transition, User};

use crate::domain::{IssueKey, Jql, Worklog, query::MAX_RESULTS};

/// Operations against the issue tracker.
///
/// Every call blocks until the tracker answers.
pub trait Tracker {
    /// The authenticated user. Used to verify the connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    fn myself(&self) -> Result<User, Error>;

    /// Creates an issue from a `fields` object. Not idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    fn create_issue(&self, fields: &Map<String, Value>) -> Result<CreatedIssue, Error>;

    /// Fetches a single issue.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the issue does not exist.
    fn issue(&self, key: &IssueKey) -> Result<Issue, Error>;

    /// Runs a JQL search, returning at most `max_results` issues.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the query is rejected.
    fn search(&self, jql: &Jql, max_results: u32) -> Result<Vec<Issue>, Error>;

    /// The transitions currently available on an issue.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    fn transitions(&self, key: &IssueKey) -> Result<Vec<Transition>, Error>;

    /// Applies a transition to an issue.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    fn transition(&self, key: &IssueKey, transition_id: &str) -> Result<(), Error>;

    /// Adds a comment to an issue.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    fn add_comment(&self, key: &IssueKey, body: &str) -> Result<(), Error>;

    /// The comments on an issue, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    fn comments(&self, key: &IssueKey) -> Result<Vec<Comment>, Error>;

    /// Logs work against an issue.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    fn add_worklog(&self, key: &IssueKey, worklog: &Worklog) -> Result<(), Error>;

    /// Adds and removes labels on an issue.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    fn update_labels(&self, key: &IssueKey, change: &LabelChange) -> Result<(), Error>;

    /// The time tracking fields of an issue.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    fn time_tracking(&self, key: &IssueKey) -> Result<TimeTracking, Error>;

    /// Users matching a name or email address.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    fn find_users(&self, query: &str) -> Result<Vec<User>, Error>;

    /// The direct children (sub-tasks, or issues of an epic) of an issue.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    fn children(&self, key: &IssueKey) -> Result<Vec<Issue>, Error> {
        self.search(&Jql::new().parent(key), MAX_RESULTS)
    }
}

/// Errors talking to the tracker.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request could not be sent or the response could not be read.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The tracker answered with a non-success status.
    #[error("Jira returned HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Error messages from the response body, or the body itself.
        message: String,
    },

    /// The configured server URL is not an HTTP(S) URL.
    #[error("Invalid server URL '{0}': expected http:// or https://")]
    InvalidUrl(String),
}
