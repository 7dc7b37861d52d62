//! JQL construction.
//!
//! Queries are built from typed clauses joined with `AND`. Every value that
//! comes from the user is written as a quoted JQL string literal, so free text
//! can never change the structure of the query.

use std::fmt;

use super::IssueKey;

/// Upper bound on the number of issues fetched by a single search.
pub const MAX_RESULTS: u32 = 50;

/// Whose issues a search covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssigneeScope {
    /// Issues assigned to the authenticated user.
    CurrentUser,
    /// Issues assigned to the named user.
    User(String),
    /// No assignee restriction.
    Any,
}

/// Which issues a search keeps, by workflow state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusFilter {
    /// Unresolved issues.
    Open,
    /// Unresolved issues that have left the backlog.
    Active,
    /// Resolved issues.
    Done,
    /// Issues in a status with exactly this name.
    Named(String),
}

impl StatusFilter {
    /// The filters offered by name in the list menu.
    pub const PRESETS: [Self; 3] = [Self::Open, Self::Active, Self::Done];
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => f.write_str("Open"),
            Self::Active => f.write_str("Active"),
            Self::Done => f.write_str("Done"),
            Self::Named(name) => write!(f, "Status \"{name}\""),
        }
    }
}

/// A JQL query under construction.
///
/// ```
/// use jirapilot::domain::query::{AssigneeScope, Jql, StatusFilter};
///
/// let jql = Jql::new()
///     .project("SPF")
///     .assignee(&AssigneeScope::CurrentUser)
///     .status(&StatusFilter::Open);
/// assert_eq!(
///     jql.to_string(),
///     "project = \"SPF\" AND assignee = currentUser() AND resolution = Unresolved"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Jql {
    clauses: Vec<String>,
}

impl Jql {
    /// An empty query.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            clauses: Vec::new(),
        }
    }

    /// Restricts the query to a project.
    #[must_use]
    pub fn project(self, project_key: &str) -> Self {
        self.clause(format!("project = {}", quote(project_key)))
    }

    /// Restricts the query to an assignee.
    #[must_use]
    pub fn assignee(self, scope: &AssigneeScope) -> Self {
        match scope {
            AssigneeScope::CurrentUser => self.clause("assignee = currentUser()".to_string()),
            AssigneeScope::User(name) => self.clause(format!("assignee = {}", quote(name))),
            AssigneeScope::Any => self,
        }
    }

    /// Restricts the query by workflow state.
    #[must_use]
    pub fn status(self, filter: &StatusFilter) -> Self {
        match filter {
            StatusFilter::Open => self.clause("resolution = Unresolved".to_string()),
            StatusFilter::Active => self
                .clause("resolution = Unresolved".to_string())
                .clause("status != Backlog".to_string()),
            StatusFilter::Done => self.clause("resolution != Unresolved".to_string()),
            StatusFilter::Named(name) => self.clause(format!("status = {}", quote(name))),
        }
    }

    /// Matches a single issue.
    #[must_use]
    pub fn key(self, key: &IssueKey) -> Self {
        self.clause(format!("key = {key}"))
    }

    /// Matches issues whose text fields contain the given words.
    #[must_use]
    pub fn text(self, text: &str) -> Self {
        self.clause(format!("text ~ {}", quote(text)))
    }

    /// Matches the direct children of an issue.
    #[must_use]
    pub fn parent(self, key: &IssueKey) -> Self {
        self.clause(format!("parent = {key}"))
    }

    /// Restricts the query to an issue type.
    #[must_use]
    pub fn issue_type(self, name: &str) -> Self {
        self.clause(format!("issuetype = {}", quote(name)))
    }

    fn clause(mut self, clause: String) -> Self {
        self.clauses.push(clause);
        self
    }
}

impl fmt::Display for Jql {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.clauses.join(" AND "))
    }
}

/// Writes a value as a JQL string literal.
///
/// Backslashes and double quotes are escaped.
#[must_use]
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}
