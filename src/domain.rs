//! Domain models for driving a Jira project.
//!
//! This module contains the configuration, issue keys, query building, draft
//! issues and the time formatting used for display.

/// Business-time duration formatting.
pub mod business_time;

mod config;
pub use config::{Config, DEFAULT_PRIORITIES};

/// Issue draft assembly.
pub mod draft;
pub use draft::{DraftIssue, DraftKind};

/// Project-scoped issue keys.
pub mod issue_key;
pub use issue_key::{IssueKey, IssueKeyError};

/// Label taxonomy and selection.
pub mod labels;
pub use labels::{LabelCategory, LabelTaxonomy};

mod mode;
pub use mode::{AccountRef, FieldMapping, TrackerMode};

/// Safe JQL query construction.
pub mod query;
pub use query::{AssigneeScope, Jql, StatusFilter};

/// Work log entries and start dates.
pub mod worklog;
pub use worklog::Worklog;
