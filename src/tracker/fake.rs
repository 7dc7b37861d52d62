//! An in-memory [`Tracker`] for driving workflows in tests.

use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
};

use serde_json::{Map, Value};

use super::{
    Comment, CreatedIssue, Error, Issue, LabelChange, TimeTracking, Tracker, Transition, User,
};
use crate::domain::{IssueKey, Jql, Worklog};

/// Scripted tracker state. Each `transitions` call takes the next scripted
/// set; `None` in the script makes that fetch fail, and an exhausted script
/// yields no transitions.
#[derive(Debug, Default)]
pub struct FakeTracker {
    pub transition_script: RefCell<VecDeque<Option<Vec<Transition>>>>,
    pub failing_ids: Vec<String>,
    pub status: RefCell<String>,
    pub users: Vec<User>,
    pub issues: Vec<Issue>,

    pub transition_fetches: Cell<usize>,
    pub offered: RefCell<Vec<Transition>>,
    pub applied: RefCell<Vec<String>>,
    pub created: RefCell<Vec<Map<String, Value>>>,
    pub searches: RefCell<Vec<String>>,
    pub user_queries: RefCell<Vec<String>>,
    pub label_changes: RefCell<Vec<(String, LabelChange)>>,
}

pub fn transition(id: &str, name: &str, to: &str) -> Transition {
    Transition {
        id: id.into(),
        name: name.into(),
        to: Some(to.into()),
    }
}

pub fn user(account_id: &str, display_name: &str, email: &str) -> User {
    User {
        account_id: Some(account_id.into()),
        name: None,
        display_name: display_name.into(),
        email: Some(email.into()),
    }
}

pub fn issue(key: &str, summary: &str, status: &str) -> Issue {
    Issue {
        key: key.into(),
        summary: summary.into(),
        status: status.into(),
        issue_type: Some("Task".into()),
        priority: Some("P2".into()),
        assignee: None,
        labels: Vec::new(),
    }
}

impl FakeTracker {
    pub fn with_transitions(script: impl IntoIterator<Item = Option<Vec<Transition>>>) -> Self {
        Self {
            transition_script: RefCell::new(script.into_iter().collect()),
            status: RefCell::new("Open".into()),
            ..Self::default()
        }
    }
}

fn rejected(message: &str) -> Error {
    Error::Status {
        status: 400,
        message: message.into(),
    }
}

impl Tracker for FakeTracker {
    fn myself(&self) -> Result<User, Error> {
        Ok(user("me", "Me", "me@example.com"))
    }

    fn create_issue(&self, fields: &Map<String, Value>) -> Result<CreatedIssue, Error> {
        let mut created = self.created.borrow_mut();
        created.push(fields.clone());
        Ok(CreatedIssue {
            id: format!("{}", 10_000 + created.len()),
            key: format!("SPF-{}", 100 + created.len()),
        })
    }

    fn issue(&self, key: &IssueKey) -> Result<Issue, Error> {
        let mut issue = if self.issues.is_empty() {
            issue(key.as_str(), "", "")
        } else {
            self.issues
                .iter()
                .find(|issue| issue.key == key.as_str())
                .cloned()
                .ok_or_else(|| rejected("Issue does not exist"))?
        };
        issue.status.clone_from(&self.status.borrow());
        Ok(issue)
    }

    fn search(&self, jql: &Jql, max_results: u32) -> Result<Vec<Issue>, Error> {
        self.searches.borrow_mut().push(jql.to_string());
        Ok(self
            .issues
            .iter()
            .take(max_results as usize)
            .cloned()
            .collect())
    }

    fn transitions(&self, _key: &IssueKey) -> Result<Vec<Transition>, Error> {
        self.transition_fetches.set(self.transition_fetches.get() + 1);
        match self.transition_script.borrow_mut().pop_front() {
            Some(Some(transitions)) => {
                self.offered.replace(transitions.clone());
                Ok(transitions)
            }
            Some(None) => Err(rejected("transitions unavailable")),
            None => Ok(Vec::new()),
        }
    }

    fn transition(&self, _key: &IssueKey, transition_id: &str) -> Result<(), Error> {
        if self.failing_ids.iter().any(|id| id == transition_id) {
            return Err(rejected("transition not allowed"));
        }
        self.applied.borrow_mut().push(transition_id.to_string());
        if let Some(to) = self
            .offered
            .borrow()
            .iter()
            .find(|t| t.id == transition_id)
            .and_then(|t| t.to.clone())
        {
            self.status.replace(to);
        }
        Ok(())
    }

    fn add_comment(&self, _key: &IssueKey, _body: &str) -> Result<(), Error> {
        Ok(())
    }

    fn comments(&self, _key: &IssueKey) -> Result<Vec<Comment>, Error> {
        Ok(Vec::new())
    }

    fn add_worklog(&self, _key: &IssueKey, _worklog: &Worklog) -> Result<(), Error> {
        Ok(())
    }

    fn update_labels(&self, key: &IssueKey, change: &LabelChange) -> Result<(), Error> {
        self.label_changes
            .borrow_mut()
            .push((key.to_string(), change.clone()));
        Ok(())
    }

    fn time_tracking(&self, _key: &IssueKey) -> Result<TimeTracking, Error> {
        Ok(TimeTracking::default())
    }

    fn find_users(&self, query: &str) -> Result<Vec<User>, Error> {
        self.user_queries.borrow_mut().push(query.to_string());
        Ok(self.users.clone())
    }
}
