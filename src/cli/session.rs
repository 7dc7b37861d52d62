use jirapilot::{
    Config, IssueKey, JiraClient,
    tracker::Issue,
    workflow,
};

use super::terminal::with_spinner;

/// Everything an action needs, for the lifetime of one menu loop.
#[derive(Debug)]
pub struct Session {
    pub tracker: JiraClient,
    pub config: Config,
    last_key: Option<IssueKey>,
    epics: Option<Vec<Issue>>,
}

impl Session {
    pub const fn new(tracker: JiraClient, config: Config) -> Self {
        Self {
            tracker,
            config,
            last_key: None,
            epics: None,
        }
    }

    /// The issue key entered most recently, offered as the next default.
    pub const fn last_key(&self) -> Option<&IssueKey> {
        self.last_key.as_ref()
    }

    pub fn remember(&mut self, key: IssueKey) {
        self.last_key = Some(key);
    }

    /// Open epics of the project, fetched on first use.
    pub fn epics(&mut self) -> anyhow::Result<&[Issue]> {
        if self.epics.is_none() {
            let epics = with_spinner("Fetching epics...", || {
                workflow::create::epics(&self.tracker, &self.config)
            })?;
            self.epics = Some(epics);
        }
        Ok(self.epics.as_deref().unwrap_or_default())
    }
}
