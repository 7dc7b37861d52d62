use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::IssueKey;

/// The kind of Jira deployment being driven.
///
/// The mode is chosen once, when the configuration is loaded, and decides how
/// requests authenticate, which custom fields carry story points, watchers and
/// epic links, and how people are referenced in issue fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackerMode {
    /// Atlassian Cloud. Basic auth with an API token; users are referenced by
    /// opaque account id.
    #[default]
    Cloud,
    /// Self-hosted Jira Server or Data Center. Bearer personal access token;
    /// users are referenced by login name.
    Server,
}

/// Deployment-specific custom field identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    /// Field holding the story point estimate.
    pub story_points: &'static str,
    /// Field holding the watcher list, if watchers can be set on creation.
    pub watchers: Option<&'static str>,
    /// Field holding the epic link. `None` means the epic is the issue's
    /// `parent`.
    pub epic_link: Option<&'static str>,
}

const CLOUD_FIELDS: FieldMapping = FieldMapping {
    story_points: "customfield_10016",
    watchers: None,
    epic_link: None,
};

const SERVER_FIELDS: FieldMapping = FieldMapping {
    story_points: "customfield_10002",
    watchers: Some("customfield_44300"),
    epic_link: Some("customfield_10008"),
};

impl TrackerMode {
    /// Every mode, in the order offered during onboarding.
    pub const ALL: [Self; 2] = [Self::Cloud, Self::Server];

    /// The custom field layout for this deployment.
    #[must_use]
    pub const fn fields(self) -> &'static FieldMapping {
        match self {
            Self::Cloud => &CLOUD_FIELDS,
            Self::Server => &SERVER_FIELDS,
        }
    }

    /// The name stored in the credential file.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cloud => "cloud",
            Self::Server => "server",
        }
    }

    /// Whether user references must be looked up in the user directory
    /// before they can be placed in an issue field.
    #[must_use]
    pub const fn resolves_accounts(self) -> bool {
        matches!(self, Self::Cloud)
    }

    /// Whether watchers can be supplied when an issue is created.
    #[must_use]
    pub const fn supports_watchers(self) -> bool {
        self.fields().watchers.is_some()
    }
}

impl fmt::Display for TrackerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FieldMapping {
    /// The field name and value linking an issue to its epic.
    #[must_use]
    pub fn epic_entry(&self, epic: &IssueKey) -> (&'static str, Value) {
        match self.epic_link {
            Some(field) => (field, json!(epic.as_str())),
            None => ("parent", json!({ "key": epic.as_str() })),
        }
    }

    /// The field name and value carrying the watcher list, when supported.
    ///
    /// Returns `None` for an empty list as well.
    #[must_use]
    pub fn watchers_entry(&self, watchers: &[String]) -> Option<(&'static str, Value)> {
        let field = self.watchers?;
        if watchers.is_empty() {
            return None;
        }
        let value = watchers
            .iter()
            .map(|name| json!({ "name": name }))
            .collect::<Vec<_>>();
        Some((field, Value::Array(value)))
    }
}

/// A reference to a person, in the form the deployment expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountRef {
    /// A login name (Server).
    Name(String),
    /// An opaque account identifier (Cloud).
    AccountId(String),
}

impl AccountRef {
    /// The JSON object placed in user-typed fields such as `assignee`.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Name(name) => json!({ "name": name }),
            Self::AccountId(id) => json!({ "accountId": id }),
        }
    }
}
