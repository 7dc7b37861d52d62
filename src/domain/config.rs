use std::fmt;

use serde::{Deserialize, Serialize};

use super::{
    IssueKey, LabelTaxonomy, TrackerMode,
    labels::{join_csv, split_csv},
};

/// Priorities offered when the configuration does not list any.
pub const DEFAULT_PRIORITIES: [&str; 4] = ["P2", "P1", "P0", "P3"];

/// Connection details and project defaults.
///
/// The configuration is read once at startup and never changes afterwards.
/// On disk it is a flat JSON object (see [`crate::storage::CredentialStore`]);
/// comma-separated lists in the file are split into trimmed entries here.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ConfigFile", into = "ConfigFile")]
pub struct Config {
    /// Base URL of the Jira instance, e.g. `https://example.atlassian.net/`.
    pub server_url: String,

    /// Key of the project issues are created in and searched from.
    pub project_key: String,

    /// Login used for basic auth (Cloud). Usually an email address.
    pub username: String,

    /// API token (Cloud) or personal access token (Server).
    pub api_token: String,

    /// The kind of deployment being driven.
    pub mode: TrackerMode,

    /// Whether TLS certificates are verified.
    pub verify_tls: bool,

    /// Pre-defined labels, or `None` when the taxonomy is disabled.
    pub labels: Option<LabelTaxonomy>,

    /// Watchers added to every new issue (Server only).
    pub watchers: Vec<String>,

    /// People new issues can be assigned to.
    pub assignees: Vec<String>,

    /// Priority names offered when creating an issue.
    pub priorities: Vec<String>,
}

impl Config {
    /// The priority names to offer, falling back to [`DEFAULT_PRIORITIES`].
    #[must_use]
    pub fn priority_choices(&self) -> Vec<String> {
        if self.priorities.is_empty() {
            DEFAULT_PRIORITIES.iter().map(ToString::to_string).collect()
        } else {
            self.priorities.clone()
        }
    }

    /// The web URL of an issue.
    #[must_use]
    pub fn browse_url(&self, key: &IssueKey) -> String {
        format!("{}/browse/{key}", self.server_url.trim_end_matches('/'))
    }

    /// Normalizes user input into an issue key of the configured project.
    ///
    /// # Errors
    ///
    /// See [`IssueKey::normalize`].
    pub fn issue_key(&self, input: &str) -> Result<IssueKey, super::IssueKeyError> {
        IssueKey::normalize(input, &self.project_key)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("server_url", &self.server_url)
            .field("project_key", &self.project_key)
            .field("username", &self.username)
            .field("api_token", &"********")
            .field("mode", &self.mode)
            .field("verify_tls", &self.verify_tls)
            .field("labels", &self.labels)
            .field("watchers", &self.watchers)
            .field("assignees", &self.assignees)
            .field("priorities", &self.priorities)
            .finish()
    }
}

const fn default_ssl_cert() -> bool {
    true
}

/// The on-disk layout of the credential file.
///
/// Field order here is the key order in the written file.
#[derive(Debug, Serialize, Deserialize)]
struct ConfigFile {
    server_url: String,
    project_key: String,
    api_token: String,
    username: String,
    #[serde(default)]
    jira_type: TrackerMode,
    #[serde(default = "default_ssl_cert")]
    ssl_cert: bool,
    #[serde(default)]
    labels_conf: LabelsConf,
    #[serde(default)]
    watchers: String,
    /// Older files call this `assignee`.
    #[serde(default, alias = "assignee")]
    assignees: String,
    #[serde(default)]
    priorities: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct LabelsConf {
    is_enable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    labels: Option<LabelsFile>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct LabelsFile {
    #[serde(default)]
    origin: String,
    #[serde(default, rename = "type")]
    kind: String,
    #[serde(default)]
    project: String,
    #[serde(default)]
    resolve: String,
}

impl From<ConfigFile> for Config {
    fn from(file: ConfigFile) -> Self {
        // Labels listed under a disabled taxonomy are ignored.
        let labels = file.labels_conf.is_enable.then(|| {
            let labels = file.labels_conf.labels.unwrap_or_default();
            LabelTaxonomy {
                origin: split_csv(&labels.origin),
                kind: split_csv(&labels.kind),
                project: split_csv(&labels.project),
                resolve: split_csv(&labels.resolve),
            }
        });

        Self {
            server_url: file.server_url,
            project_key: file.project_key,
            username: file.username,
            api_token: file.api_token,
            mode: file.jira_type,
            verify_tls: file.ssl_cert,
            labels,
            watchers: split_csv(&file.watchers),
            assignees: split_csv(&file.assignees),
            priorities: split_csv(&file.priorities),
        }
    }
}

impl From<Config> for ConfigFile {
    fn from(config: Config) -> Self {
        let labels_conf = config.labels.map_or_else(LabelsConf::default, |labels| LabelsConf {
            is_enable: true,
            labels: Some(LabelsFile {
                origin: join_csv(&labels.origin),
                kind: join_csv(&labels.kind),
                project: join_csv(&labels.project),
                resolve: join_csv(&labels.resolve),
            }),
        });

        Self {
            server_url: config.server_url,
            project_key: config.project_key,
            api_token: config.api_token,
            username: config.username,
            jira_type: config.mode,
            ssl_cert: config.verify_tls,
            labels_conf,
            watchers: join_csv(&config.watchers),
            assignees: join_csv(&config.assignees),
            priorities: join_csv(&config.priorities),
        }
    }
}
