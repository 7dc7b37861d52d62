use std::time::Duration;

use reqwest::{
    Method,
    blocking::{Client, RequestBuilder, Response},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use tracing::{debug, instrument};

use super::{
    Comment, CreatedIssue, Error, Issue, LabelChange, TimeTracking, Tracker, Transition, User,
    types::{
        CommentsResponse, ISSUE_FIELDS, SearchResponse, TimeTrackingResponse, TransitionsResponse,
    },
};
use crate::domain::{Config, IssueKey, Jql, TrackerMode, Worklog};

const API_PATH: &str = "rest/api/2";
const TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
enum Auth {
    Basic { username: String, token: String },
    Bearer(String),
}

/// A blocking REST client for one Jira instance.
#[derive(Clone)]
pub struct JiraClient {
    http: Client,
    base: String,
    auth: Auth,
}

impl std::fmt::Debug for JiraClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraClient")
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}

impl JiraClient {
    /// Builds a client from the configuration.
    ///
    /// Cloud deployments authenticate with basic auth (username and API
    /// token); Server deployments send the token as a bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if the server URL is not HTTP(S) or the HTTP client
    /// cannot be built.
    pub fn new(config: &Config) -> Result<Self, Error> {
        let base = base_url(&config.server_url)?;
        let http = Client::builder()
            .timeout(TIMEOUT)
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()?;
        let auth = match config.mode {
            TrackerMode::Cloud => Auth::Basic {
                username: config.username.clone(),
                token: config.api_token.clone(),
            },
            TrackerMode::Server => Auth::Bearer(config.api_token.clone()),
        };
        Ok(Self { http, base, auth })
    }

    /// Builds a client and verifies the credentials by fetching the current
    /// user.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be built or the tracker rejects
    /// the credentials.
    pub fn connect(config: &Config) -> Result<(Self, User), Error> {
        let client = Self::new(config)?;
        let user = client.myself()?;
        debug!(user = %user.display_name, "connected");
        Ok((client, user))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{API_PATH}/{path}", self.base);
        let builder = self.http.request(method, url);
        match &self.auth {
            Auth::Basic { username, token } => builder.basic_auth(username, Some(token)),
            Auth::Bearer(token) => builder.bearer_auth(token),
        }
    }

    fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, Error> {
        let response = send(self.request(Method::GET, path).query(query))?;
        Ok(response.json()?)
    }

    fn post<T: DeserializeOwned>(&self, path: &str, body: &Value) -> Result<T, Error> {
        let response = send(self.request(Method::POST, path).json(body))?;
        Ok(response.json()?)
    }

    fn post_unit(&self, path: &str, body: &Value) -> Result<(), Error> {
        send(self.request(Method::POST, path).json(body))?;
        Ok(())
    }
}

/// Sends a request, turning non-success statuses into [`Error::Status`].
fn send(builder: RequestBuilder) -> Result<Response, Error> {
    let response = builder.send()?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(Error::Status {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

/// Extracts `errorMessages` and `errors` from a Jira error body, falling back
/// to the raw body.
fn error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return body.trim().to_string();
    };
    let mut messages: Vec<String> = value
        .get("errorMessages")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .map(ToString::to_string)
        .collect();
    if let Some(errors) = value.get("errors").and_then(Value::as_object) {
        messages.extend(errors.iter().map(|(field, message)| match message {
            Value::String(text) => format!("{field}: {text}"),
            other => format!("{field}: {other}"),
        }));
    }
    if messages.is_empty() {
        body.trim().to_string()
    } else {
        messages.join("; ")
    }
}

fn base_url(server_url: &str) -> Result<String, Error> {
    let trimmed = server_url.trim().trim_end_matches('/');
    if trimmed.starts_with("https://") || trimmed.starts_with("http://") {
        Ok(trimmed.to_string())
    } else {
        Err(Error::InvalidUrl(server_url.to_string()))
    }
}

impl Tracker for JiraClient {
    #[instrument(level = "debug", skip(self))]
    fn myself(&self) -> Result<User, Error> {
        self.get("myself", &[])
    }

    #[instrument(level = "debug", skip_all)]
    fn create_issue(&self, fields: &Map<String, Value>) -> Result<CreatedIssue, Error> {
        let created: CreatedIssue = self.post("issue", &json!({ "fields": fields }))?;
        debug!(key = %created.key, "created issue");
        Ok(created)
    }

    #[instrument(level = "debug", skip_all, fields(key = %key))]
    fn issue(&self, key: &IssueKey) -> Result<Issue, Error> {
        self.get(&format!("issue/{key}"), &[("fields", ISSUE_FIELDS)])
    }

    #[instrument(level = "debug", skip(self, jql))]
    fn search(&self, jql: &Jql, max_results: u32) -> Result<Vec<Issue>, Error> {
        let jql = jql.to_string();
        debug!(%jql, "searching");
        let max_results = max_results.to_string();
        let response: SearchResponse = self.get(
            "search",
            &[
                ("jql", jql.as_str()),
                ("maxResults", max_results.as_str()),
                ("fields", ISSUE_FIELDS),
            ],
        )?;
        Ok(response.issues)
    }

    #[instrument(level = "debug", skip_all, fields(key = %key))]
    fn transitions(&self, key: &IssueKey) -> Result<Vec<Transition>, Error> {
        let response: TransitionsResponse = self.get(&format!("issue/{key}/transitions"), &[])?;
        Ok(response.transitions)
    }

    #[instrument(level = "debug", skip_all, fields(key = %key, transition_id = %transition_id))]
    fn transition(&self, key: &IssueKey, transition_id: &str) -> Result<(), Error> {
        self.post_unit(
            &format!("issue/{key}/transitions"),
            &json!({ "transition": { "id": transition_id } }),
        )
    }

    #[instrument(level = "debug", skip_all, fields(key = %key))]
    fn add_comment(&self, key: &IssueKey, body: &str) -> Result<(), Error> {
        self.post_unit(&format!("issue/{key}/comment"), &json!({ "body": body }))
    }

    #[instrument(level = "debug", skip_all, fields(key = %key))]
    fn comments(&self, key: &IssueKey) -> Result<Vec<Comment>, Error> {
        let response: CommentsResponse = self.get(&format!("issue/{key}/comment"), &[])?;
        Ok(response.comments)
    }

    #[instrument(level = "debug", skip_all, fields(key = %key))]
    fn add_worklog(&self, key: &IssueKey, worklog: &Worklog) -> Result<(), Error> {
        self.post_unit(&format!("issue/{key}/worklog"), &worklog.to_json())
    }

    #[instrument(level = "debug", skip_all, fields(key = %key))]
    fn update_labels(&self, key: &IssueKey, change: &LabelChange) -> Result<(), Error> {
        send(
            self.request(Method::PUT, &format!("issue/{key}"))
                .json(&change.to_json()),
        )?;
        Ok(())
    }

    #[instrument(level = "debug", skip_all, fields(key = %key))]
    fn time_tracking(&self, key: &IssueKey) -> Result<TimeTracking, Error> {
        let response: TimeTrackingResponse =
            self.get(&format!("issue/{key}"), &[("fields", "timetracking")])?;
        Ok(response.fields.timetracking)
    }

    #[instrument(level = "debug", skip(self))]
    fn find_users(&self, query: &str) -> Result<Vec<User>, Error> {
        // Cloud searches by `query`; Server still expects `username`.
        let param = match self.auth {
            Auth::Basic { .. } => "query",
            Auth::Bearer(_) => "username",
        };
        self.get("user/search", &[(param, query)])
    }
}
