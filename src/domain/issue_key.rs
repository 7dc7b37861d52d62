use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;

static KEY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<project>[A-Za-z][A-Za-z0-9_]*)-(?P<number>[0-9]+)$")
        .expect("issue key pattern is valid")
});

/// A project-scoped issue key such as `SPF-101`.
///
/// Keys are accepted either fully qualified or as a bare issue number, in
/// which case the configured project key is prepended (see
/// [`IssueKey::normalize`]). The project prefix is always upper case, since
/// Jira rejects `spf` where it expects `SPF`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IssueKey(String);

impl IssueKey {
    /// Normalizes user input into an issue key.
    ///
    /// Surrounding whitespace is ignored. A bare number is prefixed with
    /// `project_key`; anything else must already be a qualified key.
    ///
    /// ```
    /// use jirapilot::IssueKey;
    ///
    /// assert_eq!(IssueKey::normalize("101", "SPF").unwrap().as_str(), "SPF-101");
    /// assert_eq!(IssueKey::normalize("ABC-7", "SPF").unwrap().as_str(), "ABC-7");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`IssueKeyError`] if the input is empty or is neither a number
    /// nor a `PROJECT-NUMBER` key.
    pub fn normalize(input: &str, project_key: &str) -> Result<Self, IssueKeyError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(IssueKeyError::Empty);
        }
        if input.chars().all(|c| c.is_ascii_digit()) {
            return format!("{project_key}-{input}").parse();
        }
        input.parse()
    }

    /// The key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The project prefix of the key.
    #[must_use]
    pub fn project(&self) -> &str {
        self.0.rsplit_once('-').map_or("", |(project, _)| project)
    }

}

impl FromStr for IssueKey {
    type Err = IssueKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(IssueKeyError::Empty);
        }
        let captures = KEY_PATTERN
            .captures(s)
            .ok_or_else(|| IssueKeyError::Syntax(s.to_string()))?;
        Ok(Self(format!(
            "{}-{}",
            captures["project"].to_ascii_uppercase(),
            &captures["number"]
        )))
    }
}

impl AsRef<str> for IssueKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IssueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors produced while parsing an issue key.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IssueKeyError {
    /// Nothing was entered.
    #[error("Issue key cannot be empty")]
    Empty,

    /// The input is neither a number nor a `PROJECT-NUMBER` key.
    #[error("Invalid issue key '{0}': expected PROJECT-NUMBER (ex. SPF-101) or a bare number")]
    Syntax(String),
}
