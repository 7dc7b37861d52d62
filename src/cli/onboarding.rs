//! First-run setup of the credential file.

use dialoguer::{Input, Password};
use jirapilot::{
    Config, CredentialStore, TrackerMode,
    domain::{DEFAULT_PRIORITIES, LabelTaxonomy, labels::split_csv},
};
use tracing::instrument;

use super::{
    prompt::{self, theme},
    terminal::Colorize,
};

/// Asks for the connection details and writes them to `store`.
#[instrument(level = "debug", skip_all, fields(path = %store.path().display()))]
pub fn run(store: &CredentialStore) -> anyhow::Result<Config> {
    println!("{}", "Let's connect to your Jira instance.".info());

    let server_url: String = Input::with_theme(&theme())
        .with_prompt("Jira server URL")
        .validate_with(|input: &String| check_url(input))
        .interact_text()?;
    let project_key = prompt::required("Project key of the project you work on")?;
    let api_token = Password::with_theme(&theme())
        .with_prompt("API token")
        .interact()?;
    let username = prompt::required("Username")?;
    let mode = TrackerMode::ALL[prompt::select("Jira deployment", &TrackerMode::ALL, 0)?];
    let verify_tls = prompt::confirm("Verify the SSL certificate?", true)?;

    let labels = if prompt::confirm("Will you use pre-defined labels?", true)? {
        Some(LabelTaxonomy {
            origin: csv("Origin labels (comma separated)")?,
            kind: csv("Type labels (comma separated)")?,
            project: csv("Project labels (comma separated)")?,
            resolve: csv("Resolve labels (comma separated)")?,
        })
    } else {
        None
    };

    let watchers = if mode.supports_watchers() {
        csv("Default watchers (comma separated)")?
    } else {
        Vec::new()
    };
    let assignees = split_csv(&prompt::required("Assignees (comma separated)")?);
    let priorities: String = Input::with_theme(&theme())
        .with_prompt("Priorities (comma separated)")
        .default(DEFAULT_PRIORITIES.join(","))
        .interact_text()?;

    let config = Config {
        server_url: server_url.trim().to_string(),
        project_key,
        username,
        api_token,
        mode,
        verify_tls,
        labels,
        watchers,
        assignees,
        priorities: split_csv(&priorities),
    };

    store.save(&config)?;
    println!(
        "{}",
        format!("✅ Configuration saved to {}", store.path().display()).success()
    );
    Ok(config)
}

fn csv(prompt: &str) -> anyhow::Result<Vec<String>> {
    Ok(split_csv(&prompt::optional(prompt)?))
}

fn check_url(input: &str) -> Result<(), &'static str> {
    let input = input.trim();
    if input.starts_with("https://") || input.starts_with("http://") {
        Ok(())
    } else {
        Err("The URL must start with http:// or https://")
    }
}
