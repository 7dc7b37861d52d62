use std::path::PathBuf;

mod actions;
mod display;
mod menu;
mod onboarding;
mod prompt;
mod session;
mod terminal;

use clap::ArgAction;
use jirapilot::{Config, CredentialStore, JiraClient, storage::credentials::DEFAULT_FILE};
use session::Session;
use terminal::{Colorize, with_spinner};
use tracing::instrument;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The credential file to read and write
    #[arg(short, long, default_value = DEFAULT_FILE, global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let store = CredentialStore::new(self.config);
        match self.command {
            None => interactive(&store),
            Some(Command::Init) => init(&store),
            Some(Command::Config) => show_config(&store),
        }
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Create (or replace) the credential file interactively
    Init,

    /// Show the loaded configuration, with the API token masked
    Config,
}

/// Loads the configuration (running onboarding when there is none), connects
/// and shows the menu.
#[instrument(level = "debug", skip_all)]
fn interactive(store: &CredentialStore) -> anyhow::Result<()> {
    let config = if let Some(config) = store.load()? {
        config
    } else {
        println!(
            "{}",
            format!("No configuration found at {}.", store.path().display()).warning()
        );
        onboarding::run(store)?
    };

    let (tracker, user) = with_spinner("Connecting to Jira...", || JiraClient::connect(&config))
        .map_err(|e| anyhow::anyhow!("Failed to connect to Jira: {e}"))?;
    println!(
        "{}",
        format!("✅ Connected to {} as {}", config.server_url, user.display_name).success()
    );

    let mut session = Session::new(tracker, config);
    menu::run(&mut session)
}

#[instrument(level = "debug", skip_all)]
fn init(store: &CredentialStore) -> anyhow::Result<()> {
    if store.exists()
        && !prompt::confirm(
            &format!("Replace the existing {}?", store.path().display()),
            false,
        )?
    {
        println!("{}", "Kept the existing configuration.".dim());
        return Ok(());
    }
    onboarding::run(store)?;
    Ok(())
}

fn show_config(store: &CredentialStore) -> anyhow::Result<()> {
    let Some(config) = store.load()? else {
        anyhow::bail!(
            "No configuration found at {}. Run 'jp init' to create one.",
            store.path().display()
        );
    };

    let rows = config_rows(&config);
    let width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    for (name, value) in rows {
        println!("{name:<width$}  {value}");
    }
    Ok(())
}

fn config_rows(config: &Config) -> Vec<(&'static str, String)> {
    let labels = config.labels.as_ref().map_or_else(
        || "disabled".to_string(),
        |taxonomy| {
            format!(
                "origin: {} | type: {} | project: {} | resolve: {}",
                taxonomy.origin.join(","),
                taxonomy.kind.join(","),
                taxonomy.project.join(","),
                taxonomy.resolve.join(",")
            )
        },
    );
    vec![
        ("Server", config.server_url.clone()),
        ("Project", config.project_key.clone()),
        ("Deployment", config.mode.to_string()),
        ("Username", config.username.clone()),
        ("API token", mask(&config.api_token)),
        ("Verify TLS", config.verify_tls.to_string()),
        ("Labels", labels),
        ("Watchers", config.watchers.join(", ")),
        ("Assignees", config.assignees.join(", ")),
        ("Priorities", config.priority_choices().join(", ")),
    ]
}

/// Keeps the last four characters of a secret.
fn mask(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("{}{tail}", "*".repeat(count - 4))
}

#[cfg(test)]
mod tests {
    use jirapilot::TrackerMode;
    use test_case::test_case;

    use super::*;

    #[test_case("", ""; "empty")]
    #[test_case("abc", "***"; "short")]
    #[test_case("abcdefgh", "****efgh"; "long")]
    fn masking(secret: &str, expected: &str) {
        assert_eq!(mask(secret), expected);
    }

    #[test]
    fn config_rows_hide_the_token() {
        let config = Config {
            server_url: "https://jira.example.com".into(),
            project_key: "SPF".into(),
            username: "jdoe".into(),
            api_token: "super-secret-token".into(),
            mode: TrackerMode::Server,
            verify_tls: false,
            labels: None,
            watchers: Vec::new(),
            assignees: vec!["jdoe".into()],
            priorities: Vec::new(),
        };

        let rows = config_rows(&config);
        assert!(rows.iter().all(|(_, value)| !value.contains("super-secret")));
        assert!(rows.contains(&("Labels", "disabled".to_string())));
        assert!(rows.contains(&("Priorities", "P2, P1, P0, P3".to_string())));
        assert!(rows.contains(&("Deployment", "server".to_string())));
    }

    #[test]
    fn parses_arguments() {
        use clap::Parser;

        let cli = Cli::parse_from(["jp", "-vv", "--config", "other.json", "config"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, PathBuf::from("other.json"));
        assert!(matches!(cli.command, Some(Command::Config)));

        let cli = Cli::parse_from(["jp"]);
        assert_eq!(cli.config, PathBuf::from("secret_config.json"));
        assert!(cli.command.is_none());
    }
}
