use dialoguer::Select;
use jirapilot::{
    IssueKey, tracker,
    tracker::Transition,
    workflow::{self, Choice, WalkEnd, WalkPrompt},
};
use tracing::instrument;

use crate::cli::{
    display,
    prompt::{self, theme},
    session::Session,
    terminal::Colorize,
};

/// Asks for an issue and walks it through its workflow.
#[instrument(level = "debug", skip_all)]
pub fn run(session: &mut Session) -> anyhow::Result<()> {
    let key = prompt::issue_key(session)?;
    walk_issue(session, &key)
}

/// Walks an issue until the user exits or no transitions remain.
pub fn walk_issue(session: &Session, key: &IssueKey) -> anyhow::Result<()> {
    let mut prompt = Terminal;
    let summary = workflow::walk(&session.tracker, key, &mut prompt)?;

    match summary.end {
        WalkEnd::Exited => println!("{}", "Exiting transition loop.".dim()),
        WalkEnd::DeadEnd => {
            println!("{}", format!("No available transitions for issue {key}.").info());
        }
        WalkEnd::FetchFailed(e) => {
            println!("{}", format!("⚠️ Could not fetch transitions for {key}: {e}").warning());
        }
    }
    if !summary.applied.is_empty() {
        let names: Vec<&str> = summary.applied.iter().map(|t| t.name.as_str()).collect();
        println!("{}", format!("Applied: {}", names.join(" → ")).dim());
    }
    Ok(())
}

struct Terminal;

impl WalkPrompt for Terminal {
    fn show_status(&mut self, key: &IssueKey, status: &str) {
        println!("{} is {}", key.to_string().accent(), display::status(status));
    }

    fn choose(&mut self, transitions: &[Transition]) -> std::io::Result<Choice> {
        let mut items: Vec<String> = transitions
            .iter()
            .map(|t| match &t.to {
                Some(to) if *to != t.name => format!("{} → {to}", t.name),
                _ => t.name.clone(),
            })
            .collect();
        items.push("Exit".to_string());

        let idx = Select::with_theme(&theme())
            .with_prompt("Select the next status")
            .items(&items)
            .default(0)
            .interact()
            .map_err(std::io::Error::other)?;

        Ok(transitions
            .get(idx)
            .cloned()
            .map_or(Choice::Exit, Choice::Apply))
    }

    fn applied(&mut self, transition: &Transition) {
        let target = transition.to.as_deref().unwrap_or(&transition.name);
        println!("{}", format!("✅ Transitioned to '{target}'").success());
    }

    fn failed(&mut self, transition: &Transition, error: &tracker::Error) {
        println!(
            "{}",
            format!("⚠️ Failed to apply '{}': {error}", transition.name).warning()
        );
    }
}
