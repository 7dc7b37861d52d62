//! The questions asked by the menu actions.

use chrono::Utc;
use dialoguer::{Confirm, Input, MultiSelect, Select, theme::ColorfulTheme};
use jirapilot::{
    DraftIssue, IssueKey,
    domain::{
        DraftKind, LabelCategory, LabelTaxonomy, Worklog,
        draft::{ISSUE_TYPES, parse_due_date, parse_story_points},
        labels::{split_csv, union},
        worklog::{is_duration, parse_started},
    },
};

use super::{session::Session, terminal::Colorize};

pub fn theme() -> ColorfulTheme {
    ColorfulTheme::default()
}

/// A line of text that must not be blank.
pub fn required(prompt: &str) -> anyhow::Result<String> {
    let value: String = Input::with_theme(&theme())
        .with_prompt(prompt)
        .validate_with(|input: &String| {
            if input.trim().is_empty() {
                Err("This field cannot be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    Ok(value.trim().to_string())
}

/// A line of text that may be left blank.
pub fn optional(prompt: &str) -> anyhow::Result<String> {
    let value: String = Input::with_theme(&theme())
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(value.trim().to_string())
}

/// Text spanning several lines, entered one line at a time and finished with
/// an empty line. At least one line is required.
pub fn multiline(prompt: &str) -> anyhow::Result<String> {
    println!("{}", format!("{prompt} (empty line to finish)").info());
    let mut lines: Vec<String> = Vec::new();
    loop {
        let line: String = Input::with_theme(&theme())
            .with_prompt(if lines.is_empty() { prompt } else { "…" })
            .allow_empty(true)
            .interact_text()?;
        if line.trim().is_empty() {
            if lines.is_empty() {
                println!("{}", "This field cannot be empty".warning());
                continue;
            }
            return Ok(join_lines(&lines));
        }
        lines.push(line);
    }
}

/// Joins entered lines, dropping trailing whitespace from each.
fn join_lines(lines: &[String]) -> String {
    lines
        .iter()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn select<T: ToString>(prompt: &str, items: &[T], default: usize) -> anyhow::Result<usize> {
    let items: Vec<String> = items.iter().map(ToString::to_string).collect();
    Ok(Select::with_theme(&theme())
        .with_prompt(prompt)
        .items(&items)
        .default(default)
        .interact()?)
}

/// The chosen items, in the order they are listed.
pub fn multi_select(prompt: &str, items: &[String]) -> anyhow::Result<Vec<String>> {
    if items.is_empty() {
        return Ok(Vec::new());
    }
    let chosen = MultiSelect::with_theme(&theme())
        .with_prompt(format!("{prompt} (space to select, enter to confirm)"))
        .items(items)
        .interact()?;
    Ok(chosen.into_iter().map(|idx| items[idx].clone()).collect())
}

pub fn confirm(prompt: &str, default: bool) -> anyhow::Result<bool> {
    Ok(Confirm::with_theme(&theme())
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// An issue key, defaulting to the last one entered. Bare numbers are taken
/// to be in the configured project.
pub fn issue_key(session: &mut Session) -> anyhow::Result<IssueKey> {
    let project = session.config.project_key.clone();
    let theme = theme();
    let mut input = Input::<String>::with_theme(&theme)
        .with_prompt(format!("Issue key (e.g. {project}-101)"))
        .validate_with(|input: &String| {
            IssueKey::normalize(input, &project)
                .map(|_| ())
                .map_err(|e| e.to_string())
        });
    if let Some(last) = session.last_key() {
        input = input.default(last.to_string());
    }
    let key = session.config.issue_key(&input.interact_text()?)?;
    session.remember(key.clone());
    Ok(key)
}

/// What a draft is being collected for.
pub enum Target {
    Issue,
    SubTask(IssueKey),
}

/// Asks for every field of a new issue or sub-task.
pub fn draft_issue(session: &mut Session, target: Target) -> anyhow::Result<DraftIssue> {
    let summary = required("Summary")?;
    let description = required("Description")?;

    let kind = match target {
        Target::Issue => {
            let issue_type = ISSUE_TYPES[select("Issue type", &ISSUE_TYPES, 0)?].to_string();
            DraftKind::Issue {
                story_points: None,
                epic: None,
                issue_type,
            }
        }
        Target::SubTask(parent) => DraftKind::SubTask { parent },
    };
    let mut draft = DraftIssue::new(&summary, &description, kind)?;

    let priorities = session.config.priority_choices();
    draft.priority = Some(priorities[select("Priority", &priorities, 0)?].clone());

    if let DraftKind::Issue {
        issue_type,
        story_points,
        epic,
    } = &mut draft.kind
    {
        if issue_type.as_str() != "Epic" {
            *epic = choose_epic(session)?;
        }
        if let Some(taxonomy) = &session.config.labels {
            draft.labels = creation_labels(taxonomy)?;
            if !draft.labels.is_empty() {
                println!("Labels: {}", draft.labels.join(", ").info());
            }
        }
        *story_points = Some(story_points_input()?);
    }

    draft.estimate = Some(duration("Original estimate (e.g. 3h, 2d)")?);

    if session.config.mode.supports_watchers() {
        draft.watchers = watchers(&session.config.watchers)?;
    }

    draft.assignee = assignee(&session.config.assignees)?;

    let due: String = Input::with_theme(&theme())
        .with_prompt("Due date (YYYY-MM-DD, empty for 30 days from now)")
        .allow_empty(true)
        .validate_with(|input: &String| parse_due_date(input, Utc::now()).map(|_| ()))
        .interact_text()?;
    draft.due_date = Some(parse_due_date(&due, Utc::now())?);

    Ok(draft)
}

fn choose_epic(session: &mut Session) -> anyhow::Result<Option<IssueKey>> {
    if !confirm("Link to an epic?", false)? {
        return Ok(None);
    }
    let project = session.config.project_key.clone();
    let epics = session.epics()?;
    if epics.is_empty() {
        println!("{}", "No open epics found.".warning());
        return Ok(None);
    }
    let items: Vec<String> = epics
        .iter()
        .map(|epic| format!("{}  {}", epic.key, epic.summary))
        .collect();
    let key = epics[select("Epic", &items, 0)?].key.clone();
    Ok(Some(IssueKey::normalize(&key, &project)?))
}

/// One multi-select per creation category; the selections are merged in
/// category order.
fn creation_labels(taxonomy: &LabelTaxonomy) -> anyhow::Result<Vec<String>> {
    let mut selected = Vec::new();
    for category in LabelCategory::CREATION {
        selected.push(multi_select(
            &format!("{category} labels"),
            taxonomy.values(category),
        )?);
    }
    Ok(union(selected.iter().map(Vec::as_slice)))
}

fn story_points_input() -> anyhow::Result<u32> {
    let input: String = Input::with_theme(&theme())
        .with_prompt("Story points")
        .validate_with(|input: &String| parse_story_points(input).map(|_| ()))
        .interact_text()?;
    Ok(parse_story_points(&input)?)
}

/// A Jira duration such as `3h` or `1d 4h`.
pub fn duration(prompt: &str) -> anyhow::Result<String> {
    let input: String = Input::with_theme(&theme())
        .with_prompt(prompt)
        .validate_with(|input: &String| {
            if is_duration(input) {
                Ok(())
            } else {
                Err("Use a duration such as 3h, 2d or 1w 2d")
            }
        })
        .interact_text()?;
    Ok(input.trim().to_string())
}

fn watchers(defaults: &[String]) -> anyhow::Result<Vec<String>> {
    if !defaults.is_empty() {
        println!("Default watchers: {}", defaults.join(", ").info());
    }
    let extra = split_csv(&optional("Additional watchers (comma separated)")?);
    Ok(union([defaults, extra.as_slice()]))
}

fn assignee(choices: &[String]) -> anyhow::Result<Option<String>> {
    if choices.is_empty() {
        let name = optional("Assignee (empty to leave unassigned)")?;
        return Ok((!name.is_empty()).then_some(name));
    }
    let mut items = choices.to_vec();
    items.push("Unassigned".to_string());
    let idx = select("Assign to", &items, 0)?;
    Ok(choices.get(idx).cloned())
}

/// Asks for the time spent and an optional start date.
///
/// A malformed date is reported and asked for again.
pub fn worklog(comment: String) -> anyhow::Result<Worklog> {
    let time_spent = duration("Time spent (e.g. 3h, 2d)")?;
    let started = loop {
        let input = optional("Started date (YYYY/MM/DD, empty for now)")?;
        if input.is_empty() {
            break None;
        }
        match parse_started(&input) {
            Ok(started) => break Some(started),
            Err(e) => println!("{}", format!("⚠️ {e}").warning()),
        }
    };
    Ok(Worklog {
        time_spent,
        comment,
        started,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_are_joined_with_newlines() {
        let lines = vec!["Fixed the parser.  ".to_string(), "  See SPF-7.".to_string()];
        assert_eq!(join_lines(&lines), "Fixed the parser.\n  See SPF-7.");
    }

    #[test]
    fn single_line_is_kept() {
        assert_eq!(join_lines(&["done".to_string()]), "done");
    }
}
