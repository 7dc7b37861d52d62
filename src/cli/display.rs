//! Rendering of issues, comments and time tracking.

use std::fmt::Write;

use jirapilot::{
    domain::business_time,
    tracker::{Comment, Issue, TimeTracking},
};

use super::terminal::{Colorize, is_narrow, terminal_width};

const HEADERS: [&str; 6] = ["Key", "Type", "Status", "Priority", "Assignee", "Summary"];
const GAUGE_WIDTH: usize = 30;
const NARROW_GAUGE_WIDTH: usize = 20;

/// How a status is coloured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Done,
    Active,
    Waiting,
    Other,
}

impl Tone {
    fn of(status: &str) -> Self {
        let status = status.to_lowercase();
        if ["done", "resolved", "closed"].contains(&status.as_str()) {
            Self::Done
        } else if status.contains("progress") || status.contains("review") {
            Self::Active
        } else if ["to do", "open", "backlog", "reopened"].contains(&status.as_str()) {
            Self::Waiting
        } else {
            Self::Other
        }
    }

    fn paint(self, text: &str) -> String {
        match self {
            Self::Done => text.success(),
            Self::Active => text.warning(),
            Self::Waiting => text.info(),
            Self::Other => text.dim(),
        }
    }
}

/// A status name in its colour.
pub fn status(name: &str) -> String {
    Tone::of(name).paint(name)
}

/// Lays issues out as an aligned table.
///
/// Columns are as wide as their widest cell. When `max_width` is given the
/// summary column is cut to fit it.
pub fn issue_table(issues: &[Issue], max_width: Option<usize>) -> String {
    let rows: Vec<[String; 6]> = issues
        .iter()
        .map(|issue| {
            [
                issue.key.clone(),
                issue.issue_type.clone().unwrap_or_default(),
                issue.status.clone(),
                issue.priority.clone().unwrap_or_default(),
                issue
                    .assignee
                    .clone()
                    .unwrap_or_else(|| "Unassigned".to_string()),
                issue.summary.clone(),
            ]
        })
        .collect();

    let widths: Vec<usize> = HEADERS
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            rows.iter()
                .map(|row| row[idx].chars().count())
                .max()
                .unwrap_or(0)
                .max(header.len())
        })
        .collect();

    let summary_width = max_width.map(|max| {
        let fixed: usize = widths[..5].iter().map(|w| w + 2).sum();
        max.saturating_sub(fixed).max(HEADERS[5].len())
    });

    let mut out = String::new();
    for (header, width) in HEADERS.iter().zip(&widths).take(5) {
        let _ = write!(out, "{header:<width$}  ");
    }
    let _ = writeln!(out, "{}", HEADERS[5]);
    for width in widths.iter().take(5) {
        let _ = write!(out, "{:-<width$}  ", "");
    }
    let _ = writeln!(out, "{:-<w$}", "", w = summary_width.unwrap_or(widths[5]).min(widths[5]));

    for row in &rows {
        for (idx, value) in row.iter().enumerate().take(5) {
            let width = widths[idx];
            let padded = format!("{value:<width$}");
            let cell = match idx {
                0 => padded.accent(),
                2 => Tone::of(value).paint(&padded),
                _ => padded,
            };
            let _ = write!(out, "{cell}  ");
        }
        let summary = match summary_width {
            Some(width) => truncate(&row[5], width),
            None => row[5].clone(),
        };
        let _ = writeln!(out, "{summary}");
    }
    out
}

/// Cuts `text` to at most `width` characters, marking the cut with `…`.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

/// The width available for tables, if a terminal was detected.
pub fn table_width() -> Option<usize> {
    terminal_width().map(usize::from)
}

/// Comments, oldest first, each under an author and timestamp line.
pub fn comments(comments: &[Comment]) -> String {
    let mut out = String::new();
    for (idx, comment) in comments.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        let created = comment
            .created
            .map(|created| created.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        let _ = writeln!(out, "{} {}", comment.author.accent(), created.dim());
        for line in comment.body.lines() {
            let _ = writeln!(out, "  {line}");
        }
    }
    out
}

/// The gauge width for the current terminal.
pub fn gauge_width() -> usize {
    if is_narrow() {
        NARROW_GAUGE_WIDTH
    } else {
        GAUGE_WIDTH
    }
}

/// The three time tracking figures in business time, followed by a gauge of
/// time spent and time remaining.
pub fn time_tracking(tracking: &TimeTracking, width: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Original estimate:  {}",
        business_time::format(tracking.original)
    );
    let _ = writeln!(
        out,
        "Time spent:         {}",
        business_time::format(tracking.spent)
    );
    let _ = writeln!(
        out,
        "Remaining:          {}",
        business_time::format(tracking.remaining)
    );
    out.push('\n');
    let _ = writeln!(
        out,
        "Logged     {}",
        bar(tracking.cells(tracking.spent, width), width).success()
    );
    let _ = writeln!(
        out,
        "Remaining  {}",
        bar(tracking.cells(tracking.remaining, width), width).warning()
    );
    out
}

fn bar(filled: usize, width: usize) -> String {
    let mut bar = "█".repeat(filled);
    bar.push_str(&"░".repeat(width.saturating_sub(filled)));
    bar
}
