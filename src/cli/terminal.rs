//! Colours, widths and spinners for the interactive session.
//!
//! Output is only painted when stdout supports colour, so piping `jp config`
//! into a file yields plain text.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::{OwoColorize, colors::css};

/// Columns below which tables and gauges are shrunk.
const NARROW_COLUMNS: u16 = 60;

pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Width of the attached terminal, if there is one.
pub fn terminal_width() -> Option<u16> {
    terminal_size::terminal_size().map(|(width, _)| width.0)
}

pub fn is_narrow() -> bool {
    terminal_width().is_some_and(|width| width < NARROW_COLUMNS)
}

/// Paints messages by their meaning rather than by colour name.
pub trait Colorize {
    /// Completed actions (✅ lines, done statuses).
    fn success(&self) -> String;
    /// Recoverable problems and empty results.
    fn warning(&self) -> String;
    /// Neutral notices and in-progress statuses.
    fn info(&self) -> String;
    /// Secondary detail such as counts and timestamps.
    fn dim(&self) -> String;
    /// Issue keys and headings.
    fn accent(&self) -> String;
}

impl<T: AsRef<str> + ?Sized> Colorize for T {
    fn success(&self) -> String {
        paint(self.as_ref(), |s| s.fg::<css::Green>().to_string())
    }

    fn warning(&self) -> String {
        paint(self.as_ref(), |s| s.fg::<css::Orange>().to_string())
    }

    fn info(&self) -> String {
        paint(self.as_ref(), |s| s.fg::<css::LightBlue>().to_string())
    }

    fn dim(&self) -> String {
        paint(self.as_ref(), |s| s.dimmed().to_string())
    }

    fn accent(&self) -> String {
        paint(self.as_ref(), |s| s.fg::<css::DarkCyan>().bold().to_string())
    }
}

fn paint(text: &str, style: impl FnOnce(&str) -> String) -> String {
    if supports_color() {
        style(text)
    } else {
        text.to_string()
    }
}

/// Runs a blocking call behind a spinner showing `message`.
pub fn with_spinner<T>(message: &str, f: impl FnOnce() -> T) -> T {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = f();
    spinner.finish_and_clear();
    result
}
