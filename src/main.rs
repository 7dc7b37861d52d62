//! `jp`: a menu-driven terminal client for Jira.

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()
}
