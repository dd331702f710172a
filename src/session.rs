//! Interactive browsing: line commands drive a [`SearchController`].

use anyhow::{Context, Result};
use log::debug;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::github::SearchRepositories;
use crate::render::render_page;
use crate::search::{PageOutcome, SearchController};

pub const HELP: &str = "\
Commands:
  <text> or /<text>   search repository names
  n, next, >          next page
  p, prev, <          previous page
  ?, help             show this help
  q, quit             exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Submit(String),
    Next,
    Previous,
    Help,
    Quit,
}

impl SessionCommand {
    /// Parses one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        if let Some(query) = line.strip_prefix('/') {
            let query = query.trim();
            return (!query.is_empty()).then(|| SessionCommand::Submit(query.to_string()));
        }

        let command = match line {
            "q" | "quit" | "exit" => SessionCommand::Quit,
            "n" | "next" | ">" => SessionCommand::Next,
            "p" | "prev" | "previous" | "<" => SessionCommand::Previous,
            "?" | "help" => SessionCommand::Help,
            text => SessionCommand::Submit(text.to_string()),
        };
        Some(command)
    }
}

/// Runs the browse loop until `quit` or end of input.
///
/// `initial`, when given, is submitted before reading any input.
pub async fn run_session<S, R, W>(
    controller: &mut SearchController<S>,
    initial: Option<&str>,
    reader: R,
    out: &mut W,
) -> Result<()>
where
    S: SearchRepositories,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "{}", HELP)?;

    if let Some(query) = initial {
        let outcome = controller.submit(query).await;
        report(controller, &outcome, out)?;
    }

    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        let Some(command) = SessionCommand::parse(&line) else {
            continue;
        };
        debug!("Session command: {:?}", command);

        let outcome = match command {
            SessionCommand::Quit => break,
            SessionCommand::Help => {
                writeln!(out, "{}", HELP)?;
                continue;
            }
            SessionCommand::Submit(query) => controller.submit(&query).await,
            SessionCommand::Next => controller.next_page().await,
            SessionCommand::Previous => controller.previous_page().await,
        };
        report(controller, &outcome, out)?;
    }

    out.flush()?;
    Ok(())
}

fn report<S, W>(controller: &SearchController<S>, outcome: &PageOutcome, out: &mut W) -> Result<()>
where
    S: SearchRepositories,
    W: Write,
{
    let state = controller.state();
    match outcome {
        PageOutcome::Loaded { .. } | PageOutcome::Failed(_) => {
            write!(out, "\n{}", render_page(state))?;
        }
        PageOutcome::EndOfResults => writeln!(out, "No more results.")?,
        PageOutcome::Ignored if !state.has_query() => writeln!(out, "Search for something first.")?,
        PageOutcome::Ignored => writeln!(out, "Already on the first page.")?,
        PageOutcome::Stale => {}
    }
    out.flush()?;
    Ok(())
}
