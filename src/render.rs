//! Text and JSON output for result pages.

use anyhow::{Context, Result};

use crate::format::format_timestamp;
use crate::github::RepositorySummary;
use crate::search::SearchState;

/// Renders one result as a card.
pub fn render_card(repo: &RepositorySummary) -> String {
    render_card_with(repo, format_timestamp)
}

/// Like [`render_card`], with a custom timestamp formatter.
pub fn render_card_with<F>(repo: &RepositorySummary, format_time: F) -> String
where
    F: Fn(&str) -> String,
{
    let mut lines = vec![
        format!("{}/", repo.owner),
        format!("{} \u{2192}", repo.name),
        format!("{} stars", repo.stars),
        format!("{} forks", repo.forks),
    ];
    if let Some(language) = &repo.language {
        lines.push(language.clone());
    }
    lines.push(repo.description.clone());
    lines.push(format!("Last updated on {}", format_time(&repo.last_update)));
    lines.push(repo.url.clone());

    let mut card = lines.join("\n");
    card.push('\n');
    card
}

/// Renders the current page: a header followed by one card per result.
pub fn render_page(state: &SearchState) -> String {
    render_page_with(state, format_timestamp)
}

pub fn render_page_with<F>(state: &SearchState, format_time: F) -> String
where
    F: Fn(&str) -> String,
{
    let mut out = format!("Results (page {})\n", state.current_page);

    if state.results.is_empty() {
        out.push_str("No results.\n");
        return out;
    }

    for repo in &state.results {
        out.push('\n');
        out.push_str(&render_card_with(repo, &format_time));
    }
    out
}

/// Pretty-printed JSON array of the results.
pub fn render_json(results: &[RepositorySummary]) -> Result<String> {
    serde_json::to_string_pretty(results).context("Failed to serialize results")
}
