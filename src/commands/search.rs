use anyhow::{Result, bail};
use log::{debug, warn};

use crate::github::SearchRepositories;
use crate::render::{render_json, render_page};
use crate::search::{SearchController, SearchState};

use super::config::{Config, Settings};

/// Options for a one-shot search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    pub query: String,
    pub page: u32,
    pub json: bool,
}

/// Fetches a single page and prints it to stdout.
#[tracing::instrument(skip(settings))]
pub async fn search(settings: &Settings, options: &SearchOptions) -> Result<()> {
    let config = Config::new(settings)?;
    let output = search_with(config.github, config.per_page, options).await?;
    print!("{}", output);
    Ok(())
}

/// Runs the search against `backend` and returns what would be printed.
///
/// A failed fetch is logged and rendered as an empty page.
pub async fn search_with<S: SearchRepositories>(
    backend: S,
    per_page: u32,
    options: &SearchOptions,
) -> Result<String> {
    let text = options.query.trim();
    if text.is_empty() {
        bail!("Search text must not be empty");
    }
    if options.page == 0 {
        bail!("Page numbers start at 1");
    }

    debug!("One-shot search for {:?}, page {}", text, options.page);

    let controller = SearchController::new(backend, per_page);
    let results = match controller.fetch_page(text, options.page, per_page).await {
        Ok(results) => results,
        Err(e) => {
            warn!("Search for {:?} failed: {}", text, e);
            Vec::new()
        }
    };

    if options.json {
        let mut json = render_json(&results)?;
        json.push('\n');
        return Ok(json);
    }

    let state = SearchState {
        query_text: text.to_string(),
        current_page: options.page,
        page_size: per_page,
        results,
    };
    Ok(render_page(&state))
}
