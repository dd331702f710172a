use anyhow::Result;
use tokio::io::BufReader;

use crate::search::SearchController;
use crate::session::run_session;

use super::config::{Config, Settings};

/// Starts an interactive session on stdin/stdout.
#[tracing::instrument(skip(settings))]
pub async fn browse(settings: &Settings, initial: Option<&str>) -> Result<()> {
    let config = Config::new(settings)?;
    let mut controller = SearchController::new(config.github, config.per_page);

    let reader = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();

    run_session(&mut controller, initial, reader, &mut stdout).await
}
