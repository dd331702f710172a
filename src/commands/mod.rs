//! Subcommand implementations behind the CLI.

mod browse;
mod config;
mod search;

pub use browse::browse;
pub use config::{Config, DEFAULT_TIMEOUT_SECS, MAX_PER_PAGE, Settings};
pub use search::{SearchOptions, search, search_with};
