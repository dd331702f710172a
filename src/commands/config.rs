use anyhow::{Context, Result, bail};
use log::debug;
use reqwest::Client;
use std::time::Duration;

use crate::github::{DEFAULT_API_URL, DEFAULT_PER_PAGE, GitHub};

/// GitHub caps `per_page` at 100.
pub const MAX_PER_PAGE: u32 = 100;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings shared by all subcommands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: Option<String>,
    pub per_page: u32,
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: None,
            per_page: DEFAULT_PER_PAGE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.per_page == 0 || self.per_page > MAX_PER_PAGE {
            bail!(
                "Page size must be between 1 and {}, got {}",
                MAX_PER_PAGE,
                self.per_page
            );
        }
        Ok(())
    }

    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }
}

pub struct Config {
    pub github: GitHub,
    pub per_page: u32,
}

impl Config {
    pub fn new(settings: &Settings) -> Result<Self> {
        settings.validate()?;

        let client = Client::builder()
            .user_agent(concat!("ghsearch/", env!("GHSEARCH_VERSION")))
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        debug!(
            "Using API at {} with {} result(s) per page",
            settings.api_url(),
            settings.per_page
        );

        let github = GitHub::new(client, settings.api_url.clone());

        Ok(Self {
            github,
            per_page: settings.per_page,
        })
    }
}
