use anyhow::{Context, Result};
use reqwest::Url;

/// Restricts matches to the repository name.
pub const NAME_QUALIFIER: &str = "in:name";

/// Results requested per page unless configured otherwise.
pub const DEFAULT_PER_PAGE: u32 = 8;

/// One page of a repository-name search, sorted by stars descending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub page: u32,
    pub per_page: u32,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>, page: u32, per_page: u32) -> Self {
        Self {
            text: text.into(),
            page,
            per_page,
        }
    }

    /// The `q` parameter: user text plus the name qualifier.
    pub fn qualified(&self) -> String {
        format!("{} {}", self.text.trim(), NAME_QUALIFIER)
    }

    /// Query parameters in the order GitHub documents them.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("q", self.qualified()),
            ("sort", "stars".to_string()),
            ("order", "desc".to_string()),
            ("per_page", self.per_page.to_string()),
            ("page", self.page.to_string()),
        ]
    }

    /// Full request URL against `api_url`.
    pub fn url(&self, api_url: &str) -> Result<Url> {
        let endpoint = endpoint(api_url);
        Url::parse_with_params(&endpoint, self.params())
            .with_context(|| format!("Invalid API URL: {}", api_url))
    }
}

/// The repository search endpoint under `api_url`.
pub fn endpoint(api_url: &str) -> String {
    format!("{}/search/repositories", api_url.trim_end_matches('/'))
}
