use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use crate::http::{FetchError, HttpClient};

use super::query::{SearchQuery, endpoint};
use super::types::{RepositorySummary, SearchResponse};

/// Default GitHub REST API root.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchRepositories: Send + Sync {
    /// Fetches one page of results for `query`.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<RepositorySummary>, FetchError>;
    fn api_url(&self) -> &str;
}

pub struct GitHub {
    pub http: HttpClient,
    pub api_url: String,
}

impl GitHub {
    #[tracing::instrument(skip(client, api_url))]
    pub fn new(client: Client, api_url: Option<String>) -> Self {
        let api_url = api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self {
            http: HttpClient::new(client),
            api_url,
        }
    }
}

#[async_trait]
impl SearchRepositories for GitHub {
    #[tracing::instrument(skip(self))]
    async fn search(&self, query: &SearchQuery) -> Result<Vec<RepositorySummary>, FetchError> {
        GitHub::fetch_page(query, &self.http, &self.api_url).await
    }

    fn api_url(&self) -> &str {
        &self.api_url
    }
}

impl GitHub {
    #[tracing::instrument(skip(http, api_url))]
    pub async fn fetch_page(
        query: &SearchQuery,
        http: &HttpClient,
        api_url: &str,
    ) -> Result<Vec<RepositorySummary>, FetchError> {
        let url = endpoint(api_url);

        match query.url(api_url) {
            Ok(full) => debug!("Searching {}...", full),
            Err(e) => debug!("Searching {:?} at {} ({})...", query.text, url, e),
        }

        let response: SearchResponse = http.get_json_with_query(&url, &query.params()).await?;

        debug!(
            "Got {} item(s) of {} total",
            response.items.len(),
            response.total_count
        );

        Ok(response
            .items
            .into_iter()
            .map(RepositorySummary::from)
            .collect())
    }
}
