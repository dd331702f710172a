//! HTTP client issuing single-attempt JSON requests.

use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::error::{FetchError, classify_status};

/// HTTP client for the search API. Each call is one attempt; failures are
/// classified and handed back to the caller.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Performs a GET request with query parameters and deserializes the JSON response.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_json_with_query<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        debug!("GET JSON from {} with query {:?}...", url, query);

        let response = self.client.get(url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            let err = classify_status(status, response.headers());
            debug!("GET {} failed: {}", url, err);
            return Err(err);
        }

        let body = response.text().await?;
        let parsed = serde_json::from_str::<T>(&body)?;

        Ok(parsed)
    }
}
