use serde::{Deserialize, Serialize};

use crate::format::summarize_description;

/// Body of `GET /search/repositories`
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct SearchResponse {
    #[serde(default)]
    pub total_count: u64,
    pub items: Vec<RawRepository>,
}

/// One search hit as GitHub returns it
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct RawRepository {
    pub id: u64,
    pub name: String,
    pub owner: Owner,
    pub stargazers_count: u64,
    pub forks: u64,
    pub updated_at: String,
    pub language: Option<String>,
    pub description: Option<String>,
    pub html_url: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Owner {
    pub login: String,
}

/// Display-ready projection of one search hit.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RepositorySummary {
    pub id: u64,
    pub name: String,
    pub owner: String,
    pub stars: u64,
    pub forks: u64,
    /// ISO-8601, as received
    pub last_update: String,
    pub language: Option<String>,
    pub description: String,
    pub url: String,
}

impl From<RawRepository> for RepositorySummary {
    fn from(raw: RawRepository) -> Self {
        Self {
            description: summarize_description(raw.description.as_deref()),
            id: raw.id,
            name: raw.name,
            owner: raw.owner.login,
            stars: raw.stargazers_count,
            forks: raw.forks,
            last_update: raw.updated_at,
            language: raw.language,
            url: raw.html_url,
        }
    }
}
