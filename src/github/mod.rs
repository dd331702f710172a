mod client;
mod query;
mod types;

pub use client::{DEFAULT_API_URL, GitHub, SearchRepositories};
pub use query::{DEFAULT_PER_PAGE, NAME_QUALIFIER, SearchQuery};
pub use types::{Owner, RawRepository, RepositorySummary, SearchResponse};

#[cfg(test)]
pub use client::MockSearchRepositories;
