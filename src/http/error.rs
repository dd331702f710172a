//! Failure classification for search requests.

use reqwest::StatusCode;
use reqwest::header::HeaderMap;

/// Header GitHub uses to report the remaining request quota.
const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";

/// A failed fetch. Every variant ends up as an empty result page for the user,
/// but callers can still tell the cases apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Connection refused, DNS failure, timeout and the like
    Transport(String),
    /// HTTP 429, or 403 with an exhausted quota
    RateLimited(String),
    /// Any other non-2xx response
    Status(u16),
    /// The body was not the JSON we expected
    Parse(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Transport(msg) => write!(f, "Network error: {}", msg),
            FetchError::RateLimited(msg) => {
                write!(f, "Rate limit exceeded: {}. Try again later.", msg)
            }
            FetchError::Status(code) => write!(f, "HTTP {} error", code),
            FetchError::Parse(msg) => write!(f, "Failed to parse JSON response: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            return FetchError::Parse(error.to_string());
        }
        if let Some(status) = error.status() {
            return FetchError::Status(status.as_u16());
        }
        if error.is_timeout() {
            return FetchError::Transport("request timed out".to_string());
        }
        FetchError::Transport(error.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(error: serde_json::Error) -> Self {
        FetchError::Parse(error.to_string())
    }
}

/// Maps a non-success status to a [`FetchError`].
pub fn classify_status(status: StatusCode, headers: &HeaderMap) -> FetchError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => FetchError::RateLimited("Too many requests".to_string()),
        StatusCode::FORBIDDEN if quota_exhausted(headers) => {
            FetchError::RateLimited("GitHub API rate limit exceeded".to_string())
        }
        s => FetchError::Status(s.as_u16()),
    }
}

fn quota_exhausted(headers: &HeaderMap) -> bool {
    headers
        .get(RATE_LIMIT_REMAINING)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim() == "0")
        .unwrap_or(false)
}
