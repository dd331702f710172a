use crate::github::RepositorySummary;

/// Whether a page request is waiting for its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
}

/// Everything the result view shows.
///
/// `results` always belongs to `current_page` of `query_text`: both are
/// replaced together when a response is committed.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    pub query_text: String,
    /// 1-based
    pub current_page: u32,
    pub page_size: u32,
    pub results: Vec<RepositorySummary>,
}

impl SearchState {
    pub fn new(page_size: u32) -> Self {
        Self {
            query_text: String::new(),
            current_page: 1,
            page_size,
            results: Vec::new(),
        }
    }

    pub fn has_query(&self) -> bool {
        !self.query_text.trim().is_empty()
    }
}
