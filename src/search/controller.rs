use log::{debug, warn};

use crate::github::{RepositorySummary, SearchQuery, SearchRepositories};
use crate::http::FetchError;

use super::state::{Phase, SearchState};

/// The user action a request was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Submit,
    Next,
    Previous,
}

/// A page fetch that has been issued but not yet committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub generation: u64,
    pub transition: Transition,
    pub query: SearchQuery,
}

/// What a transition did to the state.
#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome {
    /// Results replaced with `count` items
    Loaded { count: usize },
    /// The next page was empty; nothing changed
    EndOfResults,
    /// The fetch failed. A failed submit or previous-page turn leaves an
    /// empty result list on the requested page; a failed next-page turn
    /// leaves the state as it was.
    Failed(FetchError),
    /// A newer request was issued meanwhile; the response was dropped
    Stale,
    /// Preconditions not met, nothing was fetched
    Ignored,
}

pub struct SearchController<S: SearchRepositories> {
    backend: S,
    state: SearchState,
    generation: u64,
    pending: Option<u64>,
}

impl<S: SearchRepositories> SearchController<S> {
    pub fn new(backend: S, page_size: u32) -> Self {
        Self {
            backend,
            state: SearchState::new(page_size),
            generation: 0,
            pending: None,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        if self.pending.is_some() {
            Phase::Loading
        } else {
            Phase::Idle
        }
    }

    /// Searches for `query` starting over at page 1.
    #[tracing::instrument(skip(self))]
    pub async fn submit(&mut self, query: &str) -> PageOutcome {
        match self.begin_submit(query) {
            Some(request) => self.run(request).await,
            None => PageOutcome::Ignored,
        }
    }

    /// Moves to the following page if it has any results.
    #[tracing::instrument(skip(self))]
    pub async fn next_page(&mut self) -> PageOutcome {
        match self.begin_next() {
            Some(request) => self.run(request).await,
            None => PageOutcome::Ignored,
        }
    }

    /// Moves back one page; no-op on the first page.
    #[tracing::instrument(skip(self))]
    pub async fn previous_page(&mut self) -> PageOutcome {
        match self.begin_previous() {
            Some(request) => self.run(request).await,
            None => PageOutcome::Ignored,
        }
    }

    /// Fetches a page without touching the state.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_page(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<RepositorySummary>, FetchError> {
        self.backend
            .search(&SearchQuery::new(query, page, page_size))
            .await
    }

    async fn run(&mut self, request: PageRequest) -> PageOutcome {
        let result = self.backend.search(&request.query).await;
        self.apply(request, result)
    }

    /// Issues a page-1 request for `query`. Returns `None` for blank input.
    pub fn begin_submit(&mut self, query: &str) -> Option<PageRequest> {
        let text = query.trim();
        if text.is_empty() {
            debug!("Ignoring blank query");
            return None;
        }
        Some(self.issue(Transition::Submit, text.to_string(), 1))
    }

    /// Issues a request for the page after the current one.
    pub fn begin_next(&mut self) -> Option<PageRequest> {
        if !self.state.has_query() {
            return None;
        }
        let page = self.state.current_page.saturating_add(1);
        Some(self.issue(Transition::Next, self.state.query_text.clone(), page))
    }

    /// Issues a request for the page before the current one.
    pub fn begin_previous(&mut self) -> Option<PageRequest> {
        if !self.state.has_query() || self.state.current_page <= 1 {
            return None;
        }
        let page = self.state.current_page - 1;
        Some(self.issue(Transition::Previous, self.state.query_text.clone(), page))
    }

    fn issue(&mut self, transition: Transition, text: String, page: u32) -> PageRequest {
        self.generation += 1;
        self.pending = Some(self.generation);
        PageRequest {
            generation: self.generation,
            transition,
            query: SearchQuery::new(text, page, self.state.page_size),
        }
    }

    /// Commits the response to `request`, unless a newer request was issued.
    pub fn apply(
        &mut self,
        request: PageRequest,
        result: Result<Vec<RepositorySummary>, FetchError>,
    ) -> PageOutcome {
        if request.generation != self.generation {
            debug!(
                "Discarding stale response for page {} (generation {}, latest {})",
                request.query.page, request.generation, self.generation
            );
            return PageOutcome::Stale;
        }
        self.pending = None;

        let PageRequest {
            transition, query, ..
        } = request;

        match (transition, result) {
            (Transition::Submit, Ok(items)) => {
                let count = items.len();
                self.commit(query, items);
                PageOutcome::Loaded { count }
            }
            (Transition::Submit, Err(e)) => {
                warn!("Search for {:?} failed: {}", query.text, e);
                self.commit(query, Vec::new());
                PageOutcome::Failed(e)
            }
            (Transition::Next, Ok(items)) if items.is_empty() => {
                debug!(
                    "Page {} of {:?} is empty, staying on page {}",
                    query.page, query.text, self.state.current_page
                );
                PageOutcome::EndOfResults
            }
            (Transition::Next | Transition::Previous, Ok(items)) => {
                let count = items.len();
                self.commit(query, items);
                PageOutcome::Loaded { count }
            }
            (Transition::Next, Err(e)) => {
                warn!(
                    "Fetching page {} of {:?} failed: {}",
                    query.page, query.text, e
                );
                PageOutcome::Failed(e)
            }
            (Transition::Previous, Err(e)) => {
                warn!(
                    "Fetching page {} of {:?} failed: {}",
                    query.page, query.text, e
                );
                self.commit(query, Vec::new());
                PageOutcome::Failed(e)
            }
        }
    }

    fn commit(&mut self, query: SearchQuery, items: Vec<RepositorySummary>) {
        self.state.query_text = query.text;
        self.state.current_page = query.page;
        self.state.results = items;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::MockSearchRepositories;

    fn summary(id: u64, stars: u64) -> RepositorySummary {
        RepositorySummary {
            id,
            name: format!("repo-{}", id),
            owner: "owner".to_string(),
            stars,
            forks: 0,
            last_update: "2023-03-05T08:03:07Z".to_string(),
            language: None,
            description: "No description.".to_string(),
            url: format!("https://github.com/owner/repo-{}", id),
        }
    }

    /// Eight results whose ids start at `(page - 1) * 8`.
    fn page_of(page: u32) -> Vec<RepositorySummary> {
        let first = u64::from(page - 1) * 8;
        (first..first + 8)
            .map(|id| summary(id, 1000 - id))
            .collect()
    }

    /// Serves full pages for any query and page.
    fn paging_backend() -> MockSearchRepositories {
        let mut backend = MockSearchRepositories::new();
        backend
            .expect_search()
            .returning(|q| Ok(page_of(q.page)));
        backend
    }

    #[tokio::test]
    async fn test_submit_loads_first_page() {
        let mut backend = MockSearchRepositories::new();
        backend
            .expect_search()
            .withf(|q| q.text == "react" && q.page == 1 && q.per_page == 8)
            .times(1)
            .returning(|_| Ok(page_of(1)));

        let mut controller = SearchController::new(backend, 8);
        let outcome = controller.submit("react").await;

        assert_eq!(outcome, PageOutcome::Loaded { count: 8 });
        assert_eq!(controller.state().query_text, "react");
        assert_eq!(controller.state().current_page, 1);
        assert_eq!(controller.state().results, page_of(1));
        assert_eq!(controller.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn test_submit_resets_page() {
        let mut controller = SearchController::new(paging_backend(), 8);

        controller.submit("react").await;
        controller.next_page().await;
        controller.next_page().await;
        assert_eq!(controller.state().current_page, 3);

        let outcome = controller.submit("vue").await;

        assert_eq!(outcome, PageOutcome::Loaded { count: 8 });
        assert_eq!(controller.state().current_page, 1);
        assert_eq!(controller.state().query_text, "vue");
        assert_eq!(controller.state().results, page_of(1));
    }

    #[tokio::test]
    async fn test_submit_blank_is_ignored() {
        // No expectations: any fetch would panic.
        let backend = MockSearchRepositories::new();
        let mut controller = SearchController::new(backend, 8);
        let before = controller.state().clone();

        assert_eq!(controller.submit("").await, PageOutcome::Ignored);
        assert_eq!(controller.submit("   ").await, PageOutcome::Ignored);
        assert_eq!(controller.state(), &before);
    }

    #[tokio::test]
    async fn test_submit_failure_clears_results() {
        let mut backend = MockSearchRepositories::new();
        backend
            .expect_search()
            .withf(|q| q.text == "react")
            .returning(|q| Ok(page_of(q.page)));
        backend
            .expect_search()
            .withf(|q| q.text == "broken")
            .returning(|_| Err(FetchError::Status(500)));

        let mut controller = SearchController::new(backend, 8);
        controller.submit("react").await;
        controller.next_page().await;

        let outcome = controller.submit("broken").await;

        assert_eq!(outcome, PageOutcome::Failed(FetchError::Status(500)));
        assert!(controller.state().results.is_empty());
        assert_eq!(controller.state().current_page, 1);
        assert_eq!(controller.state().query_text, "broken");
    }

    #[tokio::test]
    async fn test_next_page_advances() {
        let mut controller = SearchController::new(paging_backend(), 8);
        controller.submit("react").await;

        let outcome = controller.next_page().await;

        assert_eq!(outcome, PageOutcome::Loaded { count: 8 });
        assert_eq!(controller.state().current_page, 2);
        assert_eq!(controller.state().results, page_of(2));
    }

    #[tokio::test]
    async fn test_next_page_empty_does_not_advance() {
        let mut backend = MockSearchRepositories::new();
        backend
            .expect_search()
            .withf(|q| q.page == 1)
            .returning(|_| Ok(page_of(1)));
        backend
            .expect_search()
            .withf(|q| q.page == 2)
            .times(1)
            .returning(|_| Ok(vec![]));

        let mut controller = SearchController::new(backend, 8);
        controller.submit("react").await;

        let outcome = controller.next_page().await;

        assert_eq!(outcome, PageOutcome::EndOfResults);
        assert_eq!(controller.state().current_page, 1);
        assert_eq!(controller.state().results, page_of(1));
        assert_eq!(controller.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn test_next_page_without_query_is_ignored() {
        let backend = MockSearchRepositories::new();
        let mut controller = SearchController::new(backend, 8);

        assert_eq!(controller.next_page().await, PageOutcome::Ignored);
        assert_eq!(controller.state().current_page, 1);
    }

    #[tokio::test]
    async fn test_next_page_failure_keeps_state() {
        let mut backend = MockSearchRepositories::new();
        backend
            .expect_search()
            .withf(|q| q.page == 1)
            .returning(|_| Ok(page_of(1)));
        backend
            .expect_search()
            .withf(|q| q.page == 2)
            .returning(|_| Err(FetchError::RateLimited("Too many requests".to_string())));

        let mut controller = SearchController::new(backend, 8);
        controller.submit("react").await;

        let outcome = controller.next_page().await;

        assert!(matches!(outcome, PageOutcome::Failed(FetchError::RateLimited(_))));
        assert_eq!(controller.state().current_page, 1);
        assert_eq!(controller.state().results, page_of(1));
    }

    #[tokio::test]
    async fn test_previous_page_on_first_page_is_ignored() {
        let mut backend = MockSearchRepositories::new();
        backend
            .expect_search()
            .times(1)
            .returning(|_| Ok(page_of(1)));

        let mut controller = SearchController::new(backend, 8);
        controller.submit("react").await;
        let before = controller.state().clone();

        assert_eq!(controller.previous_page().await, PageOutcome::Ignored);
        assert_eq!(controller.state(), &before);
    }

    #[tokio::test]
    async fn test_previous_page_decrements() {
        let mut controller = SearchController::new(paging_backend(), 8);
        controller.submit("react").await;
        controller.next_page().await;
        controller.next_page().await;

        let outcome = controller.previous_page().await;

        assert_eq!(outcome, PageOutcome::Loaded { count: 8 });
        assert_eq!(controller.state().current_page, 2);
        assert_eq!(controller.state().results, page_of(2));
    }

    #[tokio::test]
    async fn test_previous_page_failure_clears_results() {
        let mut backend = MockSearchRepositories::new();
        backend
            .expect_search()
            .withf(|q| q.page == 1)
            .returning(|_| Err(FetchError::Status(500)));

        let mut controller = SearchController::new(backend, 8);
        controller.state.query_text = "react".to_string();
        controller.state.current_page = 2;
        controller.state.results = vec![summary(9, 10)];

        let outcome = controller.previous_page().await;

        assert_eq!(outcome, PageOutcome::Failed(FetchError::Status(500)));
        assert_eq!(controller.state().current_page, 1);
        assert!(controller.state().results.is_empty());
        assert_eq!(controller.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn test_fetch_page_does_not_touch_state() {
        let mut backend = MockSearchRepositories::new();
        backend
            .expect_search()
            .withf(|q| q.text == "tokio" && q.page == 5 && q.per_page == 3)
            .returning(|_| Ok(vec![summary(1, 10)]));

        let controller = SearchController::new(backend, 8);
        let items = controller.fetch_page("tokio", 5, 3).await.unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(controller.state(), &SearchState::new(8));
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let backend = MockSearchRepositories::new();
        let mut controller = SearchController::new(backend, 8);

        let first = controller.begin_submit("react").unwrap();
        let second = controller.begin_submit("vue").unwrap();
        assert!(second.generation > first.generation);
        assert_eq!(controller.phase(), Phase::Loading);

        let outcome = controller.apply(second, Ok(vec![summary(2, 20)]));
        assert_eq!(outcome, PageOutcome::Loaded { count: 1 });
        assert_eq!(controller.phase(), Phase::Idle);

        let outcome = controller.apply(first, Ok(vec![summary(1, 10)]));
        assert_eq!(outcome, PageOutcome::Stale);
        assert_eq!(controller.state().query_text, "vue");
        assert_eq!(controller.state().results, vec![summary(2, 20)]);
    }

    #[test]
    fn test_stale_response_keeps_loading() {
        let backend = MockSearchRepositories::new();
        let mut controller = SearchController::new(backend, 8);

        let first = controller.begin_submit("react").unwrap();
        let _second = controller.begin_submit("vue").unwrap();

        assert_eq!(controller.apply(first, Ok(vec![])), PageOutcome::Stale);
        assert_eq!(controller.phase(), Phase::Loading);
        assert!(controller.state().query_text.is_empty());
    }

    #[test]
    fn test_begin_submit_trims_query() {
        let backend = MockSearchRepositories::new();
        let mut controller = SearchController::new(backend, 8);

        let request = controller.begin_submit("  react  ").unwrap();
        assert_eq!(request.query, SearchQuery::new("react", 1, 8));
        assert_eq!(request.transition, Transition::Submit);
    }

    #[test]
    fn test_begin_previous_requires_query() {
        let backend = MockSearchRepositories::new();
        let mut controller = SearchController::new(backend, 8);
        controller.state.current_page = 4;

        assert!(controller.begin_previous().is_none());
        assert_eq!(controller.phase(), Phase::Idle);
    }
}
