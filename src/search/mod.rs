//! Query state and page navigation.
//!
//! [`SearchController`] owns a [`SearchState`] and moves it between pages by
//! issuing requests through a [`SearchRepositories`](crate::github::SearchRepositories)
//! backend. Each transition is a [`PageRequest`] tagged with a generation;
//! only the response to the most recently issued request is committed.

mod controller;
mod state;

pub use controller::{PageOutcome, PageRequest, SearchController, Transition};
pub use state::{Phase, SearchState};
