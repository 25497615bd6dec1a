//! View state machine
//!
//! Each screen that fetches something moves through the same four states.
//! Transitions go through [`ViewState::reduce`] instead of ad hoc flags.
//!
//! ```text
//!            Fetch / Retry
//!   any ────────────────────► Loading
//!   Loading ─ Resolved(Some) ► Loaded
//!   Loading ─ Resolved(None) ► Empty
//!   Loading ─ Failed ────────► Error
//! ```
//!
//! A `Resolved`/`Failed` event that arrives outside `Loading` is a late
//! result for a view that has moved on; it is dropped.

use tracing::trace;

use crate::errors::{Result, TinyLinkError};

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Loaded(T),
    Empty,
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent<T> {
    Fetch,
    Resolved(Option<T>),
    Failed(String),
    /// Manual re-trigger after an error.
    Retry,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        ViewState::Loading
    }
}

impl<T> ViewState<T> {
    pub fn reduce(self, event: ViewEvent<T>) -> Self {
        match (self, event) {
            (_, ViewEvent::Fetch) | (_, ViewEvent::Retry) => ViewState::Loading,
            (ViewState::Loading, ViewEvent::Resolved(Some(value))) => ViewState::Loaded(value),
            (ViewState::Loading, ViewEvent::Resolved(None)) => ViewState::Empty,
            (ViewState::Loading, ViewEvent::Failed(msg)) => ViewState::Error(msg),
            (state, _) => {
                trace!("Dropping late view event in state {}", state.name());
                state
            }
        }
    }

    /// Event for a finished fetch. `NotFound` is an empty result, not an error.
    pub fn event_for(result: Result<Option<T>>) -> ViewEvent<T> {
        match result {
            Ok(value) => ViewEvent::Resolved(value),
            Err(TinyLinkError::NotFound(_)) => ViewEvent::Resolved(None),
            Err(e) => ViewEvent::Failed(e.message().to_string()),
        }
    }

    /// Fold a completed fetch straight into a fresh view.
    pub fn from_result(result: Result<Option<T>>) -> Self {
        ViewState::Loading.reduce(Self::event_for(result))
    }

    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Loading => "Loading",
            ViewState::Loaded(_) => "Loaded",
            ViewState::Empty => "Empty",
            ViewState::Error(_) => "Error",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            ViewState::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> ViewState<Vec<T>> {
    /// Lists with no items render as `Empty`.
    pub fn from_items(result: Result<Vec<T>>) -> Self {
        Self::from_result(result.map(|items| (!items.is_empty()).then_some(items)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let state = ViewState::<u32>::default();
        assert!(state.is_loading());
        let state = state.reduce(ViewEvent::Resolved(Some(5)));
        assert_eq!(state, ViewState::Loaded(5));
        assert_eq!(state.loaded(), Some(&5));
    }

    #[test]
    fn test_resolved_none_is_empty() {
        let state = ViewState::<u32>::Loading.reduce(ViewEvent::Resolved(None));
        assert_eq!(state, ViewState::Empty);
    }

    #[test]
    fn test_error_then_retry() {
        let state = ViewState::<u32>::Loading.reduce(ViewEvent::Failed("Server not reachable".into()));
        assert_eq!(state, ViewState::Error("Server not reachable".into()));
        let state = state.reduce(ViewEvent::Retry);
        assert!(state.is_loading());
    }

    #[test]
    fn test_late_result_is_dropped() {
        let state = ViewState::Loaded(1).reduce(ViewEvent::Resolved(Some(2)));
        assert_eq!(state, ViewState::Loaded(1));
        let state = ViewState::<u32>::Empty.reduce(ViewEvent::Failed("late".into()));
        assert_eq!(state, ViewState::Empty);
    }

    #[test]
    fn test_not_found_maps_to_empty() {
        let state = ViewState::<u32>::from_result(Err(TinyLinkError::not_found("URL not found")));
        assert_eq!(state, ViewState::Empty);
    }

    #[test]
    fn test_server_error_keeps_message() {
        let state = ViewState::<u32>::from_result(Err(TinyLinkError::server("Failed to fetch URL data")));
        assert_eq!(state, ViewState::Error("Failed to fetch URL data".into()));
    }

    #[test]
    fn test_from_items() {
        assert_eq!(ViewState::<Vec<u8>>::from_items(Ok(vec![])), ViewState::Empty);
        assert_eq!(ViewState::from_items(Ok(vec![1u8])), ViewState::Loaded(vec![1]));
    }
}
