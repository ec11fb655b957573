//! Debounced search-as-you-type
//!
//! Each keystroke supersedes the previous one: its timer and any request it
//! started are cancelled. A query is only searched after a quiet period, and
//! only if it is long enough. The search cache is consulted first, so the
//! content API is called on a miss only.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::cache::SearchKey;
use crate::models::SearchResult;
use crate::swr::SwrLoader;

/// Quiet period after the last keystroke before a search is issued.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Shortest query, after trimming, that is sent to the content API.
pub const MIN_QUERY_CHARS: usize = 3;

/// What a search screen renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchState {
    /// Query as typed
    pub query: String,
    pub results: Vec<SearchResult>,
    /// A request for `query` is in flight
    pub loading: bool,
    /// Message of the last failed search for `query`
    pub error: Option<String>,
}

/// Single-query front end to the search cache.
pub struct SearchPipeline {
    loader: SwrLoader<SearchKey, Vec<SearchResult>>,
    quiet_period: Duration,
    min_chars: usize,
    state: Arc<watch::Sender<SearchState>>,
    pending: Mutex<Option<CancellationToken>>,
}

impl SearchPipeline {
    /// Creates a pipeline with the standard 500 ms debounce and 3 character
    /// minimum.
    pub fn new(loader: SwrLoader<SearchKey, Vec<SearchResult>>) -> Self {
        Self::with_settings(loader, SEARCH_DEBOUNCE, MIN_QUERY_CHARS)
    }

    pub fn with_settings(
        loader: SwrLoader<SearchKey, Vec<SearchResult>>,
        quiet_period: Duration,
        min_chars: usize,
    ) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        Self {
            loader,
            quiet_period,
            min_chars,
            state: Arc::new(state),
            pending: Mutex::new(None),
        }
    }

    /// Receiver notified whenever the search state changes.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    // == Set Query ==
    /// Records a keystroke.
    ///
    /// Must be called from within a tokio runtime.
    pub fn set_query(&self, query: impl Into<String>) {
        let query = query.into();
        let key = SearchKey::new(&query);

        if key.char_count() < self.min_chars {
            self.supersede(None);
            self.state.send_modify(|state| {
                state.query = query;
                state.results.clear();
                state.loading = false;
                state.error = None;
            });
            return;
        }

        let cancel = CancellationToken::new();
        self.supersede(Some(cancel.clone()));
        self.state.send_modify(|state| {
            state.query = query.clone();
            state.loading = false;
            state.error = None;
        });

        tokio::spawn(run_search(
            self.loader.clone(),
            Arc::clone(&self.state),
            key,
            query,
            cancel,
            self.quiet_period,
        ));
    }

    // == Cancel ==
    /// Drops any pending timer or in-flight request.
    pub fn cancel(&self) {
        self.supersede(None);
        self.state.send_if_modified(|state| std::mem::replace(&mut state.loading, false));
    }

    /// Installs `next` as the pending search, cancelling the previous one.
    fn supersede(&self, next: Option<CancellationToken>) {
        let previous = std::mem::replace(&mut *self.pending_slot(), next);
        if let Some(previous) = previous {
            previous.cancel();
        }
    }

    fn pending_slot(&self) -> MutexGuard<'_, Option<CancellationToken>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for SearchPipeline {
    fn drop(&mut self) {
        if let Some(pending) = self.pending_slot().take() {
            pending.cancel();
        }
    }
}

async fn run_search(
    loader: SwrLoader<SearchKey, Vec<SearchResult>>,
    state: Arc<watch::Sender<SearchState>>,
    key: SearchKey,
    query: String,
    cancel: CancellationToken,
    quiet_period: Duration,
) {
    tokio::select! {
        _ = cancel.cancelled() => return,
        _ = tokio::time::sleep(quiet_period) => {}
    }

    let is_current = |state: &SearchState| !cancel.is_cancelled() && state.query == query;

    state.send_if_modified(|state| {
        if !is_current(state) {
            return false;
        }
        state.loading = true;
        true
    });

    debug!(%key, "searching");
    let result = tokio::select! {
        _ = cancel.cancelled() => {
            debug!(%key, "search superseded while in flight");
            return;
        }
        result = loader.load_cached(key.clone()) => result,
    };

    state.send_if_modified(|state| {
        if !is_current(state) {
            return false;
        }
        state.loading = false;
        match result {
            Ok(results) => {
                state.results = results;
                state.error = None;
            }
            Err(err) => {
                debug!(%key, error = %err, "search failed");
                state.results.clear();
                state.error = Some(err.to_string());
            }
        }
        true
    });
}
