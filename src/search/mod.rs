//! Search Module
//!
//! Debounced, cache-first search for interactive query input.

mod pipeline;

pub use pipeline::{SearchPipeline, SearchState, MIN_QUERY_CHARS, SEARCH_DEBOUNCE};
