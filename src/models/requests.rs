//! Request DTOs for the gateway API
//!
//! Defines the query parameters accepted by the search endpoint.

use serde::Deserialize;

use crate::cache::SearchKey;

/// Query string of `GET /search?q=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    /// Raw query as typed by the user
    #[serde(default)]
    pub q: String,
}

impl SearchParams {
    /// Normalized cache key for this query.
    pub fn key(&self) -> SearchKey {
        SearchKey::new(&self.q)
    }

    /// Whether the query is long enough to be sent to the content API.
    pub fn is_searchable(&self, min_chars: usize) -> bool {
        self.key().char_count() >= min_chars
    }
}
