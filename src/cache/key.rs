//! Cache keys and per-kind policies.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

// == Cache Policy ==
/// TTL and capacity of one cache instance, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// Age after which an entry is considered stale
    pub ttl: Duration,
    /// Maximum number of entries held at once
    pub max_size: usize,
}

impl CachePolicy {
    /// Page documents: 5 minutes, 50 entries.
    pub const PAGES: CachePolicy = CachePolicy::new(Duration::from_secs(5 * 60), 50);

    /// Search results: 2 minutes, 20 queries.
    pub const SEARCH: CachePolicy = CachePolicy::new(Duration::from_secs(2 * 60), 20);

    /// Site menu and metadata: a single document refreshed every 5 minutes.
    pub const SITE: CachePolicy = CachePolicy::new(Duration::from_secs(5 * 60), 1);

    pub const fn new(ttl: Duration, max_size: usize) -> Self {
        Self { ttl, max_size }
    }
}

// == Search Key ==
/// Normalized search query used as a cache key.
///
/// Queries that differ only in surrounding whitespace or letter case map to
/// the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SearchKey(String);

impl SearchKey {
    pub fn new(query: &str) -> Self {
        Self(query.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of characters in the normalized query.
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl From<&str> for SearchKey {
    fn from(query: &str) -> Self {
        Self::new(query)
    }
}

impl From<String> for SearchKey {
    fn from(query: String) -> Self {
        Self::new(&query)
    }
}

impl fmt::Display for SearchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// == Site Key ==
/// The site document has exactly one cache slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SiteKey;

impl fmt::Display for SiteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("site")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_key_normalization() {
        assert_eq!(SearchKey::from("  Hello World  "), SearchKey::from("hello world"));
        assert_eq!(SearchKey::new("\tRUST\n").as_str(), "rust");
    }

    #[test]
    fn test_search_key_keeps_inner_whitespace() {
        assert_ne!(SearchKey::new("hello world"), SearchKey::new("helloworld"));
    }

    #[test]
    fn test_search_key_char_count() {
        assert_eq!(SearchKey::new("  ab ").char_count(), 2);
        assert_eq!(SearchKey::new("Äbc").char_count(), 3);
    }

    #[test]
    fn test_policies() {
        assert_eq!(CachePolicy::PAGES.ttl, Duration::from_secs(300));
        assert_eq!(CachePolicy::PAGES.max_size, 50);
        assert_eq!(CachePolicy::SEARCH.ttl, Duration::from_secs(120));
        assert_eq!(CachePolicy::SEARCH.max_size, 20);
    }
}
