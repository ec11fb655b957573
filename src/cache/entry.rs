//! Cache Entry Module
//!
//! Defines a single cached value together with the time it was written.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::Instant;

// == Cache Entry ==
/// Represents a single cache entry with its value and write timestamps.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Monotonic time of the last write, used for age and staleness
    pub inserted_at: Instant,
    /// Wall-clock time of the last write, reported by status output
    pub cached_at: DateTime<Utc>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry stamped with the current time.
    pub fn new(value: V) -> Self {
        Self {
            value,
            inserted_at: Instant::now(),
            cached_at: Utc::now(),
        }
    }

    // == Age ==
    /// Time elapsed since the entry was last written.
    pub fn age(&self) -> Duration {
        self.inserted_at.elapsed()
    }

    // == Is Stale ==
    /// Checks whether the entry has outlived `ttl`.
    ///
    /// An entry exactly `ttl` old is still fresh; it turns stale once its age
    /// strictly exceeds the TTL.
    pub fn is_stale(&self, ttl: Duration) -> bool {
        self.age() > ttl
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_new_entry_is_fresh() {
        let entry = CacheEntry::new("page");

        assert_eq!(entry.value, "page");
        assert_eq!(entry.age(), Duration::ZERO);
        assert!(!entry.is_stale(Duration::from_secs(1)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_turns_stale_after_ttl() {
        let entry = CacheEntry::new(42);
        let ttl = Duration::from_secs(120);

        tokio::time::advance(Duration::from_secs(121)).await;

        assert!(entry.is_stale(ttl));
        assert_eq!(entry.age(), Duration::from_secs(121));
    }

    #[tokio::test(start_paused = true)]
    async fn test_staleness_boundary() {
        let entry = CacheEntry::new(());
        let ttl = Duration::from_secs(60);

        // Exactly at the TTL the entry is still fresh
        tokio::time::advance(ttl).await;
        assert!(!entry.is_stale(ttl));

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(entry.is_stale(ttl));
    }
}
