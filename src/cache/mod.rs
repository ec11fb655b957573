//! Cache Module
//!
//! Provides in-memory caching with TTL staleness and LRU eviction.

mod entry;
mod key;
mod lru;
mod stats;
mod store;


use std::sync::Arc;

use tokio::sync::Mutex;

// Re-export public types
pub use entry::CacheEntry;
pub use key::{CachePolicy, SearchKey, SiteKey};
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::{CacheStatus, CacheStore, CachedValue, EntryStatus};

/// A cache instance shared between the loader and its background refreshes.
pub type SharedCache<K, V> = Arc<Mutex<CacheStore<K, V>>>;
