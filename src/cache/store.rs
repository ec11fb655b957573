//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking and TTL
//! classification.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::cache::{CacheEntry, CachePolicy, CacheStats, LruTracker};
use crate::error::{CacheError, CacheResult};

// == Cached Value ==
/// A value read without regard to freshness.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedValue<V> {
    pub value: V,
    /// True when the entry is older than the cache TTL
    pub stale: bool,
    pub age: Duration,
}

// == Status Snapshot ==
/// Introspection view of a single entry.
#[derive(Debug, Clone, Serialize)]
pub struct EntryStatus {
    pub key: String,
    pub age_ms: u64,
    pub stale: bool,
    pub cached_at: DateTime<Utc>,
}

/// Introspection view of a whole cache, entries listed from least to most
/// recently used.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatus {
    pub size: usize,
    pub max_size: usize,
    pub ttl_ms: u64,
    pub entries: Vec<EntryStatus>,
    pub stats: CacheStats,
    pub hit_rate: f64,
}

// == Cache Store ==
/// Bounded key/value store with LRU eviction and TTL-based staleness.
///
/// Every key present in `entries` is tracked exactly once by `lru`, and the
/// number of entries never exceeds the policy's `max_size` once a call
/// returns.
#[derive(Debug)]
pub struct CacheStore<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    lru: LruTracker<K>,
    stats: CacheStats,
    policy: CachePolicy,
}

impl<K, V> CacheStore<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: Clone,
{
    // == Constructor ==
    /// Creates an empty store governed by `policy`.
    ///
    /// Fails when the policy cannot hold a single entry.
    pub fn new(policy: CachePolicy) -> CacheResult<Self> {
        if policy.max_size < 1 {
            return Err(CacheError::InvalidCapacity(policy.max_size));
        }

        Ok(Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::default(),
            policy,
        })
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    // == Get ==
    /// Returns the value for `key` if it is no older than `ttl`.
    ///
    /// An entry past its TTL is removed and reported as absent. A hit marks
    /// the key most recently used.
    pub fn get(&mut self, key: &K, ttl: Duration) -> Option<V> {
        let Some(entry) = self.entries.get(key) else {
            self.stats.record_miss();
            return None;
        };

        if entry.is_stale(ttl) {
            debug!(?key, age_ms = entry.age().as_millis() as u64, "cache entry expired");
            self.entries.remove(key);
            self.lru.remove(key);
            self.stats.record_expiration();
            return None;
        }

        let value = entry.value.clone();
        self.stats.record_hit(false);
        self.lru.touch(key);
        Some(value)
    }

    // == Get Any ==
    /// Returns the value for `key` whatever its age, flagged stale when older
    /// than the policy TTL. Never removes the entry.
    pub fn get_any(&mut self, key: &K) -> Option<CachedValue<V>> {
        let Some(entry) = self.entries.get(key) else {
            self.stats.record_miss();
            return None;
        };

        let cached = CachedValue {
            value: entry.value.clone(),
            stale: entry.is_stale(self.policy.ttl),
            age: entry.age(),
        };
        self.stats.record_hit(cached.stale);
        self.lru.touch(key);
        Some(cached)
    }

    // == Has ==
    /// Existence check that ignores freshness and leaves recency untouched.
    pub fn has(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    // == Put ==
    /// Inserts or overwrites `key`, stamping it with the current time.
    ///
    /// The key becomes most recently used; least recently used entries are
    /// evicted until the store fits its capacity again.
    pub fn put(&mut self, key: K, value: V) {
        self.entries.insert(key.clone(), CacheEntry::new(value));
        self.lru.touch(&key);

        while self.entries.len() > self.policy.max_size {
            // The fresh key sits at the tail and max_size >= 1, so it is never
            // the one popped here.
            let Some(evicted) = self.lru.evict_oldest() else {
                break;
            };
            self.entries.remove(&evicted);
            self.stats.record_eviction();
            debug!(key = ?evicted, "evicted least recently used entry");
        }
    }

    // == Remove ==
    /// Deletes `key`, returning whether it was present.
    pub fn remove(&mut self, key: &K) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.lru.remove(key);
        }
        removed
    }

    // == Clear ==
    /// Deletes every entry, returning how many were dropped.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        self.lru.clear();
        count
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> CacheStore<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug + fmt::Display,
    V: Clone,
{
    // == Status ==
    /// Snapshot of every entry with its age and staleness.
    pub fn status(&self) -> CacheStatus {
        let entries = self
            .lru
            .iter()
            .filter_map(|key| {
                self.entries.get(key).map(|entry| EntryStatus {
                    key: key.to_string(),
                    age_ms: entry.age().as_millis() as u64,
                    stale: entry.is_stale(self.policy.ttl),
                    cached_at: entry.cached_at,
                })
            })
            .collect();

        CacheStatus {
            size: self.entries.len(),
            max_size: self.policy.max_size,
            ttl_ms: self.policy.ttl.as_millis() as u64,
            entries,
            hit_rate: self.stats.hit_rate(),
            stats: self.stats,
        }
    }
}
