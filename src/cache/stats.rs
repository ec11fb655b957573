//! Read and eviction counters
//!
//! Stale hits are counted apart from fresh ones: a stale hit still serves the
//! caller but always implies a refetch.

use serde::Serialize;

// == Cache Stats ==
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Reads served by an entry within its TTL
    pub fresh_hits: u64,
    /// Reads served by an entry past its TTL
    pub stale_hits: u64,
    /// Reads that found nothing usable
    pub misses: u64,
    /// Entries dropped because a TTL-bounded read found them expired
    pub expirations: u64,
    /// Entries dropped to stay within capacity
    pub evictions: u64,
}

impl CacheStats {
    pub fn hits(&self) -> u64 {
        self.fresh_hits + self.stale_hits
    }

    /// Share of reads served from the cache, fresh or stale. 0.0 before the
    /// first read.
    pub fn hit_rate(&self) -> f64 {
        match self.hits() + self.misses {
            0 => 0.0,
            reads => self.hits() as f64 / reads as f64,
        }
    }

    pub(crate) fn record_hit(&mut self, stale: bool) {
        if stale {
            self.stale_hits += 1;
        } else {
            self.fresh_hits += 1;
        }
    }

    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// An expired entry was removed on read; this also counts as a miss.
    pub(crate) fn record_expiration(&mut self) {
        self.expirations += 1;
        self.misses += 1;
    }

    pub(crate) fn record_eviction(&mut self) {
        self.evictions += 1;
    }
}
