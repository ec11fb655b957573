//! Response DTOs for the gateway API
//!
//! Defines the structure of outgoing HTTP response bodies.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cache::CacheStatus;
use crate::swr::Loaded;

/// Envelope for every cached read (`/site`, `/page/:uuid`, `/search`)
#[derive(Debug, Clone, Serialize)]
pub struct LoadResponse<T> {
    pub data: T,
    /// True when served from the cache without waiting for the network
    pub from_cache: bool,
    /// True when the cached copy is older than its TTL
    pub stale: bool,
}

impl<T> LoadResponse<T> {
    /// Wraps a freshly fetched value.
    pub fn fresh(data: T) -> Self {
        Self {
            data,
            from_cache: false,
            stale: false,
        }
    }
}

impl<T> From<Loaded<T>> for LoadResponse<T> {
    fn from(loaded: Loaded<T>) -> Self {
        // The background refresh handle is dropped here; the task keeps running
        // and updates the cache for the next read.
        Self {
            data: loaded.value,
            from_cache: loaded.from_cache,
            stale: loaded.stale,
        }
    }
}

/// Response body for `GET /cache/status`
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub site: CacheStatus,
    pub pages: CacheStatus,
    pub search: CacheStatus,
    pub timestamp: DateTime<Utc>,
}

/// Response body for the invalidation endpoints
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    pub message: String,
    pub key: String,
    pub removed: bool,
}

impl InvalidateResponse {
    pub fn new(key: impl Into<String>, removed: bool) -> Self {
        let key = key.into();
        let message = if removed {
            format!("Key '{}' invalidated", key)
        } else {
            format!("Key '{}' was not cached", key)
        };
        Self {
            message,
            key,
            removed,
        }
    }
}

/// Response body for `DELETE /cache`
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
    /// Number of entries dropped across all caches
    pub cleared: usize,
}

impl ClearResponse {
    pub fn new(cleared: usize) -> Self {
        Self {
            message: format!("Cleared {} cached entries", cleared),
            cleared,
        }
    }
}

/// Response body for `GET /health`
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
