//! Background Refresh Task
//!
//! Re-fetches a cached key off the caller's path and writes the result back
//! into the cache.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::cache::SharedCache;
use crate::swr::RemoteFetch;

// == Refresh Handle ==
/// Handle on a running background refresh.
///
/// Dropping the handle detaches the task; it still runs to completion and
/// updates the cache.
#[derive(Debug)]
pub struct RefreshHandle<V> {
    handle: JoinHandle<Option<V>>,
}

impl<V> RefreshHandle<V> {
    /// Waits for the refresh and returns the fresh value, or `None` when the
    /// fetch failed or the refresh was cancelled.
    pub async fn updated(self) -> Option<V> {
        self.handle.await.ok().flatten()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Spawns a refresh of `key`.
///
/// On success the cache entry is replaced (last write wins against any other
/// writer of the same key). Failures are logged and swallowed. Once `cancel`
/// fires the result is discarded and the cache is left untouched.
///
/// # Example
/// ```ignore
/// let handle = spawn_refresh(cache.clone(), fetcher.clone(), key, CancellationToken::new());
/// if let Some(fresh) = handle.updated().await {
///     render(fresh);
/// }
/// ```
pub fn spawn_refresh<K, V>(
    cache: SharedCache<K, V>,
    fetcher: Arc<dyn RemoteFetch<K, V>>,
    key: K,
    cancel: CancellationToken,
) -> RefreshHandle<V>
where
    K: Eq + Hash + Clone + fmt::Debug + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    let handle = tokio::spawn(async move {
        let result = tokio::select! {
            _ = cancel.cancelled() => {
                debug!(?key, "background refresh cancelled before completion");
                return None;
            }
            result = fetcher.fetch(&key) => result,
        };

        match result {
            Ok(value) => {
                let mut cache = cache.lock().await;
                if cancel.is_cancelled() {
                    debug!(?key, "background refresh cancelled, discarding result");
                    return None;
                }
                debug!(?key, "background refresh stored fresh value");
                cache.put(key, value.clone());
                Some(value)
            }
            Err(err) => {
                warn!(?key, error = %err, "background refresh failed, keeping cached value");
                None
            }
        }
    });

    RefreshHandle { handle }
}
