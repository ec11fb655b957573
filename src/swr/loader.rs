//! Stale-while-revalidate loader
//!
//! Serves cached values immediately and refreshes them in the background;
//! fetches inline only when nothing is cached.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::cache::{CachePolicy, CacheStatus, CacheStore, CachedValue, SharedCache};
use crate::error::{CacheResult, FetchResult};
use crate::swr::RemoteFetch;
use crate::tasks::{spawn_refresh, RefreshHandle};

// == Loaded ==
/// Outcome of [`SwrLoader::load`].
#[derive(Debug)]
pub struct Loaded<V> {
    pub value: V,
    /// Served from the cache rather than fetched inline
    pub from_cache: bool,
    /// The cached value was older than the cache TTL
    pub stale: bool,
    /// Background refresh started for a cache hit; `None` after an inline fetch
    pub refresh: Option<RefreshHandle<V>>,
}

// == SWR Loader ==
/// Wraps a [`RemoteFetch`] with a TTL/LRU cache.
///
/// Cloning is cheap and clones share the same cache.
pub struct SwrLoader<K, V> {
    name: &'static str,
    cache: SharedCache<K, V>,
    fetcher: Arc<dyn RemoteFetch<K, V>>,
}

impl<K, V> Clone for SwrLoader<K, V> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            cache: Arc::clone(&self.cache),
            fetcher: Arc::clone(&self.fetcher),
        }
    }
}

impl<K, V> SwrLoader<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug + fmt::Display + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates a loader with its own cache governed by `policy`.
    ///
    /// # Arguments
    /// * `name` - Label used in logs (e.g. "pages")
    /// * `policy` - TTL and capacity of the cache
    /// * `fetcher` - Source of fresh values
    pub fn new(
        name: &'static str,
        policy: CachePolicy,
        fetcher: Arc<dyn RemoteFetch<K, V>>,
    ) -> CacheResult<Self> {
        Ok(Self {
            name,
            cache: Arc::new(Mutex::new(CacheStore::new(policy)?)),
            fetcher,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    // == Load ==
    /// Returns the cached value for `key` at once, fresh or stale, and starts
    /// a background refresh. With nothing cached, fetches inline and
    /// propagates any fetch error.
    ///
    /// The refresh runs to completion even if the returned handle is dropped.
    pub async fn load(&self, key: K) -> FetchResult<Loaded<V>> {
        self.load_inner(key, CancellationToken::new()).await
    }

    /// Like [`SwrLoader::load`], with the background refresh tied to `cancel`.
    ///
    /// Cancelling the token aborts the refresh and leaves the cache as it was.
    pub async fn load_with_cancel(
        &self,
        key: K,
        cancel: CancellationToken,
    ) -> FetchResult<Loaded<V>> {
        self.load_inner(key, cancel).await
    }

    async fn load_inner(&self, key: K, cancel: CancellationToken) -> FetchResult<Loaded<V>> {
        let cached = self.cache.lock().await.get_any(&key);

        if let Some(CachedValue { value, stale, age }) = cached {
            debug!(
                cache = self.name,
                %key,
                stale,
                age_ms = age.as_millis() as u64,
                "serving cached value, refreshing in background"
            );
            let refresh = spawn_refresh(
                Arc::clone(&self.cache),
                Arc::clone(&self.fetcher),
                key,
                cancel,
            );
            return Ok(Loaded {
                value,
                from_cache: true,
                stale,
                refresh: Some(refresh),
            });
        }

        debug!(cache = self.name, %key, "cache miss, fetching");
        let value = self.fetch_and_store(key).await?;
        Ok(Loaded {
            value,
            from_cache: false,
            stale: false,
            refresh: None,
        })
    }

    // == Load Cached ==
    /// Cache-first read without revalidation.
    ///
    /// A value within the TTL is returned without touching the network; an
    /// absent or expired one is fetched inline and stored.
    pub async fn load_cached(&self, key: K) -> FetchResult<V> {
        let hit = {
            let mut cache = self.cache.lock().await;
            let ttl = cache.policy().ttl;
            cache.get(&key, ttl)
        };

        match hit {
            Some(value) => {
                debug!(cache = self.name, %key, "fresh cache hit");
                Ok(value)
            }
            None => self.fetch_and_store(key).await,
        }
    }

    // == Reload ==
    /// Fetches `key` and overwrites the cache, bypassing any cached value.
    pub async fn reload(&self, key: K) -> FetchResult<V> {
        debug!(cache = self.name, %key, "manual reload");
        self.fetch_and_store(key).await
    }

    async fn fetch_and_store(&self, key: K) -> FetchResult<V> {
        let value = self.fetcher.fetch(&key).await?;
        self.cache.lock().await.put(key, value.clone());
        Ok(value)
    }

    // == Cache Access ==
    /// Reads the cached value for `key` without any network activity.
    pub async fn cached(&self, key: &K) -> Option<CachedValue<V>> {
        self.cache.lock().await.get_any(key)
    }

    /// Stores `value` under `key` as if it had just been fetched.
    pub async fn put(&self, key: K, value: V) {
        self.cache.lock().await.put(key, value);
    }

    pub async fn has(&self, key: &K) -> bool {
        self.cache.lock().await.has(key)
    }

    /// Evicts a single entry; the next load fetches inline.
    pub async fn invalidate(&self, key: &K) -> bool {
        let removed = self.cache.lock().await.remove(key);
        debug!(cache = self.name, %key, removed, "invalidated");
        removed
    }

    /// Evicts everything, returning the number of entries dropped.
    pub async fn clear(&self) -> usize {
        let cleared = self.cache.lock().await.clear();
        debug!(cache = self.name, cleared, "cache cleared");
        cleared
    }

    pub async fn status(&self) -> CacheStatus {
        self.cache.lock().await.status()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::Notify;
    use tokio_test::{assert_pending, assert_ready, task};

    const TTL: Duration = Duration::from_secs(5 * 60);

    /// Fetcher returning a configurable result, optionally held back until
    /// its gate is opened.
    struct FakeFetcher {
        calls: AtomicUsize,
        result: std::sync::Mutex<FetchResult<String>>,
        gate: Option<Arc<Notify>>,
    }

    impl FakeFetcher {
        fn returning(value: &str) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                result: std::sync::Mutex::new(Ok(value.to_string())),
                gate: None,
            })
        }

        fn failing(err: FetchError) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                result: std::sync::Mutex::new(Err(err)),
                gate: None,
            })
        }

        fn gated(value: &str, gate: Arc<Notify>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                result: std::sync::Mutex::new(Ok(value.to_string())),
                gate: Some(gate),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn set_result(&self, result: FetchResult<String>) {
            *self.result.lock().unwrap() = result;
        }
    }

    #[async_trait]
    impl RemoteFetch<String, String> for FakeFetcher {
        async fn fetch(&self, _key: &String) -> FetchResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.result.lock().unwrap().clone()
        }
    }

    fn loader(fetcher: Arc<FakeFetcher>) -> SwrLoader<String, String> {
        SwrLoader::new("pages", CachePolicy::new(TTL, 50), fetcher).unwrap()
    }

    fn key(k: &str) -> String {
        k.to_string()
    }

    #[tokio::test]
    async fn test_miss_fetches_inline_and_caches() {
        let fetcher = FakeFetcher::returning("pageA");
        let loader = loader(fetcher.clone());

        let loaded = loader.load(key("p1")).await.unwrap();

        assert_eq!(loaded.value, "pageA");
        assert!(!loaded.from_cache);
        assert!(!loaded.stale);
        assert!(loaded.refresh.is_none());
        assert_eq!(fetcher.calls(), 1);
        assert!(loader.has(&key("p1")).await);
    }

    #[tokio::test]
    async fn test_miss_propagates_fetch_error() {
        let err = FetchError::http(404, "http://cms/mobile-api/page/p1");
        let loader = loader(FakeFetcher::failing(err.clone()));

        let result = loader.load(key("p1")).await;

        assert_eq!(result.unwrap_err(), err);
        assert!(!loader.has(&key("p1")).await);
    }

    #[tokio::test]
    async fn test_fresh_hit_still_refreshes_in_background() {
        let fetcher = FakeFetcher::returning("pageB");
        let loader = loader(fetcher.clone());
        loader.put(key("p1"), "pageA".to_string()).await;

        let loaded = loader.load(key("p1")).await.unwrap();

        assert_eq!(loaded.value, "pageA");
        assert!(loaded.from_cache);
        assert!(!loaded.stale);

        let updated = loaded.refresh.unwrap().updated().await;
        assert_eq!(updated.as_deref(), Some("pageB"));
        assert_eq!(fetcher.calls(), 1);
        assert_eq!(loader.cached(&key("p1")).await.unwrap().value, "pageB");
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_value_served_before_refresh_resolves() {
        let gate = Arc::new(Notify::new());
        let loader = loader(FakeFetcher::gated("new", gate.clone()));
        loader.put(key("p1"), "old".to_string()).await;
        tokio::time::advance(TTL + Duration::from_secs(60)).await;

        let loaded = loader.load(key("p1")).await.unwrap();
        assert_eq!(loaded.value, "old");
        assert!(loaded.from_cache);
        assert!(loaded.stale);

        let refresh = loaded.refresh.unwrap();
        tokio::task::yield_now().await;
        assert!(!refresh.is_finished());

        let mut updated = task::spawn(refresh.updated());
        assert_pending!(updated.poll());
        assert_eq!(loader.cached(&key("p1")).await.unwrap().value, "old");

        gate.notify_one();
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(assert_ready!(updated.poll()).as_deref(), Some("new"));

        let cached = loader.cached(&key("p1")).await.unwrap();
        assert_eq!(cached.value, "new");
        assert!(!cached.stale);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_cached_value() {
        let loader = loader(FakeFetcher::failing(FetchError::transport("offline")));
        loader.put(key("p1"), "pageA".to_string()).await;

        let loaded = loader.load(key("p1")).await.unwrap();
        assert_eq!(loaded.value, "pageA");

        assert_eq!(loaded.refresh.unwrap().updated().await, None);
        assert_eq!(loader.cached(&key("p1")).await.unwrap().value, "pageA");
    }

    #[tokio::test]
    async fn test_cancelled_refresh_does_not_touch_cache() {
        let gate = Arc::new(Notify::new());
        let loader = loader(FakeFetcher::gated("new", gate.clone()));
        loader.put(key("p1"), "old".to_string()).await;
        let cancel = CancellationToken::new();

        let loaded = loader
            .load_with_cancel(key("p1"), cancel.clone())
            .await
            .unwrap();
        cancel.cancel();
        gate.notify_one();

        assert_eq!(loaded.refresh.unwrap().updated().await, None);
        assert_eq!(loader.cached(&key("p1")).await.unwrap().value, "old");
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_handle_reports_completion() {
        let loader = loader(FakeFetcher::returning("new"));
        loader.put(key("p1"), "old".to_string()).await;

        let refresh = loader.load(key("p1")).await.unwrap().refresh.unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert!(refresh.is_finished());
        assert_eq!(refresh.updated().await.as_deref(), Some("new"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_detached_refresh_still_updates_cache() {
        let loader = loader(FakeFetcher::returning("new"));
        loader.put(key("p1"), "old".to_string()).await;

        let loaded = loader.load(key("p1")).await.unwrap();
        drop(loaded.refresh);
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(loader.cached(&key("p1")).await.unwrap().value, "new");
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_cached_only_fetches_on_miss_or_expiry() {
        let fetcher = FakeFetcher::returning("results");
        let loader = loader(fetcher.clone());

        assert_eq!(loader.load_cached(key("q")).await.unwrap(), "results");
        assert_eq!(loader.load_cached(key("q")).await.unwrap(), "results");
        assert_eq!(fetcher.calls(), 1);

        tokio::time::advance(TTL + Duration::from_secs(1)).await;
        fetcher.set_result(Ok("newer".to_string()));

        assert_eq!(loader.load_cached(key("q")).await.unwrap(), "newer");
        assert_eq!(fetcher.calls(), 2);
    }

    #[tokio::test]
    async fn test_reload_overwrites_and_propagates_errors() {
        let fetcher = FakeFetcher::returning("manual");
        let loader = loader(fetcher.clone());
        loader.put(key("p1"), "cached".to_string()).await;

        assert_eq!(loader.reload(key("p1")).await.unwrap(), "manual");
        assert_eq!(loader.cached(&key("p1")).await.unwrap().value, "manual");

        fetcher.set_result(Err(FetchError::http(500, "http://cms/page/p1")));
        assert!(matches!(
            loader.reload(key("p1")).await,
            Err(FetchError::Http { status_code: 500, .. })
        ));
        assert_eq!(loader.cached(&key("p1")).await.unwrap().value, "manual");
    }

    #[tokio::test]
    async fn test_invalidate_forces_inline_fetch() {
        let fetcher = FakeFetcher::returning("fresh");
        let loader = loader(fetcher.clone());
        loader.put(key("p1"), "cached".to_string()).await;

        assert!(loader.invalidate(&key("p1")).await);
        assert!(!loader.invalidate(&key("p1")).await);

        let loaded = loader.load(key("p1")).await.unwrap();
        assert!(!loaded.from_cache);
        assert_eq!(loaded.value, "fresh");
    }

    #[tokio::test]
    async fn test_clear_and_status() {
        let loader = loader(FakeFetcher::returning("x"));
        loader.put(key("a"), "1".to_string()).await;
        loader.put(key("b"), "2".to_string()).await;

        assert_eq!(loader.name(), "pages");
        let status = loader.status().await;
        assert_eq!(status.size, 2);
        assert_eq!(status.max_size, 50);
        let keys: Vec<_> = status.entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b"]);

        assert_eq!(loader.clear().await, 2);
        assert_eq!(loader.status().await.size, 0);
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        let result = SwrLoader::<String, String>::new(
            "broken",
            CachePolicy::new(TTL, 0),
            FakeFetcher::returning("x"),
        );
        assert!(result.is_err());
    }
}
