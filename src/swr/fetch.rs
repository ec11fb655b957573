//! The remote fetch capability wrapped by the loader.

use async_trait::async_trait;

use crate::error::FetchResult;

/// Fetches the authoritative value for a key from somewhere slow.
///
/// The loader treats every implementation alike, whether it fetches pages,
/// search results or the site document.
#[async_trait]
pub trait RemoteFetch<K, V>: Send + Sync {
    async fn fetch(&self, key: &K) -> FetchResult<V>;
}
