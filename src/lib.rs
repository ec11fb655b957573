//! Content Cache - stale-while-revalidate caching for a mobile content API
//!
//! Pages, search results and the site document are held in bounded TTL/LRU
//! caches. Cached data is served immediately and refreshed in the background;
//! the network is only waited on when nothing is cached.

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod search;
pub mod swr;
pub mod tasks;

pub use api::AppState;
pub use cache::{CachePolicy, CacheStore, SearchKey, SiteKey};
pub use client::ContentApi;
pub use config::Config;
pub use error::{CacheError, FetchError};
pub use search::{SearchPipeline, SearchState};
pub use swr::{Loaded, RemoteFetch, SwrLoader};
