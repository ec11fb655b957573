//! Stale-While-Revalidate Module
//!
//! Combines a cache with a remote fetch: cached data is returned at once and
//! refreshed in the background; fetches happen inline only on a miss.

mod fetch;
mod loader;

pub use fetch::RemoteFetch;
pub use loader::{Loaded, SwrLoader};
