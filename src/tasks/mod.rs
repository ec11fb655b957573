//! Background Tasks Module
//!
//! Contains work spawned off the caller's path.
//!
//! # Tasks
//! - Refresh: re-fetches a cached key and stores the result

mod refresh;

pub use refresh::{spawn_refresh, RefreshHandle};
