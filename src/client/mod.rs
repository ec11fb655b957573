//! Content API Client Module
//!
//! The remote side of every loader: typed access to the CMS-backed JSON API.

mod content_api;

pub use content_api::ContentApi;
