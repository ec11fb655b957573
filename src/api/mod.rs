//! API Module
//!
//! Local HTTP gateway serving cached content to UI clients.
//!
//! # Endpoints
//! - `GET /site`, `GET /page/:uuid`, `GET /search?q=` - Cached reads
//! - `POST /page/:uuid/refresh` - Manual refresh
//! - `GET /cache/status` - Cache introspection
//! - `DELETE /cache/pages/:uuid`, `DELETE /cache/search/:query`, `DELETE /cache` - Invalidation
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
