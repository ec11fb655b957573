//! API Routes
//!
//! Configures the Axum router with all gateway endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_handler, health_handler, invalidate_page_handler, invalidate_search_handler,
    page_handler, refresh_page_handler, search_handler, site_handler, status_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /site` - Site menu and metadata
/// - `GET /page/:uuid` - Page document
/// - `POST /page/:uuid/refresh` - Refetch a page, bypassing the cache
/// - `GET /search?q=` - Search results
/// - `GET /cache/status` - Entries, ages and counters of every cache
/// - `DELETE /cache/pages/:uuid` - Invalidate one page
/// - `DELETE /cache/search/:query` - Invalidate one search
/// - `DELETE /cache` - Clear every cache
/// - `GET /health` - Health check endpoint
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/site", get(site_handler))
        .route("/page/:uuid", get(page_handler))
        .route("/page/:uuid/refresh", post(refresh_page_handler))
        .route("/search", get(search_handler))
        .route("/cache", delete(clear_handler))
        .route("/cache/status", get(status_handler))
        .route("/cache/pages/:uuid", delete(invalidate_page_handler))
        .route("/cache/search/:query", delete(invalidate_search_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
