//! API Handlers
//!
//! HTTP request handlers for each gateway endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use tracing::info;

use crate::cache::{CachePolicy, SearchKey, SiteKey};
use crate::client::ContentApi;
use crate::config::Config;
use crate::error::{Error, FetchResult};
use crate::models::{
    ClearResponse, HealthResponse, InvalidateResponse, LoadResponse, Page, SearchParams,
    SearchResult, SiteData, StatusResponse,
};
use crate::search::MIN_QUERY_CHARS;
use crate::swr::{RemoteFetch, SwrLoader};

/// Application state shared across all handlers.
///
/// One loader per data kind; each owns an independent cache.
#[derive(Clone)]
pub struct AppState {
    pub site: SwrLoader<SiteKey, SiteData>,
    pub pages: SwrLoader<String, Page>,
    pub search: SwrLoader<SearchKey, Vec<SearchResult>>,
}

impl AppState {
    /// Creates state whose three caches are all backed by `fetcher`.
    pub fn new<F>(fetcher: Arc<F>) -> Result<Self, Error>
    where
        F: RemoteFetch<SiteKey, SiteData>
            + RemoteFetch<String, Page>
            + RemoteFetch<SearchKey, Vec<SearchResult>>
            + 'static,
    {
        let site: Arc<dyn RemoteFetch<SiteKey, SiteData>> = fetcher.clone();
        let pages: Arc<dyn RemoteFetch<String, Page>> = fetcher.clone();
        let search: Arc<dyn RemoteFetch<SearchKey, Vec<SearchResult>>> = fetcher;

        Ok(Self {
            site: SwrLoader::new("site", CachePolicy::SITE, site)?,
            pages: SwrLoader::new("pages", CachePolicy::PAGES, pages)?,
            search: SwrLoader::new("search", CachePolicy::SEARCH, search)?,
        })
    }

    /// Creates state backed by the content API described in `config`.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let api = ContentApi::new(config)?;
        info!(base_url = api.base_url(), "content API client ready");
        Self::new(Arc::new(api))
    }
}

/// Handler for GET /site
pub async fn site_handler(
    State(state): State<AppState>,
) -> FetchResult<Json<LoadResponse<SiteData>>> {
    let loaded = state.site.load(SiteKey).await?;
    Ok(Json(loaded.into()))
}

/// Handler for GET /page/:uuid
///
/// Serves the cached page at once, fresh or stale, and refreshes it in the
/// background. Pages never seen before are fetched inline.
pub async fn page_handler(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> FetchResult<Json<LoadResponse<Page>>> {
    let loaded = state.pages.load(uuid).await?;
    Ok(Json(loaded.into()))
}

/// Handler for POST /page/:uuid/refresh
pub async fn refresh_page_handler(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> FetchResult<Json<LoadResponse<Page>>> {
    let page = state.pages.reload(uuid).await?;
    Ok(Json(LoadResponse::fresh(page)))
}

/// Handler for GET /search?q=
///
/// Queries shorter than the search minimum return no results without
/// contacting the content API.
pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> FetchResult<Json<LoadResponse<Vec<SearchResult>>>> {
    if !params.is_searchable(MIN_QUERY_CHARS) {
        return Ok(Json(LoadResponse::fresh(Vec::new())));
    }

    let loaded = state.search.load(params.key()).await?;
    Ok(Json(loaded.into()))
}

/// Handler for GET /cache/status
pub async fn status_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        site: state.site.status().await,
        pages: state.pages.status().await,
        search: state.search.status().await,
        timestamp: Utc::now(),
    })
}

/// Handler for DELETE /cache/pages/:uuid
pub async fn invalidate_page_handler(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> Json<InvalidateResponse> {
    let removed = state.pages.invalidate(&uuid).await;
    Json(InvalidateResponse::new(uuid, removed))
}

/// Handler for DELETE /cache/search/:query
pub async fn invalidate_search_handler(
    State(state): State<AppState>,
    Path(query): Path<String>,
) -> Json<InvalidateResponse> {
    let key = SearchKey::new(&query);
    let removed = state.search.invalidate(&key).await;
    Json(InvalidateResponse::new(key.to_string(), removed))
}

/// Handler for DELETE /cache
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let cleared =
        state.site.clear().await + state.pages.clear().await + state.search.clear().await;
    info!(cleared, "all caches cleared");
    Json(ClearResponse::new(cleared))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
