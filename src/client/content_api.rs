//! HTTP client for the content API
//!
//! Every call is a single attempt bounded by the configured timeout. Basic
//! credentials and the API key header are attached to each request.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::cache::{SearchKey, SiteKey};
use crate::config::Config;
use crate::error::{FetchError, FetchResult};
use crate::models::{Page, SearchResult, SiteData};
use crate::swr::RemoteFetch;

/// Client for `GET /mobile-api`, `/mobile-api/page/{uuid}` and
/// `/mobile-api/search?q=`.
#[derive(Debug, Clone)]
pub struct ContentApi {
    client: Client,
    base_url: String,
    basic_auth: Option<(String, Option<String>)>,
    api_key: Option<(String, String)>,
}

impl ContentApi {
    /// Builds a client from configuration.
    pub fn new(config: &Config) -> FetchResult<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            basic_auth: config
                .api_username
                .clone()
                .map(|user| (user, config.api_password.clone())),
            api_key: config
                .api_key
                .clone()
                .map(|key| (config.api_key_header.clone(), key)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the site menu and metadata.
    pub async fn site(&self) -> FetchResult<SiteData> {
        let url = self.endpoint(&["mobile-api"])?;
        self.get_json(url, &[]).await
    }

    /// Fetches a page document by its identifier.
    ///
    /// The identifier is sent as a single percent-encoded path segment.
    pub async fn page(&self, uuid: &str) -> FetchResult<Page> {
        let url = self.endpoint(&["mobile-api", "page", uuid])?;
        self.get_json(url, &[]).await
    }

    /// Runs a full-text search.
    pub async fn search(&self, query: &str) -> FetchResult<Vec<SearchResult>> {
        let url = self.endpoint(&["mobile-api", "search"])?;
        self.get_json(url, &[("q", query)]).await
    }

    // == URL Building ==
    /// Appends `segments` to the base URL, encoding each one.
    fn endpoint(&self, segments: &[&str]) -> FetchResult<Url> {
        let invalid = || FetchError::transport(format!("invalid base URL: {}", self.base_url));

        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
    ) -> FetchResult<T> {
        debug!(%url, "requesting content");
        let mut request = self.client.get(url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some((user, password)) = &self.basic_auth {
            request = request.basic_auth(user, password.as_ref());
        }
        if let Some((header, key)) = &self.api_key {
            request = request.header(header.as_str(), key.as_str());
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::http(status.as_u16(), response.url().as_str()));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl RemoteFetch<String, Page> for ContentApi {
    async fn fetch(&self, uuid: &String) -> FetchResult<Page> {
        self.page(uuid).await
    }
}

#[async_trait]
impl RemoteFetch<SearchKey, Vec<SearchResult>> for ContentApi {
    async fn fetch(&self, key: &SearchKey) -> FetchResult<Vec<SearchResult>> {
        self.search(key.as_str()).await
    }
}

#[async_trait]
impl RemoteFetch<SiteKey, SiteData> for ContentApi {
    async fn fetch(&self, _key: &SiteKey) -> FetchResult<SiteData> {
        self.site().await
    }
}
