//! HTTP search backend.
//!
//! Talks to a search service exposing:
//! - `GET {base}/indexes/{name}` returning [`IndexInfo`] (404 when unknown)
//! - `GET {base}/indexes/{name}/search?keys=&limit=&offset=` returning [`ResultSet`]

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

use super::{IndexInfo, ResultSet, SearchBackend, SearchError, SearchIndex, SearchQuery};

/// Search backend reached over HTTP
pub struct HttpSearchBackend {
    /// Shared HTTP client with connection pooling
    client: Client,

    /// Base URL of the search service
    base_url: Url,
}

impl HttpSearchBackend {
    /// Create a new backend for `base_url`
    pub fn new(base_url: &str, connect_timeout: u64, request_timeout: u64) -> Result<Self, SearchError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| SearchError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(SearchError::InvalidUrl(base_url.to_string()));
        }

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout))
            .timeout(Duration::from_secs(request_timeout))
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of an index, with the name encoded as a single path segment
    pub fn index_url(&self, index: &str) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("indexes").push(index);
        }
        url
    }
}

#[async_trait]
impl SearchBackend for HttpSearchBackend {
    async fn resolve(&self, index: &str) -> Result<Option<Arc<dyn SearchIndex>>, SearchError> {
        let url = self.index_url(index);
        tracing::debug!(url = %url, "Resolving search index");

        let response = self.client.get(url.clone()).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!(index, "Search index not found");
            return Ok(None);
        }

        // A resolvable index must describe itself
        let info: IndexInfo = decode(response).await?;
        tracing::debug!(index, label = %info.label, "Resolved search index");

        Ok(Some(Arc::new(HttpSearchIndex {
            client: self.client.clone(),
            index_url: url,
        })))
    }
}

/// A remote index resolved through [`HttpSearchBackend`]
pub struct HttpSearchIndex {
    client: Client,
    index_url: Url,
}

#[async_trait]
impl SearchIndex for HttpSearchIndex {
    async fn query(&self, query: &SearchQuery) -> Result<ResultSet, SearchError> {
        let mut url = self.index_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push("search");
        }
        let limit = query.limit.to_string();
        let offset = query.offset.to_string();

        let response = self
            .client
            .get(url)
            .query(&[
                ("keys", query.keys.as_str()),
                ("limit", limit.as_str()),
                ("offset", offset.as_str()),
            ])
            .send()
            .await?;

        decode(response).await
    }

    async fn info(&self) -> Result<IndexInfo, SearchError> {
        let response = self.client.get(self.index_url.clone()).send().await?;
        decode(response).await
    }
}

/// Check the status and decode a JSON body
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, SearchError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        tracing::warn!(status = %status, "Search service returned an error");
        return Err(SearchError::Status {
            status: status.as_u16(),
            message: body,
        });
    }

    serde_json::from_str(&body).map_err(|e| SearchError::Decode(e.to_string()))
}
