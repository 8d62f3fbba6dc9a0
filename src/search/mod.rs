//! Search collaborator contract.
//!
//! The benchmark never talks to a search engine directly. It resolves an
//! index through a [`SearchBackend`] and issues queries against the returned
//! [`SearchIndex`]. Two backends ship with the crate:
//! - [`HttpSearchBackend`] for a remote search service speaking JSON over HTTP
//! - [`MemoryBackend`] for an in-process index (used by the mock server and tests)

pub mod http;
pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

pub use http::HttpSearchBackend;
pub use memory::{Document, MemoryBackend, MemoryIndex};

/// Errors raised by a search collaborator
#[derive(Error, Debug)]
pub enum SearchError {
    /// Transport-level failure (connect, timeout, broken body)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service URL cannot address an index
    #[error("Invalid service URL: {0}")]
    InvalidUrl(String),

    /// The service answered with a non-success status
    #[error("Search service error: {status} - {message}")]
    Status { status: u16, message: String },

    /// The response body could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// The backend failed while executing the query
    #[error("Query failed: {0}")]
    Query(String),
}

/// A single search request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub keys: String,
    pub limit: usize,
    pub offset: usize,
}

impl SearchQuery {
    /// First page of results for `keys`
    pub fn first_page(keys: impl Into<String>, limit: usize) -> Self {
        Self {
            keys: keys.into(),
            limit,
            offset: 0,
        }
    }
}

/// A returned result row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultItem {
    pub id: u64,
    pub title: String,
}

/// Results of one executed query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSet {
    /// Total number of matches, independent of the page window
    pub result_count: u64,
    /// The requested page of matches
    #[serde(default)]
    pub items: Vec<ResultItem>,
}

impl ResultSet {
    pub fn result_count(&self) -> u64 {
        self.result_count
    }
}

/// Index metadata reported after a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexInfo {
    /// Human-readable index name
    pub label: String,
    /// Human-readable name of the server hosting the index
    pub server_label: String,
    /// Identifier of the backend implementation
    pub backend_id: String,
    /// Items already present in the index
    pub indexed_items: u64,
    /// All items tracked for the index, indexed or not
    pub total_items: u64,
}

impl IndexInfo {
    /// Items still waiting to be indexed
    pub fn pending_items(&self) -> u64 {
        self.total_items.saturating_sub(self.indexed_items)
    }
}

/// A resolved, queryable index
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Execute a query and return its result set
    async fn query(&self, query: &SearchQuery) -> Result<ResultSet, SearchError>;

    /// Fetch index metadata
    async fn info(&self) -> Result<IndexInfo, SearchError>;
}

/// Entry point to a search service
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Resolve an index by machine name. `Ok(None)` means the index does not exist.
    async fn resolve(&self, index: &str) -> Result<Option<Arc<dyn SearchIndex>>, SearchError>;
}
