//! Mock search server exposing an in-memory index over HTTP.
//!
//! Serves the wire format expected by [`HttpSearchBackend`](crate::search::HttpSearchBackend),
//! seeded with a synthetic news corpus.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use rand::Rng;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::trace::TraceLayer;

use super::config::MockServerConfig;
use crate::corpus::CorpusGenerator;
use crate::search::{MemoryBackend, MemoryIndex, SearchQuery};

const DEFAULT_LIMIT: usize = 10;

/// Shared state of the mock server
struct MockState {
    backend: MemoryBackend,
    latency_ms: u64,
    error_rate: f64,
}

/// Mock search server for benchmarking
pub struct MockSearchServer {
    config: MockServerConfig,
    index: Arc<MemoryIndex>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    port: u16,
}

impl MockSearchServer {
    /// Create a new mock server and seed its index
    pub fn new(config: MockServerConfig) -> Self {
        let index = Arc::new(MemoryIndex::new("Content", "Mock search server"));
        let docs = CorpusGenerator::new(config.seed).generate(config.articles, config.drafts);
        index.insert_all(docs);

        tracing::info!(
            articles = config.articles,
            drafts = config.drafts,
            "Seeded mock search index"
        );

        Self {
            config,
            index,
            shutdown_tx: None,
            port: 0,
        }
    }

    /// The index served by this server
    pub fn index(&self) -> Arc<MemoryIndex> {
        self.index.clone()
    }

    /// Start the mock server and return the actual port
    pub async fn start(&mut self) -> anyhow::Result<u16> {
        let addr = format!("127.0.0.1:{}", self.config.port);
        let listener = TcpListener::bind(&addr).await?;
        let port = listener.local_addr()?.port();
        self.port = port;

        let app = self.router();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        self.shutdown_tx = Some(shutdown_tx);

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .ok();
        });

        tracing::info!(port, "Mock search server listening");
        Ok(port)
    }

    /// Build the router without binding a socket
    pub fn router(&self) -> Router {
        let backend = MemoryBackend::new().with_index(self.config.index_name.clone(), self.index.clone());
        let state = Arc::new(MockState {
            backend,
            latency_ms: self.config.latency_ms,
            error_rate: self.config.error_rate,
        });

        Router::new()
            .route("/health", get(handle_health))
            .route("/indexes/:name", get(handle_info))
            .route("/indexes/:name/search", get(handle_search))
            .route("/indexes/:name/publish", post(handle_publish))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Get the server's URL
    pub fn url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockSearchServer {
    fn drop(&mut self) {
        self.stop();
    }
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    keys: String,
    limit: Option<usize>,
    offset: Option<usize>,
}

fn not_found(name: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": format!("Unknown index: {}", name) })),
    )
        .into_response()
}

async fn handle_health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy" }))
}

async fn handle_info(State(state): State<Arc<MockState>>, Path(name): Path<String>) -> Response {
    match state.backend.get(&name) {
        Some(index) => Json(index.index_info()).into_response(),
        None => not_found(&name),
    }
}

async fn handle_search(
    State(state): State<Arc<MockState>>,
    Path(name): Path<String>,
    Query(params): Query<SearchParams>,
) -> Response {
    let Some(index) = state.backend.get(&name) else {
        return not_found(&name);
    };

    if state.latency_ms > 0 {
        tokio::time::sleep(tokio::time::Duration::from_millis(state.latency_ms)).await;
    }

    // Simulate random errors
    if state.error_rate > 0.0 && rand::thread_rng().gen::<f64>() < state.error_rate {
        return (StatusCode::INTERNAL_SERVER_ERROR, "Simulated error").into_response();
    }

    let query = SearchQuery {
        keys: params.keys,
        limit: params.limit.unwrap_or(DEFAULT_LIMIT),
        offset: params.offset.unwrap_or(0),
    };
    Json(index.search(&query)).into_response()
}

async fn handle_publish(State(state): State<Arc<MockState>>, Path(name): Path<String>) -> Response {
    match state.backend.get(&name) {
        Some(index) => Json(json!({ "published": index.publish_all() })).into_response(),
        None => not_found(&name),
    }
}
