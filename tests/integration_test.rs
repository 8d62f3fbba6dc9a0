// Integration tests for Search Bench
//
// These tests run the benchmark end to end against the mock search server,
// going through the HTTP backend the same way the CLI does.

use std::sync::Arc;

use search_bench::bench::{
    BenchmarkConfig, BenchmarkRunner, ManualClock, MockSearchServer, MockServerConfig, Rating,
};
use search_bench::error::BenchError;
use search_bench::search::{
    HttpSearchBackend, MemoryBackend, SearchBackend, SearchIndex, SearchQuery,
};

// ==================================================================================================
// Test Helpers
// ==================================================================================================

fn mock_config() -> MockServerConfig {
    MockServerConfig {
        articles: 200,
        drafts: 25,
        seed: Some(11),
        ..Default::default()
    }
}

fn bench_config(query_count: usize) -> BenchmarkConfig {
    BenchmarkConfig {
        query_count,
        delay_ms: 0,
        seed: Some(2024),
        progress: false,
        keep_samples: true,
        ..Default::default()
    }
}

async fn start_server(config: MockServerConfig) -> (MockSearchServer, Arc<HttpSearchBackend>) {
    let mut server = MockSearchServer::new(config);
    server.start().await.expect("mock server should start");
    let backend = HttpSearchBackend::new(&server.url(), 5, 5).expect("client should build");
    (server, Arc::new(backend))
}

// ==================================================================================================
// End-to-end runs
// ==================================================================================================

#[tokio::test]
async fn test_run_against_mock_server() {
    let (mut server, backend) = start_server(mock_config()).await;

    let report = BenchmarkRunner::new(bench_config(20), backend)
        .run()
        .await
        .expect("benchmark should succeed");

    assert_eq!(report.summary.count, 20);
    assert_eq!(report.samples.len(), 20);

    let total: f64 = report.samples.iter().map(|s| s.latency_ms).sum();
    assert!((report.summary.total_time_ms - total).abs() < 1e-6);
    assert!(report.summary.min_ms <= report.summary.median_ms);
    assert!(report.summary.median_ms <= report.summary.max_ms);

    assert!(report.index_error.is_none());
    let info = report.index.as_ref().expect("index info should load");
    assert_eq!(info.total_items, 200);
    assert_eq!(info.indexed_items, 175);
    assert_eq!(info.pending_items(), 25);
    assert_eq!(info.backend_id, "memory");

    server.stop();
}

#[tokio::test]
async fn test_result_counts_reflect_corpus() {
    let (mut server, backend) = start_server(mock_config()).await;

    let config = BenchmarkConfig {
        terms: vec!["article".to_string()],
        page_size: 5,
        ..bench_config(3)
    };
    let report = BenchmarkRunner::new(config, backend).run().await.unwrap();

    // Every published body mentions its article number
    assert!(report.samples.iter().all(|s| s.result_count == 175));
    assert!((report.summary.avg_results - 175.0).abs() < 1e-9);

    server.stop();
}

#[tokio::test]
async fn test_missing_index_over_http() {
    let (mut server, backend) = start_server(mock_config()).await;

    let config = BenchmarkConfig {
        index_name: "missing".to_string(),
        ..bench_config(5)
    };
    let err = BenchmarkRunner::new(config, backend).run().await.unwrap_err();

    assert!(matches!(err, BenchError::IndexUnavailable(_)));
    assert_eq!(err.exit_code(), 1);

    server.stop();
}

#[tokio::test]
async fn test_server_errors_abort_run() {
    let (mut server, backend) = start_server(MockServerConfig {
        error_rate: 1.0,
        ..mock_config()
    })
    .await;

    let err = BenchmarkRunner::new(bench_config(5), backend)
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, BenchError::Search(_)));
    assert_eq!(err.exit_code(), 3);

    server.stop();
}

#[tokio::test]
async fn test_zero_queries_rejected() {
    let (mut server, backend) = start_server(mock_config()).await;

    let err = BenchmarkRunner::new(bench_config(0), backend)
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, BenchError::InvalidConfig(_)));
    assert_eq!(err.exit_code(), 2);

    server.stop();
}

// ==================================================================================================
// In-process backend
// ==================================================================================================

#[tokio::test]
async fn test_memory_backend_with_manual_clock() {
    let server = MockSearchServer::new(mock_config());
    let backend = Arc::new(MemoryBackend::new().with_index("content", server.index()));
    let clock = Arc::new(ManualClock::new());

    let config = BenchmarkConfig {
        delay_ms: 10,
        ..bench_config(10)
    };
    let report = BenchmarkRunner::new(config, backend)
        .with_clock(clock.clone())
        .run()
        .await
        .unwrap();

    // The manual clock never moves during a query
    assert_eq!(report.summary.total_time_ms, 0.0);
    assert_eq!(report.summary.throughput_per_sec, 0.0);
    assert_eq!(report.summary.rating, Rating::Excellent);
    assert_eq!(clock.sleep_count(), 9);
}

#[tokio::test]
async fn test_publish_clears_pending_items() {
    let server = MockSearchServer::new(mock_config());
    let index = server.index();
    let backend = MemoryBackend::new().with_index("content", index.clone());

    let resolved = backend.resolve("content").await.unwrap().unwrap();
    let before = resolved.info().await.unwrap();
    assert_eq!(before.pending_items(), 25);

    let drafts_hit = resolved
        .query(&SearchQuery::first_page("article", 10))
        .await
        .unwrap()
        .result_count();

    assert_eq!(index.publish_all(), 25);

    let after = resolved.info().await.unwrap();
    assert_eq!(after.pending_items(), 0);

    let all_hit = resolved
        .query(&SearchQuery::first_page("article", 10))
        .await
        .unwrap()
        .result_count();
    assert_eq!(all_hit, drafts_hit + 25);
}
