use anyhow::Result;
use std::process::ExitCode;
use std::sync::Arc;

use search_bench::bench::{BenchmarkConfig, BenchmarkRunner, MockSearchServer};
use search_bench::config::{Config, Mode};
use search_bench::error::{exit_code_of, BenchError};
use search_bench::search::HttpSearchBackend;

/// Connect timeout for the search service in seconds
const CONNECT_TIMEOUT_SECS: u64 = 10;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::from(2);
        }
    };

    // Initialize logging with a configured level; stdout is reserved for results
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.log_level.to_lowercase()));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Benchmark failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_code_of(&e) as u8)
        }
    }
}

async fn run(config: Config) -> Result<()> {
    match config.mode {
        Mode::Remote { url } => {
            let backend = HttpSearchBackend::new(&url, CONNECT_TIMEOUT_SECS, config.timeout_secs)
                .map_err(BenchError::from)?;
            tracing::info!(url = %backend.base_url(), "Benchmarking search service");

            run_benchmark(config.benchmark, Arc::new(backend), config.json_output).await
        }

        Mode::Standalone(mock_config) => {
            let mut mock_server = MockSearchServer::new(mock_config);
            let port = mock_server
                .start()
                .await
                .map_err(|e| BenchError::Startup(format!("mock search server: {:#}", e)))?;
            if !config.json_output {
                println!("Mock search server started on port {}", port);
            }

            // Benchmark the mock server over HTTP, same as a remote run
            let backend =
                HttpSearchBackend::new(&mock_server.url(), CONNECT_TIMEOUT_SECS, config.timeout_secs)
                    .map_err(BenchError::from)?;
            let result = run_benchmark(config.benchmark, Arc::new(backend), config.json_output).await;

            mock_server.stop();
            result
        }
    }
}

async fn run_benchmark(
    config: BenchmarkConfig,
    backend: Arc<HttpSearchBackend>,
    json_output: bool,
) -> Result<()> {
    if !json_output {
        println!("Starting search performance test...");
        println!(
            "Running {} searches with {} results per page\n",
            config.query_count, config.page_size
        );
    }

    let mut runner = BenchmarkRunner::new(config, backend);
    let report = runner.run().await?;

    if json_output {
        println!("{}", report.to_json()?);
    } else {
        report.print();
    }

    // The summary is already out; a missing index block still fails the run
    if let Some(reason) = report.index_error {
        return Err(BenchError::IndexInfo(reason).into());
    }

    Ok(())
}
