//! Sequential benchmark runner.

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;

use super::clock::{Clock, TokioClock};
use super::config::BenchmarkConfig;
use super::report::BenchmarkReport;
use super::stats::{QuerySample, RunSummary};
use crate::error::{BenchError, Result};
use crate::search::{SearchBackend, SearchIndex, SearchQuery};

/// Benchmark runner that executes queries against a search index one at a time
pub struct BenchmarkRunner {
    config: BenchmarkConfig,
    backend: Arc<dyn SearchBackend>,
    clock: Arc<dyn Clock>,
    rng: StdRng,
}

impl BenchmarkRunner {
    /// Create a new benchmark runner using the tokio clock
    pub fn new(config: BenchmarkConfig, backend: Arc<dyn SearchBackend>) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            config,
            backend,
            clock: Arc::new(TokioClock::new()),
            rng,
        }
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Run the full benchmark and build the report.
    ///
    /// Fails before issuing any query when the configuration is invalid or the
    /// index cannot be resolved. Any failing query aborts the run. A failing
    /// index info call does not: it is recorded in the report instead.
    pub async fn run(&mut self) -> Result<BenchmarkReport> {
        self.config.validate()?;

        let index = self
            .backend
            .resolve(&self.config.index_name)
            .await?
            .ok_or_else(|| BenchError::IndexUnavailable(self.config.index_name.clone()))?;

        tracing::info!(
            index = %self.config.index_name,
            queries = self.config.query_count,
            page_size = self.config.page_size,
            "Starting benchmark"
        );

        if self.config.warmup_queries > 0 {
            self.warmup(index.as_ref()).await;
        }

        let started_at = Utc::now();
        let query_count = self.config.query_count;
        let delay = Duration::from_millis(self.config.delay_ms);
        let mut samples = Vec::with_capacity(query_count);

        for i in 0..query_count {
            let sample = self.measure(index.as_ref()).await?;

            if self.config.progress {
                println!("{}", sample.progress_line(i + 1));
            }
            samples.push(sample);

            // Throttle between queries, not after the last one
            if i + 1 < query_count && !delay.is_zero() {
                self.clock.sleep(delay).await;
            }
        }

        let finished_at = Utc::now();

        let summary = RunSummary::from_samples(&samples).ok_or_else(|| {
            BenchError::InvalidConfig("benchmark produced no samples".to_string())
        })?;

        // A completed run keeps its summary even when the metadata call fails
        let (info, index_error) = match index.info().await {
            Ok(info) => (Some(info), None),
            Err(e) => {
                tracing::warn!("Failed to load index information: {}", e);
                (None, Some(e.to_string()))
            }
        };

        tracing::info!(
            avg_ms = summary.avg_ms,
            p95_ms = summary.p95_ms,
            rating = %summary.rating,
            "Benchmark complete"
        );

        Ok(BenchmarkReport {
            index_name: self.config.index_name.clone(),
            started_at,
            finished_at,
            page_size: self.config.page_size,
            summary,
            index: info,
            index_error,
            samples: if self.config.keep_samples {
                samples
            } else {
                Vec::new()
            },
        })
    }

    /// Run unmeasured warmup queries
    async fn warmup(&mut self, index: &dyn SearchIndex) {
        tracing::info!(count = self.config.warmup_queries, "Running warmup queries");

        for _ in 0..self.config.warmup_queries {
            if let Err(e) = self.measure(index).await {
                tracing::warn!("Warmup query failed: {}", e);
            }
        }
    }

    /// Execute one query with a random term and time it
    async fn measure(&mut self, index: &dyn SearchIndex) -> Result<QuerySample> {
        let term = self.pick_term();
        let query = SearchQuery::first_page(term.clone(), self.config.page_size);

        let start = self.clock.now();
        let results = index.query(&query).await?;
        let end = self.clock.now();

        let latency_ms = end.saturating_sub(start).as_secs_f64() * 1000.0;
        let result_count = results.result_count();

        tracing::debug!(term = %term, result_count, latency_ms, "Query executed");

        Ok(QuerySample {
            term,
            latency_ms,
            result_count,
        })
    }

    /// Pick a term uniformly at random, with replacement
    fn pick_term(&mut self) -> String {
        let idx = self.rng.gen_range(0..self.config.terms.len());
        self.config.terms[idx].clone()
    }
}
