//! Configuration structs for benchmarking.

use serde::{Deserialize, Serialize};

use crate::error::BenchError;

/// Search terms used when none are configured
pub const DEFAULT_TERMS: &[&str] = &[
    "breaking news",
    "technology",
    "market analysis",
    "health",
    "politics",
    "environment",
    "sports",
    "economy",
    "science",
    "education",
    "weather",
    "transportation",
    "housing",
    "energy",
    "agriculture",
    "manufacturing",
    "tourism",
    "healthcare",
    "legal",
    "community",
];

/// Configuration for a benchmark run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    /// Machine name of the index to query
    pub index_name: String,
    /// Candidate search terms, picked uniformly at random
    pub terms: Vec<String>,
    /// Number of measured queries
    pub query_count: usize,
    /// Results requested per query
    pub page_size: usize,
    /// Pause between consecutive queries in milliseconds
    pub delay_ms: u64,
    /// Unmeasured queries run before the benchmark
    pub warmup_queries: usize,
    /// Seed for term selection
    pub seed: Option<u64>,
    /// Print a progress line per query
    pub progress: bool,
    /// Keep individual samples in the report
    pub keep_samples: bool,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            index_name: "content".to_string(),
            terms: DEFAULT_TERMS.iter().map(|t| t.to_string()).collect(),
            query_count: 100,
            page_size: 20,
            delay_ms: 10,
            warmup_queries: 0,
            seed: None,
            progress: true,
            keep_samples: false,
        }
    }
}

impl BenchmarkConfig {
    /// Reject configurations that cannot produce a summary
    pub fn validate(&self) -> Result<(), BenchError> {
        if self.index_name.trim().is_empty() {
            return Err(BenchError::InvalidConfig(
                "index name must not be empty".to_string(),
            ));
        }
        if self.terms.is_empty() {
            return Err(BenchError::InvalidConfig(
                "at least one search term is required".to_string(),
            ));
        }
        if self.terms.iter().any(|t| t.trim().is_empty()) {
            return Err(BenchError::InvalidConfig(
                "search terms must not be blank".to_string(),
            ));
        }
        if self.query_count == 0 {
            return Err(BenchError::InvalidConfig(
                "query count must be greater than zero".to_string(),
            ));
        }
        if self.page_size == 0 {
            return Err(BenchError::InvalidConfig(
                "page size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration for the mock search server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockServerConfig {
    /// Port to listen on (0 for random)
    pub port: u16,
    /// Machine name the corpus is served under
    pub index_name: String,
    /// Number of generated articles
    pub articles: u64,
    /// How many of the generated articles stay unpublished
    pub drafts: u64,
    /// Simulated latency per query in milliseconds
    pub latency_ms: u64,
    /// Error rate (0.0 to 1.0)
    pub error_rate: f64,
    /// Seed for corpus generation
    pub seed: Option<u64>,
}

impl Default for MockServerConfig {
    fn default() -> Self {
        Self {
            port: 0,
            index_name: "content".to_string(),
            articles: 1000,
            drafts: 0,
            latency_ms: 0,
            error_rate: 0.0,
            seed: None,
        }
    }
}

/// Parse a terms file: one term per line, blank lines and `#` comments skipped
pub fn parse_terms(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
