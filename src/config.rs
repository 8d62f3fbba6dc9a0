use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::bench::config::{parse_terms, BenchmarkConfig, MockServerConfig, DEFAULT_TERMS};

/// Search Bench - search latency benchmark
#[derive(Parser, Debug)]
#[command(name = "search-bench", author, version, about, long_about = None)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run benchmark against an existing search service
    Run {
        /// Base URL of the search service
        #[arg(short = 'u', long, env = "SEARCH_URL", default_value = "http://localhost:8080")]
        url: String,

        /// Machine name of the index to query
        #[arg(short = 'i', long, env = "SEARCH_INDEX", default_value = "content")]
        index: String,

        #[command(flatten)]
        bench: BenchArgs,
    },

    /// Run standalone benchmark (starts mock search server + runs benchmark)
    Standalone {
        /// Number of generated articles
        #[arg(long, default_value = "1000")]
        articles: u64,

        /// How many of the generated articles stay unpublished
        #[arg(long, default_value = "0")]
        drafts: u64,

        /// Mock server latency per query in milliseconds
        #[arg(long, default_value = "0")]
        latency_ms: u64,

        /// Mock server error rate (0.0 to 1.0)
        #[arg(long, default_value = "0.0")]
        error_rate: f64,

        #[command(flatten)]
        bench: BenchArgs,
    },
}

/// Options shared by every benchmark mode
#[derive(Args, Debug, Clone)]
pub struct BenchArgs {
    /// Number of measured searches
    #[arg(short = 'n', long, env = "BENCH_QUERIES", default_value = "100")]
    pub queries: usize,

    /// Results requested per search
    #[arg(short = 'p', long, env = "BENCH_PAGE_SIZE", default_value = "20")]
    pub page_size: usize,

    /// Search terms (comma-separated)
    #[arg(short = 't', long, env = "BENCH_TERMS", value_delimiter = ',')]
    pub terms: Vec<String>,

    /// File with one search term per line (overrides --terms)
    #[arg(long, env = "BENCH_TERMS_FILE")]
    pub terms_file: Option<PathBuf>,

    /// HTTP request timeout in seconds
    #[arg(long, env = "SEARCH_TIMEOUT", default_value = "30")]
    pub timeout: u64,

    /// Pause between searches in milliseconds
    #[arg(long, env = "BENCH_DELAY_MS", default_value = "10")]
    pub delay_ms: u64,

    /// Unmeasured warmup searches
    #[arg(long, default_value = "0")]
    pub warmup: usize,

    /// Seed for term selection (and corpus generation in standalone mode)
    #[arg(long, env = "BENCH_SEED")]
    pub seed: Option<u64>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Include individual samples in JSON output
    #[arg(long)]
    pub samples: bool,

    /// Suppress per-search progress lines
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "warn")]
    pub log_level: String,
}

/// Where the searches go
#[derive(Clone, Debug)]
pub enum Mode {
    /// A running search service reached over HTTP
    Remote { url: String },
    /// A mock search server started in-process
    Standalone(MockServerConfig),
}

#[derive(Clone, Debug)]
pub struct Config {
    pub mode: Mode,
    pub benchmark: BenchmarkConfig,
    /// HTTP request timeout for the search service in seconds
    pub timeout_secs: u64,
    pub json_output: bool,
    pub log_level: String,
}

impl Config {
    /// Load configuration with priority: CLI > ENV (.env included) > defaults
    pub fn load() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Self::from_args(CliArgs::parse())
    }

    /// Build configuration from parsed arguments
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let (mode, index_name, bench) = match args.command {
            Commands::Run { url, index, bench } => (Mode::Remote { url }, index, bench),
            Commands::Standalone {
                articles,
                drafts,
                latency_ms,
                error_rate,
                bench,
            } => {
                if !(0.0..=1.0).contains(&error_rate) {
                    anyhow::bail!("--error-rate must be between 0.0 and 1.0, got {}", error_rate);
                }
                let mock = MockServerConfig {
                    articles,
                    drafts,
                    latency_ms,
                    error_rate,
                    seed: bench.seed,
                    ..Default::default()
                };
                let index_name = mock.index_name.clone();
                (Mode::Standalone(mock), index_name, bench)
            }
        };

        let terms = resolve_terms(&bench)?;

        let benchmark = BenchmarkConfig {
            index_name,
            terms,
            query_count: bench.queries,
            page_size: bench.page_size,
            delay_ms: bench.delay_ms,
            warmup_queries: bench.warmup,
            seed: bench.seed,
            progress: !bench.quiet && !bench.json,
            keep_samples: bench.samples,
        };

        Ok(Config {
            mode,
            benchmark,
            timeout_secs: bench.timeout,
            json_output: bench.json,
            log_level: bench.log_level,
        })
    }
}

/// Terms file wins over --terms, which wins over the built-in list
fn resolve_terms(bench: &BenchArgs) -> Result<Vec<String>> {
    if let Some(path) = &bench.terms_file {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read terms file {}", path.display()))?;
        return Ok(parse_terms(&content));
    }

    if !bench.terms.is_empty() {
        return Ok(bench.terms.iter().map(|t| t.trim().to_string()).collect());
    }

    Ok(DEFAULT_TERMS.iter().map(|t| t.to_string()).collect())
}
