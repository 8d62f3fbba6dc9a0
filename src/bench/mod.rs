//! Search benchmark.
//!
//! This module provides tools for measuring search latency including:
//! - Sequential benchmark runner with an injectable clock
//! - Summary statistics over per-query samples
//! - Mock search server backed by an in-memory index
//! - Report generation

pub mod clock;
pub mod config;
pub mod mock_server;
pub mod report;
pub mod runner;
pub mod stats;

pub use clock::{Clock, ManualClock, TokioClock};
pub use config::{BenchmarkConfig, MockServerConfig, DEFAULT_TERMS};
pub use mock_server::MockSearchServer;
pub use report::BenchmarkReport;
pub use runner::BenchmarkRunner;
pub use stats::{QuerySample, Rating, RunSummary};
