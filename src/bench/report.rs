//! Report generation for benchmark results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

use super::stats::{QuerySample, RunSummary};
use crate::search::IndexInfo;

/// Complete benchmark report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkReport {
    /// Machine name of the benchmarked index
    pub index_name: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Results requested per query
    pub page_size: usize,
    pub summary: RunSummary,
    /// Index metadata, absent when it could not be loaded
    pub index: Option<IndexInfo>,
    /// Why the index metadata is missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_error: Option<String>,
    /// Individual samples, only kept on request
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub samples: Vec<QuerySample>,
}

impl BenchmarkReport {
    /// Render the summary block
    pub fn render_summary(&self) -> String {
        let s = &self.summary;
        let rule = "=".repeat(50);
        let mut out = String::new();

        let _ = writeln!(out, "\n{}", rule);
        let _ = writeln!(out, "PERFORMANCE SUMMARY");
        let _ = writeln!(out, "{}", rule);
        let _ = writeln!(out, "Total searches: {}", s.count);
        let _ = writeln!(out, "Average results per search: {:.1}", s.avg_results);
        let _ = writeln!(out, "Total search time: {:.2}ms", s.total_time_ms);
        let _ = writeln!(out, "Average search time: {:.2}ms", s.avg_ms);
        let _ = writeln!(out, "Median search time: {:.2}ms", s.median_ms);
        let _ = writeln!(out, "Min search time: {:.2}ms", s.min_ms);
        let _ = writeln!(out, "Max search time: {:.2}ms", s.max_ms);
        let _ = writeln!(out, "95th percentile: {:.2}ms", s.p95_ms);
        let _ = writeln!(out, "Searches per second: {:.1}", s.throughput_per_sec);
        let _ = writeln!(out, "Performance rating: {}", s.rating);

        out
    }

    /// Render the index information block
    pub fn render_index(&self) -> String {
        let rule = "-".repeat(30);
        let mut out = String::new();

        let _ = writeln!(out, "\n{}", rule);
        let _ = writeln!(out, "INDEX INFORMATION");
        let _ = writeln!(out, "{}", rule);

        let Some(i) = &self.index else {
            let reason = self.index_error.as_deref().unwrap_or("unknown error");
            let _ = writeln!(out, "Index information unavailable: {}", reason);
            return out;
        };

        let _ = writeln!(out, "Index name: {}", i.label);
        let _ = writeln!(out, "Server: {} ({})", i.server_label, i.backend_id);
        let _ = writeln!(out, "Total indexed items: {}", i.indexed_items);
        let _ = writeln!(out, "Items to be indexed: {}", i.pending_items());

        out
    }

    /// Print the summary followed by the index information
    pub fn print(&self) {
        print!("{}", self.render_summary());
        print!("{}", self.render_index());
    }

    /// Export the report as JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
