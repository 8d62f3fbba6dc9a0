//! Per-query samples and the aggregate run summary.
//!
//! Median and p95 are plain sorted-index lookups with no interpolation. The
//! median of an even-sized set is the upper middle element; p95 is the
//! element at `floor(n * 0.95)` clamped to the last index.

use serde::{Deserialize, Serialize};

/// One measured search invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySample {
    pub term: String,
    pub latency_ms: f64,
    pub result_count: u64,
}

impl QuerySample {
    /// Progress line for the sample at 1-based `position`
    pub fn progress_line(&self, position: usize) -> String {
        format!(
            "Search {}: '{}' - {} results in {:.2}ms",
            position, self.term, self.result_count, self.latency_ms
        )
    }
}

/// Qualitative rating derived from the average latency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    Excellent,
    Good,
    Fair,
    #[serde(rename = "Needs improvement")]
    NeedsImprovement,
}

impl Rating {
    pub fn from_avg_ms(avg_ms: f64) -> Self {
        if avg_ms < 50.0 {
            Rating::Excellent
        } else if avg_ms < 100.0 {
            Rating::Good
        } else if avg_ms < 200.0 {
            Rating::Fair
        } else {
            Rating::NeedsImprovement
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rating::Excellent => write!(f, "Excellent"),
            Rating::Good => write!(f, "Good"),
            Rating::Fair => write!(f, "Fair"),
            Rating::NeedsImprovement => write!(f, "Needs improvement"),
        }
    }
}

/// Aggregate statistics over a finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub count: usize,
    pub total_time_ms: f64,
    pub avg_ms: f64,
    pub median_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
    pub p95_ms: f64,
    pub avg_results: f64,
    pub throughput_per_sec: f64,
    pub rating: Rating,
}

impl RunSummary {
    /// Summarize a frozen sample set. Returns `None` for an empty set.
    pub fn from_samples(samples: &[QuerySample]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let count = samples.len();
        let n = count as f64;

        let total_time_ms: f64 = samples.iter().map(|s| s.latency_ms).sum();
        let total_results: u64 = samples.iter().map(|s| s.result_count).sum();
        let avg_ms = total_time_ms / n;

        let mut sorted: Vec<f64> = samples.iter().map(|s| s.latency_ms).collect();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let throughput_per_sec = if avg_ms > 0.0 { 1000.0 / avg_ms } else { 0.0 };

        Some(Self {
            count,
            total_time_ms,
            avg_ms,
            median_ms: sorted[count / 2],
            min_ms: sorted[0],
            max_ms: sorted[count - 1],
            p95_ms: sorted[percentile_index(count, 0.95)],
            avg_results: total_results as f64 / n,
            throughput_per_sec,
            rating: Rating::from_avg_ms(avg_ms),
        })
    }
}

/// Sorted-index position for a percentile, clamped to the last element
fn percentile_index(count: usize, fraction: f64) -> usize {
    let index = (count as f64 * fraction) as usize;
    index.min(count.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn samples(latencies: &[f64]) -> Vec<QuerySample> {
        latencies
            .iter()
            .enumerate()
            .map(|(i, &latency_ms)| QuerySample {
                term: format!("term-{}", i),
                latency_ms,
                result_count: i as u64,
            })
            .collect()
    }

    #[test]
    fn test_progress_line() {
        let sample = QuerySample {
            term: "health".to_string(),
            latency_ms: 12.345678,
            result_count: 5,
        };
        assert_eq!(
            sample.progress_line(1),
            "Search 1: 'health' - 5 results in 12.35ms"
        );

        let sample = QuerySample {
            term: "breaking news".to_string(),
            latency_ms: 250.0,
            result_count: 0,
        };
        assert_eq!(
            sample.progress_line(100),
            "Search 100: 'breaking news' - 0 results in 250.00ms"
        );
    }

    #[test]
    fn test_empty_samples() {
        assert!(RunSummary::from_samples(&[]).is_none());
    }

    #[test]
    fn test_basic_summary() {
        let summary = RunSummary::from_samples(&samples(&[30.0, 10.0, 20.0])).unwrap();
        assert_eq!(summary.count, 3);
        assert!((summary.total_time_ms - 60.0).abs() < 1e-9);
        assert!((summary.avg_ms - 20.0).abs() < 1e-9);
        assert_eq!(summary.min_ms, 10.0);
        assert_eq!(summary.max_ms, 30.0);
        assert_eq!(summary.median_ms, 20.0);
        assert_eq!(summary.p95_ms, 30.0);
        assert!((summary.avg_results - 1.0).abs() < 1e-9);
        assert!((summary.throughput_per_sec - 50.0).abs() < 1e-9);
        assert_eq!(summary.rating, Rating::Excellent);
    }

    #[test]
    fn test_median_takes_upper_middle() {
        let summary = RunSummary::from_samples(&samples(&[40.0, 10.0, 30.0, 20.0])).unwrap();
        assert_eq!(summary.median_ms, 30.0);
    }

    #[test]
    fn test_single_sample() {
        let summary = RunSummary::from_samples(&samples(&[12.5])).unwrap();
        assert_eq!(summary.median_ms, 12.5);
        assert_eq!(summary.p95_ms, 12.5);
        assert_eq!(summary.min_ms, 12.5);
        assert_eq!(summary.max_ms, 12.5);
    }

    #[test]
    fn test_p95_index() {
        assert_eq!(percentile_index(1, 0.95), 0);
        assert_eq!(percentile_index(2, 0.95), 1);
        assert_eq!(percentile_index(20, 0.95), 19);
        assert_eq!(percentile_index(100, 0.95), 95);
    }

    #[test]
    fn test_p95_of_hundred() {
        let latencies: Vec<f64> = (1..=100).map(|v| v as f64).collect();
        let summary = RunSummary::from_samples(&samples(&latencies)).unwrap();
        // sorted[95] == 96.0
        assert_eq!(summary.p95_ms, 96.0);
        assert_eq!(summary.median_ms, 51.0);
    }

    #[test]
    fn test_zero_latency_throughput() {
        let summary = RunSummary::from_samples(&samples(&[0.0, 0.0])).unwrap();
        assert_eq!(summary.avg_ms, 0.0);
        assert_eq!(summary.throughput_per_sec, 0.0);
    }

    #[test]
    fn test_rating_thresholds() {
        assert_eq!(Rating::from_avg_ms(0.0), Rating::Excellent);
        assert_eq!(Rating::from_avg_ms(49.9), Rating::Excellent);
        assert_eq!(Rating::from_avg_ms(50.0), Rating::Good);
        assert_eq!(Rating::from_avg_ms(99.99), Rating::Good);
        assert_eq!(Rating::from_avg_ms(100.0), Rating::Fair);
        assert_eq!(Rating::from_avg_ms(199.9), Rating::Fair);
        assert_eq!(Rating::from_avg_ms(200.0), Rating::NeedsImprovement);
        assert_eq!(Rating::from_avg_ms(250.0), Rating::NeedsImprovement);
    }

    #[test]
    fn test_rating_display_and_serde() {
        assert_eq!(Rating::NeedsImprovement.to_string(), "Needs improvement");
        assert_eq!(
            serde_json::to_string(&Rating::NeedsImprovement).unwrap(),
            "\"Needs improvement\""
        );
        assert_eq!(serde_json::to_string(&Rating::Good).unwrap(), "\"Good\"");
    }

    proptest! {
        #[test]
        fn prop_summary_is_consistent(latencies in prop::collection::vec(0.0f64..5000.0, 1..200)) {
            let summary = RunSummary::from_samples(&samples(&latencies)).unwrap();
            let sum: f64 = latencies.iter().sum();

            prop_assert_eq!(summary.count, latencies.len());
            prop_assert!((summary.total_time_ms - sum).abs() < 1e-6);
            prop_assert!(summary.min_ms <= summary.median_ms);
            prop_assert!(summary.median_ms <= summary.max_ms);
            prop_assert!(summary.min_ms <= summary.p95_ms);
            prop_assert!(summary.p95_ms <= summary.max_ms);
            prop_assert_eq!(summary.rating, Rating::from_avg_ms(summary.avg_ms));

            let mut sorted = latencies.clone();
            sorted.sort_by(|a, b| a.total_cmp(b));
            prop_assert_eq!(summary.median_ms, sorted[latencies.len() / 2]);

            if summary.avg_ms > 0.0 {
                prop_assert_eq!(summary.throughput_per_sec, 1000.0 / summary.avg_ms);
            }
        }
    }
}
