// Error handling module
// Defines benchmark error types and their process exit codes

use thiserror::Error;

use crate::search::SearchError;

/// Errors that abort a benchmark run
#[derive(Error, Debug)]
pub enum BenchError {
    /// The configured index could not be resolved
    #[error("Could not load '{0}' search index. Make sure the search service is configured.")]
    IndexUnavailable(String),

    /// The run configuration cannot produce a summary
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A call to the search service failed
    #[error("Search failed: {0}")]
    Search(#[from] SearchError),

    /// Queries completed but the index information could not be loaded
    #[error("Could not load index information: {0}")]
    IndexInfo(String),

    /// The benchmark environment could not be set up
    #[error("Startup failed: {0}")]
    Startup(String),
}

impl BenchError {
    /// Process exit code reported for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            BenchError::IndexUnavailable(_) => 1,
            BenchError::InvalidConfig(_) => 2,
            BenchError::Search(_) | BenchError::IndexInfo(_) => 3,
            BenchError::Startup(_) => 4,
        }
    }
}

/// Exit code for an error reaching the top of the binary
pub fn exit_code_of(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<BenchError>()
        .map(BenchError::exit_code)
        .unwrap_or(4)
}

/// Result type alias for benchmark operations
pub type Result<T> = std::result::Result<T, BenchError>;
