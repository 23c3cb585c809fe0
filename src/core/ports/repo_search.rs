//! Repository search port
//!
//! Defines the read-only queries the task validator runs against the
//! repository: commit messages and tracked file contents.

use std::time::Duration;

use thiserror::Error;

/// Errors from a single search query
///
/// The validator never propagates these; a failed query counts as
/// "not found".
#[derive(Debug, Error)]
pub enum SearchError {
    /// The query ran longer than its budget and was killed
    #[error("`{command}` timed out after {timeout:?}")]
    Timeout {
        /// The command line that was run
        command: String,
        /// The budget it exceeded
        timeout: Duration,
    },

    /// The search tool reported an error (not just "no match")
    #[error("`{command}` failed: {stderr}")]
    Failed {
        /// The command line that was run
        command: String,
        /// Captured diagnostics
        stderr: String,
    },

    /// The search tool could not be started or read
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read-only searches over a repository
pub trait RepoSearch {
    /// Whether any commit on any ref mentions `needle` (case-insensitive)
    fn commit_mentions(&self, needle: &str) -> Result<bool, SearchError>;

    /// Whether any tracked file matching `pathspecs` contains `keyword`
    /// (case-insensitive)
    fn files_contain(&self, keyword: &str, pathspecs: &[String]) -> Result<bool, SearchError>;
}
