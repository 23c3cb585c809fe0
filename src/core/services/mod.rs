//! Business logic services
//!
//! Each service is one step of a maintenance workflow. External systems
//! are reached only through the port traits, so every service can be
//! exercised with in-memory fakes.
//!
//! - [`extractor`] - Find task lines in markdown
//! - [`task_id`] - Pull task identifiers out of a line
//! - [`validator`] - Infer completion from commits and code
//! - [`updater`] - Tick boxes for likely-complete tasks
//! - [`fetcher`] - Download fixture assets with retry
//! - [`checksums`] - Write and verify fixture checksum manifests

pub mod checksums;
pub mod extractor;
pub mod fetcher;
pub mod task_id;
pub mod updater;
pub mod validator;

pub use checksums::{ChecksumError, ChecksumOptions, VerifySummary};
pub use extractor::scan_repository;
pub use fetcher::{FetchError, FetchOutcome, FetchSummary, Fetcher, RetryPolicy};
pub use task_id::extract_task_id;
pub use updater::{UpdateSummary, apply_results};
pub use validator::{ResultsError, TaskValidator, important_keywords};
