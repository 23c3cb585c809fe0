//! Port traits (interfaces) for external dependencies
//!
//! These traits define the boundaries between core logic and external
//! systems (git, HTTP). Implementations live in the `adapters` module;
//! tests substitute in-memory fakes.

mod http_client;
mod repo_search;

pub use http_client::{HttpClient, HttpError};
pub use repo_search::{RepoSearch, SearchError};
