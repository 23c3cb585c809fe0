//! Adapter implementations for port traits
//!
//! This module contains the concrete implementations that do I/O:
//!
//! - `git/` - Commit and file searches through the git CLI
//! - `http/` - Fixture downloads through reqwest

pub mod git;
pub mod http;

pub use git::GitRepoSearch;
pub use http::ReqwestClient;
