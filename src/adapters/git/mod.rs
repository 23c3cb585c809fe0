//! Git integration adapter
//!
//! Implements [`RepoSearch`] with the git CLI. Every query runs in the
//! repository root with its own timeout.
//!
//! - [`process`] - Subprocess runner with a deadline

pub mod process;

use std::path::PathBuf;
use std::time::Duration;

use crate::config::SearchConfig;
use crate::core::ports::{RepoSearch, SearchError};

pub use process::{GitOutput, run_git};

/// Git-backed repository search
#[derive(Debug, Clone)]
pub struct GitRepoSearch {
    /// Repository root
    root: PathBuf,
    /// Budget for `git grep`
    grep_timeout: Duration,
    /// Budget for `git log`
    log_timeout: Duration,
}

impl GitRepoSearch {
    /// Create a search rooted at `root`
    #[must_use]
    pub const fn new(root: PathBuf, grep_timeout: Duration, log_timeout: Duration) -> Self {
        Self {
            root,
            grep_timeout,
            log_timeout,
        }
    }

    /// Create a search using the timeouts from `[search]`
    #[must_use]
    pub const fn from_config(root: PathBuf, config: &SearchConfig) -> Self {
        Self::new(root, config.grep_timeout(), config.log_timeout())
    }
}

impl RepoSearch for GitRepoSearch {
    fn commit_mentions(&self, needle: &str) -> Result<bool, SearchError> {
        let grep = format!("--grep={needle}");
        let args = ["log", "--all", "-i", "-F", grep.as_str(), "--oneline", "-n", "1"];
        let out = run_git(&self.root, &args, self.log_timeout)?;

        if out.code != Some(0) {
            return Err(SearchError::Failed {
                command: format!("git {}", args.join(" ")),
                stderr: out.stderr.trim().to_string(),
            });
        }
        Ok(!out.stdout.trim().is_empty())
    }

    fn files_contain(&self, keyword: &str, pathspecs: &[String]) -> Result<bool, SearchError> {
        let mut args = vec!["grep", "-q", "-i", "-F", "-e", keyword, "--"];
        args.extend(pathspecs.iter().map(String::as_str));
        let out = run_git(&self.root, &args, self.grep_timeout)?;

        // git grep: 0 = match, 1 = no match, anything else = error
        match out.code {
            Some(0) => Ok(true),
            Some(1) => Ok(false),
            _ => Err(SearchError::Failed {
                command: format!("git {}", args.join(" ")),
                stderr: out.stderr.trim().to_string(),
            }),
        }
    }
}
