//! Task validation - infer whether a task is already done
//!
//! Two independent signals, OR'd together:
//!
//! 1. **Commit evidence**: the task identifier appears in a commit message.
//! 2. **Code evidence**: a keyword from the task text appears in tracked
//!    files, per configured group (implementation, tests, config).
//!
//! This is a heuristic. Unrelated code containing a keyword yields a false
//! positive. A search that fails or times out counts as "not found", so a
//! broken environment leaves tasks `pending` rather than ticking them.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::config::SearchConfig;
use crate::core::models::{CodeEvidence, TaskRecord, TaskStatus, ValidationResult};
use crate::core::ports::RepoSearch;

/// Generic words that say nothing about what a task touches
const STOP_WORDS: &[&str] = &[
    "this",
    "that",
    "with",
    "from",
    "have",
    "will",
    "should",
    "would",
    "could",
    "implement",
    "add",
    "create",
    "update",
    "fix",
    "remove",
    "delete",
    "change",
];

/// Progress is logged every this many tasks
const PROGRESS_EVERY: usize = 50;

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[a-zA-Z]{5,}\b").expect("static regex is valid"));

/// Errors reading or writing the results file
#[derive(Debug, Error)]
pub enum ResultsError {
    /// IO failure on the results file
    #[error("results file {path}: {source}")]
    Io {
        /// Results file path
        path: String,
        /// Underlying error
        source: std::io::Error,
    },

    /// The results file is not a JSON list of validation results
    #[error("malformed results file {path}: {source}")]
    Json {
        /// Results file path
        path: String,
        /// Underlying error
        source: serde_json::Error,
    },
}

/// Pick up to `max` distinctive keywords from task text.
///
/// Keywords are lowercase alphabetic words of five letters or more, in order
/// of appearance, minus [`STOP_WORDS`]. Duplicates are kept, so a repeated
/// word uses up more than one slot.
#[must_use]
pub fn important_keywords(text: &str, max: usize) -> Vec<String> {
    let lower = text.to_lowercase();
    WORD.find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|word| !STOP_WORDS.contains(word))
        .take(max)
        .map(String::from)
        .collect()
}

/// Validates tasks against a repository
#[derive(Debug)]
pub struct TaskValidator<S> {
    search: S,
    config: SearchConfig,
}

impl<S: RepoSearch> TaskValidator<S> {
    /// Create a validator over `search`
    #[must_use]
    pub const fn new(search: S, config: SearchConfig) -> Self {
        Self { search, config }
    }

    /// Whether the task identifier appears in commit history
    #[must_use]
    pub fn has_commit(&self, task: &TaskRecord) -> bool {
        let Some(id) = task.task_id.as_deref() else {
            return false;
        };

        match self.search.commit_mentions(id) {
            Ok(found) => found,
            Err(e) => {
                log::warn!("commit search for {id} failed, treating as not found: {e}");
                false
            },
        }
    }

    /// Which file groups mention the task's keywords
    #[must_use]
    pub fn code_evidence(&self, task: &TaskRecord) -> CodeEvidence {
        let keywords = important_keywords(&task.text, self.config.max_keywords);
        if keywords.is_empty() {
            return CodeEvidence::default();
        }

        CodeEvidence {
            has_implementation: self.any_keyword_in(&keywords, &self.config.implementation),
            has_tests: self.any_keyword_in(&keywords, &self.config.tests),
            has_config: self.any_keyword_in(&keywords, &self.config.config),
        }
    }

    fn any_keyword_in(&self, keywords: &[String], pathspecs: &[String]) -> bool {
        if pathspecs.is_empty() {
            return false;
        }

        keywords.iter().any(|keyword| match self.search.files_contain(keyword, pathspecs) {
            Ok(found) => found,
            Err(e) => {
                log::warn!("code search for '{keyword}' failed, treating as not found: {e}");
                false
            },
        })
    }

    /// Validate a single task
    #[must_use]
    pub fn validate(&self, task: TaskRecord) -> ValidationResult {
        let has_commit = self.has_commit(&task);
        let has_code = self.code_evidence(&task);
        log::debug!(
            "{}: commit={has_commit} code={:?}",
            task.location(),
            has_code.matched()
        );
        ValidationResult::new(task, has_commit, has_code)
    }

    /// Validate every task, in order
    #[must_use]
    pub fn validate_all(&self, tasks: Vec<TaskRecord>) -> Vec<ValidationResult> {
        let total = tasks.len();
        tasks
            .into_iter()
            .enumerate()
            .map(|(idx, task)| {
                let done = idx + 1;
                if done % PROGRESS_EVERY == 0 {
                    log::info!("progress: {done}/{total} ({}%)", done * 100 / total);
                }
                self.validate(task)
            })
            .collect()
    }
}

/// Count results by status: `(likely_complete, pending)`
#[must_use]
pub fn tally(results: &[ValidationResult]) -> (usize, usize) {
    let complete = results.iter().filter(|r| r.status == TaskStatus::LikelyComplete).count();
    (complete, results.len() - complete)
}

/// Write results as pretty JSON
pub fn save_results(path: &Path, results: &[ValidationResult]) -> Result<(), ResultsError> {
    let display = path.display().to_string();
    let content = serde_json::to_string_pretty(results).map_err(|source| ResultsError::Json {
        path: display.clone(),
        source,
    })?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| ResultsError::Io {
            path: display.clone(),
            source,
        })?;
    }
    fs::write(path, content).map_err(|source| ResultsError::Io {
        path: display,
        source,
    })
}

/// Read results written by [`save_results`]
pub fn load_results(path: &Path) -> Result<Vec<ValidationResult>, ResultsError> {
    let display = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|source| ResultsError::Io {
        path: display.clone(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ResultsError::Json {
        path: display,
        source,
    })
}
