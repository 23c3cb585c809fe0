//! Validation results
//!
//! The validator wraps each [`TaskRecord`] with the evidence it found. The
//! list of results is the only thing passed from the validate phase to the
//! update phase, so its JSON shape is a stable interface.

use serde::{Deserialize, Serialize};

use super::task::TaskRecord;

/// Heuristic classification of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Commit or code evidence was found
    LikelyComplete,
    /// No evidence (or every lookup failed)
    #[default]
    Pending,
}

/// Which groups of tracked files mention the task's keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CodeEvidence {
    /// A keyword appears in implementation sources
    #[serde(default)]
    pub has_implementation: bool,
    /// A keyword appears in test sources
    #[serde(default)]
    pub has_tests: bool,
    /// A keyword appears in configuration files
    #[serde(default)]
    pub has_config: bool,
}

impl CodeEvidence {
    /// True if any group matched
    #[must_use]
    pub const fn any(self) -> bool {
        self.has_implementation || self.has_tests || self.has_config
    }

    /// Names of the groups that matched
    #[must_use]
    pub fn matched(self) -> Vec<&'static str> {
        [
            ("has_implementation", self.has_implementation),
            ("has_tests", self.has_tests),
            ("has_config", self.has_config),
        ]
        .into_iter()
        .filter_map(|(name, hit)| hit.then_some(name))
        .collect()
    }
}

/// A task together with the evidence gathered for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// The task as extracted
    pub task: TaskRecord,
    /// The identifier appears in a commit message
    #[serde(default)]
    pub has_commit: bool,
    /// Keyword hits in tracked files
    #[serde(default)]
    pub has_code: CodeEvidence,
    /// Derived classification
    pub status: TaskStatus,
}

impl ValidationResult {
    /// Build a result, deriving the status from the evidence
    #[must_use]
    pub fn new(task: TaskRecord, has_commit: bool, has_code: CodeEvidence) -> Self {
        let status = if has_commit || has_code.any() {
            TaskStatus::LikelyComplete
        } else {
            TaskStatus::Pending
        };
        Self {
            task,
            has_commit,
            has_code,
            status,
        }
    }

    /// Whether the updater should tick this task's box
    #[must_use]
    pub fn should_check(&self) -> bool {
        self.status == TaskStatus::LikelyComplete && self.task.is_checkbox()
    }
}
