//! Task record model
//!
//! A task is a single line of a markdown file that looks like outstanding
//! work: an unchecked checkbox or a TODO-style marker. Records are rebuilt
//! on every scan and never mutated afterwards.

use serde::{Deserialize, Serialize};

/// What kind of line produced a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    /// `- [ ] ...`, `* [ ] ...` or `1. [ ] ...`
    Checkbox,
    /// A line mentioning TODO, FIXME, XXX, HACK, PLANNED or FUTURE
    Todo,
}

/// A task found in a markdown file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Markdown file, relative to the repository root (`/` separated)
    pub file: String,

    /// 1-based line number
    pub line: usize,

    /// The line with surrounding whitespace trimmed
    pub text: String,

    /// Checkbox or TODO marker
    #[serde(rename = "type")]
    pub kind: TaskKind,

    /// Identifier such as `T-SF03` or `H-08`, uppercased
    #[serde(default)]
    pub task_id: Option<String>,
}

impl TaskRecord {
    /// Create a task record
    #[must_use]
    pub fn new(
        file: impl Into<String>,
        line: usize,
        text: impl Into<String>,
        kind: TaskKind,
        task_id: Option<String>,
    ) -> Self {
        Self {
            file: file.into(),
            line,
            text: text.into(),
            kind,
            task_id,
        }
    }

    /// `file:line`, as shown in reports
    #[must_use]
    pub fn location(&self) -> String {
        format!("{}:{}", self.file, self.line)
    }

    /// Whether this task is a checkbox the updater may flip
    #[must_use]
    pub fn is_checkbox(&self) -> bool {
        self.kind == TaskKind::Checkbox
    }
}
