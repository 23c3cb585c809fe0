//! Checkbox updater - tick boxes for tasks validated as likely complete
//!
//! Only `checkbox` tasks with status `likely_complete` are touched. Each
//! recorded line is re-checked before editing: if it no longer contains
//! `[ ]` the file has drifted since validation and the line is left alone.
//! Only the first `[ ]` on a line changes; every other byte of the file,
//! line endings included, is preserved.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::models::{TaskRecord, ValidationResult};
use crate::paths;

/// Unchecked checkbox token
pub const UNCHECKED: &str = "[ ]";

/// Checked checkbox token
pub const CHECKED: &str = "[x]";

/// Errors updating one file
#[derive(Debug, Error)]
pub enum UpdateError {
    /// The file could not be read as UTF-8 text
    #[error("failed to read {path}: {source}")]
    Read {
        /// File path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The file could not be written back
    #[error("failed to write {path}: {source}")]
    Write {
        /// File path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },
}

/// Outcome for one markdown file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpdate {
    /// File as recorded in the results
    pub file: String,
    /// Boxes ticked (or that would be ticked, in a dry run)
    pub checked: usize,
}

/// A file that could not be updated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    /// File as recorded in the results
    pub file: String,
    /// What went wrong
    pub error: String,
}

/// Outcome of a whole update run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateSummary {
    /// Files with at least one ticked box
    pub updated: Vec<FileUpdate>,
    /// Files that could not be processed
    pub failed: Vec<FileFailure>,
    /// Files that had candidates
    pub files_considered: usize,
}

impl UpdateSummary {
    /// Total boxes ticked
    #[must_use]
    pub fn total_checked(&self) -> usize {
        self.updated.iter().map(|u| u.checked).sum()
    }
}

/// Group tickable tasks by file, in first-seen order
#[must_use]
pub fn tasks_by_file(results: &[ValidationResult]) -> Vec<(String, Vec<&TaskRecord>)> {
    let mut groups: Vec<(String, Vec<&TaskRecord>)> = Vec::new();
    for result in results.iter().filter(|r| r.should_check()) {
        let file = &result.task.file;
        match groups.iter_mut().find(|(f, _)| f == file) {
            Some((_, tasks)) => tasks.push(&result.task),
            None => groups.push((file.clone(), vec![&result.task])),
        }
    }
    groups
}

/// Tick boxes in `content` at the given 1-based line numbers.
///
/// Returns the new content and how many boxes were ticked. Line numbers that
/// are out of range, or whose line has no `[ ]`, are ignored. A line listed
/// twice is still edited once.
#[must_use]
pub fn check_lines(content: &str, line_numbers: &[usize]) -> (String, usize) {
    let mut lines: Vec<String> = content.split_inclusive('\n').map(String::from).collect();
    let mut checked = 0;

    let mut numbers = line_numbers.to_vec();
    numbers.sort_unstable();
    numbers.dedup();

    for number in numbers {
        let Some(line) = number.checked_sub(1).and_then(|idx| lines.get_mut(idx)) else {
            continue;
        };
        if line.contains(UNCHECKED) {
            *line = line.replacen(UNCHECKED, CHECKED, 1);
            checked += 1;
        }
    }

    (lines.concat(), checked)
}

/// Tick boxes in one file; writes only when something changed
pub fn update_file(
    path: &Path,
    tasks: &[&TaskRecord],
    dry_run: bool,
) -> Result<usize, UpdateError> {
    let content = fs::read_to_string(path).map_err(|source| UpdateError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let line_numbers: Vec<usize> = tasks.iter().map(|t| t.line).collect();
    let (updated, checked) = check_lines(&content, &line_numbers);

    if checked > 0 && !dry_run {
        fs::write(path, updated).map_err(|source| UpdateError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }

    Ok(checked)
}

/// Apply validation results to the markdown files under `root`.
///
/// A failure on one file is logged and recorded; the others still run.
#[must_use]
pub fn apply_results(root: &Path, results: &[ValidationResult], dry_run: bool) -> UpdateSummary {
    let groups = tasks_by_file(results);
    let mut summary = UpdateSummary {
        files_considered: groups.len(),
        ..UpdateSummary::default()
    };

    for (file, tasks) in groups {
        let path = paths::resolve(root, Path::new(&file));
        match update_file(&path, &tasks, dry_run) {
            Ok(0) => log::debug!("{file}: nothing to check"),
            Ok(checked) => {
                log::info!("{file}: checked {checked} box(es)");
                summary.updated.push(FileUpdate { file, checked });
            },
            Err(e) => {
                log::error!("error updating {file}: {e}");
                summary.failed.push(FileFailure {
                    file,
                    error: e.to_string(),
                });
            },
        }
    }

    summary
}
