//! Task extraction from markdown
//!
//! Walks the repository for `*.md` files and classifies each line:
//!
//! - An unchecked checkbox (`- [ ]`, `* [ ]`, `1. [ ]`) is a task unless it is
//!   a documentation example (`(REJECT`, `(WARNING`, `(ACCEPT`) or too short.
//! - A checked box is never a task.
//! - A line mentioning TODO, FIXME, XXX, HACK, PLANNED or FUTURE is a task
//!   unless it matches a known false positive.
//!
//! Unreadable files are skipped; a scan never fails.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use walkdir::{DirEntry, WalkDir};

use super::task_id::extract_task_id;
use crate::config::TasksConfig;
use crate::core::models::{TaskKind, TaskRecord};
use crate::paths;

static UNCHECKED_BOX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[-*]|\d+\.)\s*\[ \]").expect("static regex is valid")
});

static CHECKED_BOX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[x\]").expect("static regex is valid"));

static EXAMPLE_ANNOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(REJECT|\(WARNING|\(ACCEPT").expect("static regex is valid")
});

static TODO_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(TODO|FIXME|XXX|HACK|PLANNED|FUTURE)\b").expect("static regex is valid")
});

/// Lowercase substrings that make a TODO match a false positive
const TODO_FALSE_POSITIVES: &[&str] = &["todo.md", "note that", "project note", "see note"];

/// Find every markdown file under `root`, sorted by path
#[must_use]
pub fn find_markdown_files(root: &Path, config: &TasksConfig) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_ignored_dir(e, &config.ignore_dirs))
        .filter_map(Result::ok)
        .filter(|e| e.path().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
        .map(DirEntry::into_path)
        .collect();

    files.sort();
    files
}

fn is_ignored_dir(entry: &DirEntry, ignore_dirs: &[String]) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || ignore_dirs.iter().any(|d| *d == name)
}

/// Whether a markdown file is reference material rather than a task list
#[must_use]
pub fn is_excluded(relative: &str, config: &TasksConfig) -> bool {
    config.exclude.iter().any(|pattern| relative.contains(pattern.as_str()))
}

/// Classify one line; `None` means "not a task"
#[must_use]
pub fn classify_line(line: &str, min_length: usize) -> Option<TaskKind> {
    if UNCHECKED_BOX.is_match(line) {
        if EXAMPLE_ANNOTATION.is_match(line) || line.trim().chars().count() < min_length {
            return None;
        }
        return Some(TaskKind::Checkbox);
    }

    if CHECKED_BOX.is_match(line) {
        return None;
    }

    if TODO_MARKER.is_match(line) {
        let lower = line.to_lowercase();
        if TODO_FALSE_POSITIVES.iter().any(|fp| lower.contains(fp)) {
            return None;
        }
        return Some(TaskKind::Todo);
    }

    None
}

/// Extract tasks from markdown `content` recorded under the name `file`
#[must_use]
pub fn extract_from_str(file: &str, content: &str, config: &TasksConfig) -> Vec<TaskRecord> {
    content
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            classify_line(line, config.min_length).map(|kind| {
                TaskRecord::new(file, idx + 1, line.trim(), kind, extract_task_id(line))
            })
        })
        .collect()
}

/// Extract tasks from one markdown file under `root`
#[must_use]
pub fn extract_from_file(root: &Path, path: &Path, config: &TasksConfig) -> Vec<TaskRecord> {
    let relative = paths::relative_slash(root, path);
    if is_excluded(&relative, config) {
        log::debug!("skipping reference file {relative}");
        return Vec::new();
    }

    match fs::read(path) {
        Ok(bytes) => extract_from_str(&relative, &String::from_utf8_lossy(&bytes), config),
        Err(e) => {
            log::debug!("skipping unreadable {relative}: {e}");
            Vec::new()
        },
    }
}

/// Scan every markdown file in the repository
#[must_use]
pub fn scan_repository(root: &Path, config: &TasksConfig) -> Vec<TaskRecord> {
    find_markdown_files(root, config)
        .iter()
        .flat_map(|path| extract_from_file(root, path, config))
        .collect()
}
