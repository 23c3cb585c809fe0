//! Output formatting for human and JSON modes
//!
//! Every command builds one of these result types and renders it either as
//! human-readable text or machine-parseable JSON.

use colored::Colorize;
use serde::Serialize;

use crate::core::models::{TaskStatus, ValidationResult};
use crate::core::services::validator::tally;
use crate::core::services::{FetchSummary, UpdateSummary, VerifySummary};

/// Likely-complete tasks listed in human output
pub const HIGHLIGHT_LIMIT: usize = 50;

/// Characters of task text shown per highlight
const TEXT_PREVIEW: usize = 100;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

fn print_json<T: Serialize>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

/// Result of `fixtures fetch`
#[derive(Debug, Serialize)]
pub struct FetchResult {
    /// Paths downloaded this run
    pub downloaded: Vec<String>,
    /// Paths that were already present
    pub present: Vec<String>,
}

impl From<FetchSummary> for FetchResult {
    fn from(summary: FetchSummary) -> Self {
        Self {
            downloaded: summary.downloaded,
            present: summary.present,
        }
    }
}

impl FetchResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                for path in &self.present {
                    println!("OK: already present: {path}");
                }
                for path in &self.downloaded {
                    println!("DL: {path}");
                }
                println!(
                    "OK: downloads complete ({} new, {} present). Run `upkeep fixtures checksums` to regenerate checksums.",
                    self.downloaded.len(),
                    self.present.len()
                );
            },
            OutputMode::Json => print_json(self),
        }
    }
}

/// Result of `fixtures checksums`
#[derive(Debug, Serialize)]
pub struct ChecksumResult {
    /// Checksum file written
    pub output: String,
    /// Entries written
    pub entries: usize,
}

impl ChecksumResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => println!("Wrote {} entries to {}", self.entries, self.output),
            OutputMode::Json => print_json(self),
        }
    }
}

/// Result of `fixtures verify`
#[derive(Debug, Serialize)]
pub struct VerifyResult {
    /// No mismatches and nothing missing
    pub passed: bool,
    /// Entries that matched
    pub ok: usize,
    /// Entries whose digest changed
    pub mismatched: Vec<String>,
    /// Entries whose file is gone
    pub missing: Vec<String>,
}

impl From<VerifySummary> for VerifyResult {
    fn from(summary: VerifySummary) -> Self {
        Self {
            passed: summary.passed(),
            ok: summary.ok.len(),
            mismatched: summary.mismatched,
            missing: summary.missing,
        }
    }
}

impl VerifyResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                for path in &self.mismatched {
                    println!("{} {path}", "MISMATCH".red());
                }
                for path in &self.missing {
                    println!("{} {path}", "MISSING".yellow());
                }
                if self.passed {
                    println!("{} {} file(s) verified", "OK:".green(), self.ok);
                } else {
                    println!(
                        "FAILED: {} mismatched, {} missing, {} ok",
                        self.mismatched.len(),
                        self.missing.len(),
                        self.ok
                    );
                }
            },
            OutputMode::Json => print_json(self),
        }
    }
}

/// A likely-complete task shown in the validate report
#[derive(Debug, Serialize)]
pub struct TaskHighlight {
    /// `file:line`
    pub location: String,
    /// Task text, truncated
    pub text: String,
    /// Found in commit history
    pub has_commit: bool,
    /// Evidence groups that matched
    pub code_evidence: Vec<String>,
}

/// Result of `tasks validate`
#[derive(Debug, Serialize)]
pub struct ValidateResult {
    /// Markdown files scanned
    pub markdown_files: usize,
    /// Tasks validated
    pub total: usize,
    /// Tasks classified likely complete
    pub likely_complete: usize,
    /// Tasks still pending
    pub pending: usize,
    /// Where the results were saved
    pub results_file: String,
    /// First likely-complete tasks
    pub highlights: Vec<TaskHighlight>,
}

impl ValidateResult {
    /// Summarise a validation run
    #[must_use]
    pub fn new(markdown_files: usize, results: &[ValidationResult], results_file: String) -> Self {
        let (likely_complete, pending) = tally(results);

        let highlights = results
            .iter()
            .filter(|r| r.status == TaskStatus::LikelyComplete)
            .take(HIGHLIGHT_LIMIT)
            .map(|r| TaskHighlight {
                location: r.task.location(),
                text: r.task.text.chars().take(TEXT_PREVIEW).collect(),
                has_commit: r.has_commit,
                code_evidence: r.has_code.matched().into_iter().map(String::from).collect(),
            })
            .collect();

        Self {
            markdown_files,
            total: results.len(),
            likely_complete,
            pending,
            results_file,
            highlights,
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        println!("Scanned {} markdown files", self.markdown_files);
        println!();
        println!("Total tasks: {}", self.total);
        println!("Likely complete: {}", self.likely_complete);
        println!("Pending: {}", self.pending);
        println!();
        println!("Results saved to: {}", self.results_file);

        if self.highlights.is_empty() {
            return;
        }

        println!();
        println!("Likely complete tasks (should be checked):");
        for h in &self.highlights {
            println!();
            println!("{}", h.location.bold());
            println!("  {}", h.text);
            if h.has_commit {
                println!("  {} Found in commits", "✓".green());
            }
            if !h.code_evidence.is_empty() {
                println!("  {} Code evidence: {}", "✓".green(), h.code_evidence.join(", "));
            }
        }
    }
}

/// Per-file count in the update report
#[derive(Debug, Serialize)]
pub struct FileCount {
    /// Markdown file
    pub file: String,
    /// Boxes ticked
    pub checked: usize,
}

/// A file the updater could not process
#[derive(Debug, Serialize)]
pub struct FileError {
    /// Markdown file
    pub file: String,
    /// Error message
    pub error: String,
}

/// Result of `tasks update`
#[derive(Debug, Serialize)]
pub struct UpdateResult {
    /// Nothing was written
    pub dry_run: bool,
    /// Files with likely-complete checkboxes
    pub files_considered: usize,
    /// Files changed
    pub files: Vec<FileCount>,
    /// Total boxes ticked
    pub total_checked: usize,
    /// Files that failed
    pub errors: Vec<FileError>,
}

impl UpdateResult {
    /// Build from an update summary
    #[must_use]
    pub fn new(summary: UpdateSummary, dry_run: bool) -> Self {
        let total_checked = summary.total_checked();
        Self {
            dry_run,
            files_considered: summary.files_considered,
            files: summary
                .updated
                .into_iter()
                .map(|u| FileCount {
                    file: u.file,
                    checked: u.checked,
                })
                .collect(),
            total_checked,
            errors: summary
                .failed
                .into_iter()
                .map(|f| FileError {
                    file: f.file,
                    error: f.error,
                })
                .collect(),
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        let verb = if self.dry_run { "Would update" } else { "Updated" };
        println!("Updating {} files with completed tasks...", self.files_considered);
        for f in &self.files {
            println!("  {} {verb} {} ({} checkboxes)", "✓".green(), f.file, f.checked);
        }
        for e in &self.errors {
            println!("  {} {}: {}", "✗".red(), e.file, e.error);
        }
        println!();
        println!("{verb} {} files", self.files.len());
        println!("Checked off {} completed tasks", self.total_checked);
    }
}
