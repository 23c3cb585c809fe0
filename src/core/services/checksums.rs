//! Checksum writer and verifier for fixture trees
//!
//! Files are hashed with SHA-256 by streaming fixed-size chunks, so large
//! media fixtures are never loaded whole. Output is sorted by relative path
//! and byte-for-byte reproducible.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use thiserror::Error;
use walkdir::WalkDir;

use crate::config::FixturesConfig;
use crate::core::models::ChecksumRecord;
use crate::paths;

/// Read size for hashing
const CHUNK_SIZE: usize = 1024 * 1024;

/// Errors producing or checking checksums
#[derive(Debug, Error)]
pub enum ChecksumError {
    /// A file could not be read
    #[error("failed to read {path}: {source}")]
    Read {
        /// File path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The checksum file could not be written
    #[error("failed to write {path}: {source}")]
    Write {
        /// File path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Error walking the fixture tree
    #[error("walkdir error: {0}")]
    Walk(#[from] walkdir::Error),

    /// A checksum file line is not `<digest>  <path>`
    #[error("line {line}: malformed checksum entry: {content}")]
    Malformed {
        /// 1-based line number
        line: usize,
        /// Offending text
        content: String,
    },
}

/// What to leave out of a checksum manifest
#[derive(Debug, Clone, Default)]
pub struct ChecksumOptions {
    /// Exact file names to skip
    pub exclude_names: Vec<String>,
    /// Extensions (without the dot) to skip
    pub archive_extensions: Vec<String>,
    /// A specific file to skip, normally the checksum output itself
    pub output: Option<PathBuf>,
}

impl ChecksumOptions {
    /// Options from the `[fixtures]` config section
    #[must_use]
    pub fn from_config(config: &FixturesConfig, output: PathBuf) -> Self {
        Self {
            exclude_names: config.exclude_names.clone(),
            archive_extensions: config.archive_extensions.clone(),
            output: Some(output),
        }
    }

    fn skips(&self, path: &Path) -> bool {
        let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        if self.exclude_names.iter().any(|n| *n == name) {
            return true;
        }
        let is_archive = path.extension().is_some_and(|ext| {
            let ext = ext.to_string_lossy();
            self.archive_extensions.iter().any(|a| a.eq_ignore_ascii_case(&ext))
        });
        is_archive || self.output.as_deref().is_some_and(|out| same_file(out, path))
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// SHA-256 of a file as lowercase hex
pub fn sha256_file(path: &Path) -> Result<String, ChecksumError> {
    let read_err = |source| ChecksumError::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(read_err)?;
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let n = file.read(&mut buf).map_err(read_err)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Hash every eligible file under `root`, sorted by relative path
pub fn collect(root: &Path, options: &ChecksumOptions) -> Result<Vec<ChecksumRecord>, ChecksumError> {
    let mut records = Vec::new();

    for entry in WalkDir::new(root).into_iter().filter_entry(|e| e.file_name() != ".git") {
        let entry = entry?;
        // Symlinked files count as files
        if !entry.path().is_file() || options.skips(entry.path()) {
            continue;
        }
        let relative = paths::relative_slash(root, entry.path());
        records.push(ChecksumRecord::new(relative, sha256_file(entry.path())?));
    }

    records.sort();
    Ok(records)
}

/// Render records as checksum file text.
///
/// The text always ends with a newline, so an empty tree renders as `"\n"`.
#[must_use]
pub fn render(records: &[ChecksumRecord]) -> String {
    let mut text = records.iter().map(ChecksumRecord::to_line).collect::<Vec<_>>().join("\n");
    text.push('\n');
    text
}

/// Hash the tree under `root` and write the manifest to `output`
pub fn write_checksums(
    root: &Path,
    output: &Path,
    options: &ChecksumOptions,
) -> Result<Vec<ChecksumRecord>, ChecksumError> {
    let records = collect(root, options)?;
    let write_err = |source| ChecksumError::Write {
        path: output.to_path_buf(),
        source,
    };
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(output, render(&records)).map_err(write_err)?;
    Ok(records)
}

/// Parse checksum file text; blank lines are ignored
pub fn parse_checksums(content: &str) -> Result<Vec<ChecksumRecord>, ChecksumError> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            ChecksumRecord::parse_line(line).ok_or_else(|| ChecksumError::Malformed {
                line: idx + 1,
                content: line.to_string(),
            })
        })
        .collect()
}

/// Result of checking a tree against its manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifySummary {
    /// Paths whose digest matches
    pub ok: Vec<String>,
    /// Paths whose digest differs
    pub mismatched: Vec<String>,
    /// Paths that no longer exist
    pub missing: Vec<String>,
}

impl VerifySummary {
    /// True when every entry matched
    #[must_use]
    pub fn passed(&self) -> bool {
        self.mismatched.is_empty() && self.missing.is_empty()
    }
}

/// Recompute each recorded digest under `root`
pub fn verify(root: &Path, records: &[ChecksumRecord]) -> Result<VerifySummary, ChecksumError> {
    let mut summary = VerifySummary::default();
    for record in records {
        let path = root.join(&record.path);
        if !path.is_file() {
            log::warn!("missing: {}", record.path);
            summary.missing.push(record.path.clone());
            continue;
        }
        if sha256_file(&path)? == record.digest {
            summary.ok.push(record.path.clone());
        } else {
            log::warn!("checksum mismatch: {}", record.path);
            summary.mismatched.push(record.path.clone());
        }
    }
    Ok(summary)
}
