//! Project configuration
//!
//! Read from `upkeep.toml` at the repository root. Every key has a default,
//! so the file is optional; a file that exists but does not parse is an
//! error.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read
    #[error("failed to read {path}: {source}")]
    Read {
        /// Config file path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema
    #[error("invalid config {path}: {source}")]
    Parse {
        /// Config file path
        path: PathBuf,
        /// Underlying error
        source: toml::de::Error,
    },
}

/// Top-level `upkeep.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpkeepConfig {
    /// Markdown task scanning
    pub tasks: TasksConfig,
    /// Evidence search for the validator
    pub search: SearchConfig,
    /// Fixture download and checksums
    pub fixtures: FixturesConfig,
}

/// `[tasks]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TasksConfig {
    /// Markdown files whose path contains any of these are not scanned
    pub exclude: Vec<String>,
    /// Directory names never descended into (dot-directories are always skipped)
    pub ignore_dirs: Vec<String>,
    /// Checkbox lines shorter than this (after trimming) are noise
    pub min_length: usize,
    /// Results file, relative to the repository root
    pub results: PathBuf,
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            exclude: strings(&["CURSOR-WARNINGS", "README", "CONTRIBUTING", "AGENTS.md"]),
            ignore_dirs: strings(&[
                ".git",
                "node_modules",
                "__pycache__",
                ".venv",
                "bin",
                "obj",
                ".vs",
                ".idea",
            ]),
            min_length: 20,
            results: PathBuf::from("task_validation_results.json"),
        }
    }
}

/// `[search]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Pathspecs counted as implementation evidence
    pub implementation: Vec<String>,
    /// Pathspecs counted as test evidence (empty = not searched)
    pub tests: Vec<String>,
    /// Pathspecs counted as config evidence (empty = not searched)
    pub config: Vec<String>,
    /// Keywords taken from each task's text
    pub max_keywords: usize,
    /// Budget for one file search
    pub grep_timeout_secs: u64,
    /// Budget for one commit log search
    pub log_timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            implementation: strings(&["*.cs", "*.js", "*.jsx", "*.ts", "*.tsx"]),
            tests: Vec::new(),
            config: Vec::new(),
            max_keywords: 3,
            grep_timeout_secs: 5,
            log_timeout_secs: 30,
        }
    }
}

impl SearchConfig {
    /// File search budget
    #[must_use]
    pub const fn grep_timeout(&self) -> Duration {
        Duration::from_secs(self.grep_timeout_secs)
    }

    /// Commit log search budget
    #[must_use]
    pub const fn log_timeout(&self) -> Duration {
        Duration::from_secs(self.log_timeout_secs)
    }
}

/// `[fixtures]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FixturesConfig {
    /// Fixture tree root, relative to the repository root
    pub dir: PathBuf,
    /// Asset manifest, relative to the fixture root
    pub manifest: PathBuf,
    /// Checksum file, relative to the fixture root
    pub checksums: PathBuf,
    /// File names never checksummed
    pub exclude_names: Vec<String>,
    /// Archive extensions never checksummed (without the dot)
    pub archive_extensions: Vec<String>,
    /// Download attempts per file
    pub retries: u32,
    /// Backoff step; attempt `n` waits `n * backoff_secs`
    pub backoff_secs: u64,
    /// Per-request timeout
    pub timeout_secs: u64,
}

impl Default for FixturesConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            manifest: PathBuf::from("meta/manifest.json"),
            checksums: PathBuf::from("meta/checksums.sha256"),
            exclude_names: strings(&["checksums.sha256", "_download_list.tsv"]),
            archive_extensions: strings(&["zip"]),
            retries: 3,
            backoff_secs: 2,
            timeout_secs: 60,
        }
    }
}

impl UpkeepConfig {
    /// Load config from `path`, falling back to defaults if it does not exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse config from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}
