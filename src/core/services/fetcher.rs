//! Fixture fetcher - download manifest assets with bounded retry
//!
//! A destination that already exists and is non-empty is left alone, so a
//! rerun only downloads what is missing. Transient failures are retried with
//! a linear backoff (`step × attempt`); once the attempts run out the error
//! propagates and the caller aborts the run.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use thiserror::Error;

use crate::core::models::AssetManifest;
use crate::core::ports::{HttpClient, HttpError};
use crate::paths;

/// Errors from fetching fixtures
#[derive(Debug, Error)]
pub enum FetchError {
    /// Every attempt failed with a transient error
    #[error("giving up on {url} after {attempts} attempt(s)")]
    Exhausted {
        /// Source URL
        url: String,
        /// Attempts made
        attempts: u32,
        /// Last failure
        #[source]
        source: HttpError,
    },

    /// A failure retrying cannot fix
    #[error("request failed")]
    Request(#[from] HttpError),

    /// Local filesystem failure
    #[error("failed to write {path}: {source}")]
    Io {
        /// Path being written
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The manifest could not be read
    #[error("failed to read manifest {path}: {source}")]
    ManifestRead {
        /// Manifest path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The manifest is not valid JSON for this schema
    #[error("malformed manifest {path}: {source}")]
    ManifestParse {
        /// Manifest path
        path: PathBuf,
        /// Underlying error
        source: serde_json::Error,
    },
}

/// How many times to try and how long to wait in between
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts per file, including the first
    pub max_attempts: u32,
    /// Attempt `n` is followed by a wait of `n × backoff_step`
    pub backoff_step: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_step: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// Wait after the given failed attempt (1-based)
    #[must_use]
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.backoff_step.saturating_mul(attempt)
    }
}

/// What [`Fetcher::ensure`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The destination was already present and non-empty
    AlreadyPresent,
    /// The file was downloaded
    Downloaded {
        /// Body size
        bytes: u64,
        /// Attempts it took
        attempts: u32,
    },
}

/// Per-run summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchSummary {
    /// Paths (relative to the fixture root) downloaded this run
    pub downloaded: Vec<String>,
    /// Paths already present
    pub present: Vec<String>,
}

/// Downloads fixture files through an [`HttpClient`]
#[derive(Debug)]
pub struct Fetcher<C> {
    client: C,
    policy: RetryPolicy,
}

impl<C: HttpClient> Fetcher<C> {
    /// Create a fetcher
    #[must_use]
    pub const fn new(client: C, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    /// Ensure `dest` exists and is non-empty, downloading `url` if not
    pub fn ensure(&self, url: &str, dest: &Path) -> Result<FetchOutcome, FetchError> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|source| FetchError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        if is_present(dest) {
            log::info!("already present: {}", dest.display());
            return Ok(FetchOutcome::AlreadyPresent);
        }

        let part = part_path(dest);
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 0;
        let bytes = loop {
            attempt += 1;
            log::info!("downloading {url}");
            let mut file = File::create(&part).map_err(|source| FetchError::Io {
                path: part.clone(),
                source,
            })?;
            let result = self.client.download(url, &mut file);
            drop(file);

            let e = match result {
                Ok(bytes) => break bytes,
                Err(e) => e,
            };
            let _ = fs::remove_file(&part);
            if !e.is_transient() {
                return Err(FetchError::Request(e));
            }
            if attempt >= max_attempts {
                return Err(FetchError::Exhausted {
                    url: url.to_string(),
                    attempts: attempt,
                    source: e,
                });
            }
            let wait = self.policy.delay_after(attempt);
            log::warn!(
                "download failed (attempt {attempt}/{max_attempts}): {e}. Retrying in {}s",
                wait.as_secs()
            );
            thread::sleep(wait);
        };

        fs::rename(&part, dest).map_err(|source| {
            let _ = fs::remove_file(&part);
            FetchError::Io {
                path: dest.to_path_buf(),
                source,
            }
        })?;
        Ok(FetchOutcome::Downloaded {
            bytes,
            attempts: attempt,
        })
    }

    /// Fetch every `download_via_script` entry of `manifest` under `root`.
    ///
    /// Stops at the first file that cannot be fetched.
    pub fn fetch_manifest(
        &self,
        manifest: &AssetManifest,
        root: &Path,
    ) -> Result<FetchSummary, FetchError> {
        let mut summary = FetchSummary::default();
        for download in manifest.downloads() {
            let dest = paths::resolve(root, Path::new(&download.path));
            match self.ensure(&download.url, &dest)? {
                FetchOutcome::AlreadyPresent => summary.present.push(download.path.clone()),
                FetchOutcome::Downloaded { .. } => summary.downloaded.push(download.path.clone()),
            }
        }
        Ok(summary)
    }
}

/// Read and parse a manifest file
pub fn load_manifest(path: &Path) -> Result<AssetManifest, FetchError> {
    let content = fs::read_to_string(path).map_err(|source| FetchError::ManifestRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| FetchError::ManifestParse {
        path: path.to_path_buf(),
        source,
    })
}

fn is_present(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|m| m.is_file() && m.len() > 0)
}

/// Bodies stream into `<dest>.part` and are renamed over `dest` once complete
fn part_path(dest: &Path) -> PathBuf {
    let mut part_name = dest.file_name().unwrap_or_default().to_os_string();
    part_name.push(".part");
    dest.with_file_name(part_name)
}
