//! Checksum records
//!
//! One line of a checksum file: `<hex digest>  <relative path>`, the same
//! layout `sha256sum` prints.

use std::cmp::Ordering;

/// Separator between digest and path
pub const FIELD_SEPARATOR: &str = "  ";

/// A file path and its SHA-256 digest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumRecord {
    /// Path relative to the fixture root, `/` separated
    pub path: String,
    /// Lowercase hex digest
    pub digest: String,
}

impl ChecksumRecord {
    /// Create a record
    #[must_use]
    pub fn new(path: impl Into<String>, digest: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            digest: digest.into(),
        }
    }

    /// Render as a checksum file line (without the newline)
    #[must_use]
    pub fn to_line(&self) -> String {
        format!("{}{FIELD_SEPARATOR}{}", self.digest, self.path)
    }

    /// Parse a checksum file line
    #[must_use]
    pub fn parse_line(line: &str) -> Option<Self> {
        let (digest, path) = line.split_once(FIELD_SEPARATOR)?;
        let digest = digest.trim();
        if digest.is_empty() || path.is_empty() || !digest.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        Some(Self::new(path, digest.to_lowercase()))
    }
}

impl PartialOrd for ChecksumRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ChecksumRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path.cmp(&other.path).then_with(|| self.digest.cmp(&other.digest))
    }
}
