//! Shared test fixtures and helpers
//!
//! This module provides common utilities for testing upkeep components.

use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A scratch tree with a small docs layout:
/// ```text
/// /
/// ├── docs/
/// │   └── plan.md
/// ├── node_modules/
/// │   └── dep.md
/// ├── .hidden/
/// │   └── notes.md
/// └── README.md
/// ```
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    /// Create the standard layout
    pub fn new() -> Self {
        let repo = Self::empty();
        repo.add_file(
            "docs/plan.md",
            "# Plan\n\n- [ ] Implement the login page T-SF03\n- [x] Done already and long enough\nTODO: wire the cache layer\n",
        );
        repo.add_file("node_modules/dep.md", "- [ ] Vendored checklist item that should never count\n");
        repo.add_file(".hidden/notes.md", "- [ ] Hidden checklist item that should never count\n");
        repo.add_file("README.md", "- [ ] Readme checklist item that should never count\n");
        repo
    }

    /// Create an empty tree
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    /// Get the root path of the test repository
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a file, creating parent directories
    pub fn add_file(&self, path: &str, content: &str) {
        self.add_bytes(path, content.as_bytes());
    }

    /// Add a binary file, creating parent directories
    pub fn add_bytes(&self, path: &str, content: &[u8]) {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }

    /// Read a file back
    pub fn read(&self, path: &str) -> String {
        fs::read_to_string(self.dir.path().join(path)).unwrap()
    }
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}
