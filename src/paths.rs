//! Centralized path definitions for upkeep
//!
//! Every component takes an explicit repository root; this module decides
//! what that root is when the user does not pass one, and where the files
//! upkeep reads and writes live relative to it.
//!
//! ```text
//! repo/
//! ├── upkeep.toml                        # optional project config
//! ├── task_validation_results.json       # validate → update hand-off
//! └── <fixtures.dir>/
//!     └── meta/
//!         ├── manifest.json              # remote assets
//!         └── checksums.sha256           # generated
//! ```

use std::path::{Component, Path, PathBuf};

/// Project configuration filename
pub const CONFIG_FILE: &str = "upkeep.toml";

/// Find the repository root for `start`.
///
/// Returns the enclosing git work tree, or `start` itself when it is not
/// inside a repository (or the repository is bare).
#[must_use]
pub fn discover_root(start: &Path) -> PathBuf {
    git2::Repository::discover(start)
        .ok()
        .and_then(|repo| repo.workdir().map(Path::to_path_buf))
        .unwrap_or_else(|| start.to_path_buf())
}

/// Default config file for a root
#[must_use]
pub fn config_file(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Resolve `path` against `base` unless it is already absolute
#[must_use]
pub fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Render `path` relative to `root` with `/` separators.
///
/// Paths outside `root` are rendered as given.
#[must_use]
pub fn relative_slash(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::CurDir => None,
            other => Some(other.as_os_str().to_string_lossy().into_owned()),
        })
        .collect();
    parts.join("/")
}
