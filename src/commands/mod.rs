//! Command implementations
//!
//! Each command resolves its paths, calls into the library and renders a
//! result from [`upkeep::output`].

mod checksums;
mod fetch;
mod update;
mod validate;
mod verify;

use std::path::{Path, PathBuf};

use upkeep::config::UpkeepConfig;
use upkeep::output::OutputMode;
use upkeep::paths;

pub use checksums::checksums;
pub use fetch::fetch;
pub use update::update;
pub use validate::validate;
pub use verify::verify;

/// Everything a command needs from the global flags
#[derive(Debug)]
pub struct Context {
    /// Directory the user ran upkeep from
    pub cwd: PathBuf,
    /// Repository root
    pub root: PathBuf,
    /// Loaded `upkeep.toml`
    pub config: UpkeepConfig,
    /// Human or JSON output
    pub output_mode: OutputMode,
}

impl Context {
    /// Fixture directory: `--dir` against the working directory, else the
    /// configured one against the root
    pub fn fixture_dir(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.map_or_else(
            || paths::resolve(&self.root, &self.config.fixtures.dir),
            |d| paths::resolve(&self.cwd, &d),
        )
    }

    /// A file flag against the working directory, else `default` against `base`
    pub fn file_or(&self, flag: Option<PathBuf>, base: &Path, default: &Path) -> PathBuf {
        flag.map_or_else(|| paths::resolve(base, default), |f| paths::resolve(&self.cwd, &f))
    }

    /// Results file for validate and update
    pub fn results_file(&self, flag: Option<PathBuf>) -> PathBuf {
        self.file_or(flag, &self.root, &self.config.tasks.results)
    }
}
