//! Run git with a deadline
//!
//! The child is polled until it exits or the budget runs out, then killed.
//! Callers only ask git for tiny outputs (`-q`, `-n 1`), so stdout is read
//! after exit without risk of the pipe filling up.

use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::core::ports::SearchError;

/// Interval between exit checks
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Output of a finished git command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitOutput {
    /// Exit code (`None` if killed by a signal)
    pub code: Option<i32>,
    /// Captured stdout
    pub stdout: String,
    /// Captured stderr
    pub stderr: String,
}

/// Run `git <args>` in `workdir`, killing it after `timeout`
pub fn run_git(workdir: &Path, args: &[&str], timeout: Duration) -> Result<GitOutput, SearchError> {
    let command = format!("git {}", args.join(" "));
    log::debug!("running `{command}` in {}", workdir.display());

    let mut child = Command::new("git")
        .args(args)
        .current_dir(workdir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let started = Instant::now();
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if started.elapsed() >= timeout {
            let _ = child.kill();
            let _ = child.wait();
            return Err(SearchError::Timeout { command, timeout });
        }
        thread::sleep(POLL_INTERVAL);
    };

    let mut stdout = String::new();
    if let Some(mut out) = child.stdout.take() {
        out.read_to_string(&mut stdout)?;
    }
    let mut stderr = String::new();
    if let Some(mut err) = child.stderr.take() {
        err.read_to_string(&mut stderr)?;
    }

    Ok(GitOutput {
        code: status.code(),
        stdout,
        stderr,
    })
}
