//! Verify command - compare fixture files against the checksum manifest

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context as _;

use super::Context;
use upkeep::core::services::checksums::{parse_checksums, verify as verify_records};
use upkeep::output::VerifyResult;

/// Recompute digests and report mismatched or missing files.
///
/// Exits non-zero when anything differs.
pub fn verify(
    ctx: &Context,
    dir: Option<PathBuf>,
    checksums: Option<PathBuf>,
) -> anyhow::Result<ExitCode> {
    let dir = ctx.fixture_dir(dir);
    let path = ctx.file_or(checksums, &dir, &ctx.config.fixtures.checksums);

    let content = fs::read_to_string(&path)
        .with_context(|| format!("cannot read checksum file {}", path.display()))?;
    let records = parse_checksums(&content)
        .with_context(|| format!("invalid checksum file {}", path.display()))?;

    let result = VerifyResult::from(verify_records(&dir, &records)?);
    result.render(ctx.output_mode);

    Ok(if result.passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
