//! Checksums command - write the fixture checksum manifest

use std::path::PathBuf;
use std::process::ExitCode;

use super::Context;
use upkeep::core::services::ChecksumOptions;
use upkeep::core::services::checksums::write_checksums;
use upkeep::output::ChecksumResult;

/// Hash every fixture file and write `<digest>  <path>` lines
pub fn checksums(
    ctx: &Context,
    dir: Option<PathBuf>,
    output: Option<PathBuf>,
) -> anyhow::Result<ExitCode> {
    let dir = ctx.fixture_dir(dir);
    let output = ctx.file_or(output, &dir, &ctx.config.fixtures.checksums);
    let options = ChecksumOptions::from_config(&ctx.config.fixtures, output.clone());

    let records = write_checksums(&dir, &output, &options)?;

    ChecksumResult {
        output: output.display().to_string(),
        entries: records.len(),
    }
    .render(ctx.output_mode);
    Ok(ExitCode::SUCCESS)
}
