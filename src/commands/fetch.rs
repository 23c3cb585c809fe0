//! Fetch command - download missing fixture assets

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use super::Context;
use upkeep::adapters::ReqwestClient;
use upkeep::core::services::fetcher::load_manifest;
use upkeep::core::services::{Fetcher, RetryPolicy};
use upkeep::output::FetchResult;

/// Download every manifest entry that is not already on disk
pub fn fetch(
    ctx: &Context,
    dir: Option<PathBuf>,
    manifest: Option<PathBuf>,
) -> anyhow::Result<ExitCode> {
    let fixtures = &ctx.config.fixtures;
    let dir = ctx.fixture_dir(dir);
    let manifest_path = ctx.file_or(manifest, &dir, &fixtures.manifest);

    let manifest = load_manifest(&manifest_path)?;
    log::info!("{} downloads listed in {}", manifest.downloads().count(), manifest_path.display());

    let client = ReqwestClient::new(Duration::from_secs(fixtures.timeout_secs))?;
    let policy = RetryPolicy {
        max_attempts: fixtures.retries,
        backoff_step: Duration::from_secs(fixtures.backoff_secs),
    };
    let summary = Fetcher::new(client, policy).fetch_manifest(&manifest, &dir)?;

    FetchResult::from(summary).render(ctx.output_mode);
    Ok(ExitCode::SUCCESS)
}
