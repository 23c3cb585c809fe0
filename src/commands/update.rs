//! Update command - tick the checkboxes of likely-complete tasks

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context as _;

use super::Context;
use upkeep::core::services::apply_results;
use upkeep::core::services::validator::load_results;
use upkeep::output::UpdateResult;

/// Apply a results file to the markdown it came from
pub fn update(ctx: &Context, results: Option<PathBuf>, dry_run: bool) -> anyhow::Result<ExitCode> {
    let path = ctx.results_file(results);
    if !path.exists() {
        anyhow::bail!(
            "{} not found. Run `upkeep tasks validate` first.",
            path.display()
        );
    }
    let results = load_results(&path)
        .with_context(|| format!("cannot load validation results from {}", path.display()))?;

    let summary = apply_results(&ctx.root, &results, dry_run);
    UpdateResult::new(summary, dry_run).render(ctx.output_mode);
    Ok(ExitCode::SUCCESS)
}
