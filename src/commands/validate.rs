//! Validate command - judge which markdown tasks look complete

use std::path::PathBuf;
use std::process::ExitCode;

use super::Context;
use upkeep::adapters::GitRepoSearch;
use upkeep::core::services::extractor::{extract_from_file, find_markdown_files};
use upkeep::core::services::TaskValidator;
use upkeep::core::services::validator::save_results;
use upkeep::output::ValidateResult;
use upkeep::paths;

/// Scan markdown, search for evidence, and save the results file
pub fn validate(ctx: &Context, output: Option<PathBuf>) -> anyhow::Result<ExitCode> {
    let tasks_config = &ctx.config.tasks;
    let results_path = ctx.results_file(output);

    let files = find_markdown_files(&ctx.root, tasks_config);
    log::info!("scanning {} markdown files", files.len());

    let tasks: Vec<_> = files
        .iter()
        .flat_map(|f| extract_from_file(&ctx.root, f, tasks_config))
        .collect();
    log::info!("found {} open tasks, validating", tasks.len());

    let search = GitRepoSearch::from_config(ctx.root.clone(), &ctx.config.search);
    let validator = TaskValidator::new(search, ctx.config.search.clone());
    let results = validator.validate_all(tasks);

    save_results(&results_path, &results)?;

    ValidateResult::new(files.len(), &results, paths::relative_slash(&ctx.root, &results_path))
        .render(ctx.output_mode);
    Ok(ExitCode::SUCCESS)
}
