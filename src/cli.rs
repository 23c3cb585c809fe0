//! CLI definitions and entry point

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use crate::commands::{self, Context};
use upkeep::config::UpkeepConfig;
use upkeep::output::OutputMode;
use upkeep::paths;

/// upkeep - Fixture and task-list maintenance
#[derive(Parser, Debug)]
#[command(
    name = "upkeep",
    version,
    about = "Fixture and task-list maintenance for a repository",
    long_about = "Download fixture assets and keep their checksums current.\n\n\
                  Scan markdown for open tasks, look for evidence in commits and code\n\
                  that they are done, and tick the boxes of those that are."
)]
pub struct Cli {
    /// Repository root (default: enclosing git work tree, else the current directory)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Config file (default: <root>/upkeep.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fixture assets (fetch, checksums, verify)
    Fixtures {
        #[command(subcommand)]
        action: FixturesAction,
    },

    /// Markdown tasks (validate, update)
    Tasks {
        #[command(subcommand)]
        action: TasksAction,
    },

    /// Show version
    Version,
}

#[derive(Subcommand, Debug)]
pub enum FixturesAction {
    /// Download every asset listed in the manifest that is not already present
    Fetch {
        /// Fixture directory
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Asset manifest (default: <dir>/meta/manifest.json)
        #[arg(long)]
        manifest: Option<PathBuf>,
    },

    /// Write a SHA-256 manifest of every fixture file
    Checksums {
        /// Fixture directory
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Checksum file to write (default: <dir>/meta/checksums.sha256)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check fixture files against a checksum manifest
    Verify {
        /// Fixture directory
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Checksum file to read (default: <dir>/meta/checksums.sha256)
        #[arg(long)]
        checksums: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum TasksAction {
    /// Find open tasks and judge which look complete
    Validate {
        /// Results file to write (default: <root>/task_validation_results.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Tick the checkboxes of tasks judged likely complete
    Update {
        /// Results file to read (default: <root>/task_validation_results.json)
        #[arg(long)]
        results: Option<PathBuf>,

        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,
    },
}

/// Run the CLI
pub fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let Some(command) = cli.command else {
        if output_mode == OutputMode::Json {
            println!(
                "{}",
                serde_json::json!({
                    "version": upkeep::VERSION,
                    "hint": "Use --help for usage"
                })
            );
        } else {
            println!("upkeep v{}", upkeep::VERSION);
            println!("\nRun 'upkeep --help' for usage");
        }
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Command::Version => {
            if output_mode == OutputMode::Json {
                println!("{}", serde_json::json!({ "version": upkeep::VERSION }));
            } else {
                println!("upkeep v{}", upkeep::VERSION);
            }
            Ok(ExitCode::SUCCESS)
        },
        Command::Fixtures { action } => {
            let ctx = load_context(cli.root, cli.config, output_mode)?;
            match action {
                FixturesAction::Fetch { dir, manifest } => commands::fetch(&ctx, dir, manifest),
                FixturesAction::Checksums { dir, output } => commands::checksums(&ctx, dir, output),
                FixturesAction::Verify { dir, checksums } => commands::verify(&ctx, dir, checksums),
            }
        },
        Command::Tasks { action } => {
            let ctx = load_context(cli.root, cli.config, output_mode)?;
            match action {
                TasksAction::Validate { output } => commands::validate(&ctx, output),
                TasksAction::Update { results, dry_run } => {
                    commands::update(&ctx, results, dry_run)
                },
            }
        },
    }
}

fn load_context(
    root: Option<PathBuf>,
    config: Option<PathBuf>,
    output_mode: OutputMode,
) -> anyhow::Result<Context> {
    let cwd = std::env::current_dir().context("cannot read current directory")?;
    let root = root.map_or_else(|| paths::discover_root(&cwd), |r| paths::resolve(&cwd, &r));
    let config_path =
        config.map_or_else(|| paths::config_file(&root), |c| paths::resolve(&cwd, &c));
    let config = UpkeepConfig::load(&config_path)?;
    log::debug!("repository root: {}", root.display());

    Ok(Context {
        cwd,
        root,
        config,
        output_mode,
    })
}
