//! CLI argument parsing for the Storybook workspace migration.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sbmigrate",
    version,
    about = "Move Storybook webpack overrides to the webpackFinal hook",
    after_help = "Commands:\n  migrate --workspace <dir>   Add webpackFinal to main.js and drop default webpack.config.js files\n  projects --workspace <dir>  List projects and their Storybook setup\n\nExamples:\n  sbmigrate projects --workspace .\n  sbmigrate migrate --workspace . --dry-run\n  sbmigrate migrate --workspace . --format-command \"npx prettier --write\"",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Migrate(MigrateArgs),
    Projects(ProjectsArgs),
}

impl Command {
    pub fn verbose(&self) -> bool {
        match self {
            Command::Migrate(args) => args.verbose,
            Command::Projects(_) => false,
        }
    }
}

/// Inputs shared by every command.
#[derive(Parser, Debug)]
pub struct WorkspaceArgs {
    /// Workspace root containing workspace.json or angular.json
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub workspace: PathBuf,

    /// Optional migrate config JSON
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Executor that marks a Storybook target (overrides config)
    #[arg(long, value_name = "ID")]
    pub executor: Option<String>,
}

#[derive(Parser, Debug)]
#[command(about = "Add webpackFinal to main.js and remove default webpack.config.js overrides")]
pub struct MigrateArgs {
    #[command(flatten)]
    pub workspace: WorkspaceArgs,

    /// Formatter run on written files, e.g. "npx prettier --write" (overrides config)
    #[arg(long, value_name = "CMD")]
    pub format_command: Option<String>,

    /// Report changes without touching the workspace
    #[arg(long)]
    pub dry_run: bool,

    /// Emit the migration report as JSON
    #[arg(long)]
    pub json: bool,

    /// Log debug detail
    #[arg(long)]
    pub verbose: bool,
}

#[derive(Parser, Debug)]
#[command(about = "List workspace projects and their Storybook setup")]
pub struct ProjectsArgs {
    #[command(flatten)]
    pub workspace: WorkspaceArgs,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}
