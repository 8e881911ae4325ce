use crate::cli::{MigrateArgs, ProjectsArgs, WorkspaceArgs};
use crate::config::{load_config, validate_config, MigrateConfig};
use crate::format::format_files;
use crate::migrate::{run_migration, MigrationReport};
use crate::tree::{join_path_fragments, FileChange, Tree};
use crate::workspace::read_projects;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub fn run_migrate(args: MigrateArgs) -> Result<()> {
    let workspace_root = resolve_workspace_root(&args.workspace.workspace)?;
    let mut config = resolve_config(&args.workspace)?;
    if let Some(command) = args.format_command {
        config.format_command = Some(command);
    }
    validate_config(&config)?;

    let mut tree = Tree::on_disk(workspace_root.clone());
    let projects = read_projects(&tree, &config)?;
    let report = run_migration(&mut tree, &projects, &config)?;

    if args.json {
        let text = serde_json::to_string_pretty(&report).context("serialize migration report")?;
        println!("{text}");
    } else {
        print_changes(&tree, &report);
    }

    if args.dry_run {
        tracing::info!("dry run: no files were written");
        return Ok(());
    }

    let written = tree.written_paths();
    tree.commit()
        .with_context(|| format!("apply changes under {}", workspace_root.display()))?;

    if report.changed {
        if let Some(command) = config.format_command.as_deref() {
            format_files(&workspace_root, command, &written)?;
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct ProjectStatus {
    name: String,
    root: String,
    storybook_target: Option<String>,
    main_config: String,
    main_config_exists: bool,
}

pub fn run_projects(args: ProjectsArgs) -> Result<()> {
    let workspace_root = resolve_workspace_root(&args.workspace.workspace)?;
    let config = resolve_config(&args.workspace)?;
    validate_config(&config)?;

    let tree = Tree::on_disk(workspace_root);
    let statuses: Vec<ProjectStatus> = read_projects(&tree, &config)?
        .into_iter()
        .map(|project| {
            let main_config = join_path_fragments(&project.root, &config.main_config_rel());
            ProjectStatus {
                storybook_target: project
                    .find_target(&config.storybook_executor)
                    .map(str::to_string),
                main_config_exists: tree.exists(&main_config),
                main_config,
                name: project.name,
                root: project.root,
            }
        })
        .collect();

    if args.json {
        let text = serde_json::to_string_pretty(&statuses).context("serialize project list")?;
        println!("{text}");
        return Ok(());
    }
    for status in &statuses {
        let setup = match (&status.storybook_target, status.main_config_exists) {
            (Some(target), true) => format!("storybook target {target:?}"),
            (Some(target), false) => format!(
                "storybook target {target:?}, missing {}",
                status.main_config
            ),
            (None, _) => "no storybook target".to_string(),
        };
        println!("{} ({}): {setup}", status.name, status.root);
    }
    Ok(())
}

fn resolve_config(args: &WorkspaceArgs) -> Result<MigrateConfig> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(executor) = &args.executor {
        config.storybook_executor = executor.clone();
    }
    Ok(config)
}

fn resolve_workspace_root(path: &Path) -> Result<PathBuf> {
    path.canonicalize()
        .with_context(|| format!("resolve workspace root {}", path.display()))
}

fn print_changes(tree: &Tree, report: &MigrationReport) {
    for (path, change) in tree.changes() {
        match change {
            FileChange::Write(_) => println!("UPDATE {path}"),
            FileChange::Delete => println!("DELETE {path}"),
        }
    }
    for path in &report.retained_overrides {
        println!("KEEP {path} (customized)");
    }
    if !report.changed {
        println!("No changes.");
    }
}
