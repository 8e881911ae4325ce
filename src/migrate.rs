//! Move Storybook setups from `webpack.config.js` overrides to `webpackFinal`.
//!
//! Every project with a Storybook target gets the commented hook in its
//! `main.js`; scaffolded overrides nobody edited are deleted. The workspace
//! root gets the same treatment with the root-level template.
use crate::config::MigrateConfig;
use crate::templates::{PROJECT_WEBPACK_CONFIG_JS, ROOT_WEBPACK_CONFIG_JS};
use crate::transform::{insert_webpack_final, remove_if_default, HookOutcome, OverrideOutcome};
use crate::tree::{join_path_fragments, Tree};
use crate::workspace::ProjectDescriptor;
use anyhow::Result;
use serde::Serialize;

/// Summary of one migration run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    /// True if any file was written or deleted.
    pub changed: bool,
    pub updated: Vec<String>,
    pub deleted: Vec<String>,
    pub retained_overrides: Vec<String>,
    pub skipped_projects: Vec<String>,
}

impl MigrationReport {
    fn record_hook(&mut self, path: String, outcome: HookOutcome) {
        if outcome.changed() {
            self.changed = true;
            self.updated.push(path);
        }
    }

    fn record_override(&mut self, path: String, outcome: OverrideOutcome) {
        match outcome {
            OverrideOutcome::Removed => {
                self.changed = true;
                self.deleted.push(path);
            }
            OverrideOutcome::Customized => self.retained_overrides.push(path),
            OverrideOutcome::Absent => {}
        }
    }
}

/// Run the project and root migrations against `tree`.
pub fn run_migration(
    tree: &mut Tree,
    projects: &[ProjectDescriptor],
    config: &MigrateConfig,
) -> Result<MigrationReport> {
    let mut report = MigrationReport::default();
    migrate_projects(tree, projects, config, &mut report)?;
    migrate_root(tree, config, &mut report)?;
    Ok(report)
}

pub fn migrate_projects(
    tree: &mut Tree,
    projects: &[ProjectDescriptor],
    config: &MigrateConfig,
    report: &mut MigrationReport,
) -> Result<()> {
    for project in projects {
        let webpack_config = join_path_fragments(&project.root, &config.webpack_config_rel());
        let main_config = join_path_fragments(&project.root, &config.main_config_rel());

        let storybook_target = project.find_target(&config.storybook_executor);
        if storybook_target.is_none() || !tree.exists(&main_config) {
            tracing::info!("{}: no storybook configured. skipping migration...", project.name);
            report.skipped_projects.push(project.name.clone());
            continue;
        }

        let hook = insert_webpack_final(tree, &main_config)?;
        report.record_hook(main_config, hook);

        let removal = remove_if_default(tree, &webpack_config, PROJECT_WEBPACK_CONFIG_JS)?;
        report.record_override(webpack_config, removal);
    }
    Ok(())
}

pub fn migrate_root(
    tree: &mut Tree,
    config: &MigrateConfig,
    report: &mut MigrationReport,
) -> Result<()> {
    let main_config = join_path_fragments("", &config.main_config_rel());
    let hook = insert_webpack_final(tree, &main_config)?;
    report.record_hook(main_config, hook);

    let webpack_config = join_path_fragments("", &config.webpack_config_rel());
    let removal = remove_if_default(tree, &webpack_config, ROOT_WEBPACK_CONFIG_JS)?;
    report.record_override(webpack_config, removal);
    Ok(())
}

#[cfg(test)]
#[path = "migrate_tests.rs"]
mod tests;
