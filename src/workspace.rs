//! Project enumeration from workspace configuration.
//!
//! Reads `workspace.json` (or `angular.json`) through the tree so pending
//! edits are visible, and resolves standalone `project.json` entries.
use crate::config::MigrateConfig;
use crate::tree::{join_path_fragments, Tree};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A build/run target; only the executor is inspected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executor: Option<String>,
    /// Pre-executor name for the same field; older workspaces may carry both.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub builder: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub options: Map<String, Value>,
}

impl TargetConfig {
    /// `executor`, falling back to `builder`.
    pub fn executor_id(&self) -> Option<&str> {
        self.executor.as_deref().or(self.builder.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectDescriptor {
    pub name: String,
    pub root: String,
    pub targets: BTreeMap<String, TargetConfig>,
}

impl ProjectDescriptor {
    /// First target (in target-name order) running `executor`.
    pub fn find_target(&self, executor: &str) -> Option<&str> {
        self.targets
            .iter()
            .find(|(_, target)| target.executor_id() == Some(executor))
            .map(|(name, _)| name.as_str())
    }
}

#[derive(Deserialize)]
struct RawWorkspace {
    #[serde(default)]
    projects: BTreeMap<String, Value>,
}

#[derive(Deserialize)]
struct RawProject {
    root: String,
    #[serde(default, alias = "architect")]
    targets: BTreeMap<String, TargetConfig>,
}

/// Return the first configured workspace file present in the tree.
pub fn find_workspace_file(tree: &Tree, config: &MigrateConfig) -> Result<String> {
    config
        .workspace_files
        .iter()
        .find(|rel| tree.exists(rel))
        .cloned()
        .ok_or_else(|| {
            anyhow!(
                "no workspace configuration found (looked for {})",
                config.workspace_files.join(", ")
            )
        })
}

/// Enumerate every project in the workspace, ordered by name.
pub fn read_projects(tree: &Tree, config: &MigrateConfig) -> Result<Vec<ProjectDescriptor>> {
    let workspace_path = find_workspace_file(tree, config)?;
    let text = tree.read_to_string(&workspace_path)?;
    let raw: RawWorkspace = serde_json::from_str(&text)
        .with_context(|| format!("parse workspace configuration {workspace_path}"))?;

    let mut projects = Vec::with_capacity(raw.projects.len());
    for (name, entry) in raw.projects {
        let project = match entry {
            Value::String(dir) => read_standalone_project(tree, &dir)
                .with_context(|| format!("load project {name}"))?,
            other => serde_json::from_value::<RawProject>(other)
                .with_context(|| format!("parse project {name} in {workspace_path}"))?,
        };
        projects.push(ProjectDescriptor {
            name,
            root: project.root,
            targets: project.targets,
        });
    }
    tracing::debug!(
        workspace = %workspace_path,
        projects = projects.len(),
        "enumerated workspace projects"
    );
    Ok(projects)
}

fn read_standalone_project(tree: &Tree, dir: &str) -> Result<RawProject> {
    let path = join_path_fragments(dir, "project.json");
    if !tree.exists(&path) {
        return Err(anyhow!("missing {path}"));
    }
    let text = tree.read_to_string(&path)?;
    serde_json::from_str(&text).with_context(|| format!("parse {path}"))
}

#[cfg(test)]
#[path = "workspace_tests.rs"]
mod tests;
