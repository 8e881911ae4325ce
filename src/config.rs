//! Migration configuration.
//!
//! Every field has a default so a run without `--config` matches the layout
//! workspace generators scaffold; a config file only needs the overrides.
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_SCHEMA_VERSION: u32 = 1;
pub const DEFAULT_STORYBOOK_EXECUTOR: &str = "@nrwl/storybook:storybook";
pub const DEFAULT_CONFIG_DIR: &str = ".storybook";

fn default_schema_version() -> u32 {
    CONFIG_SCHEMA_VERSION
}

fn default_storybook_executor() -> String {
    DEFAULT_STORYBOOK_EXECUTOR.to_string()
}

fn default_config_dir() -> String {
    DEFAULT_CONFIG_DIR.to_string()
}

fn default_workspace_files() -> Vec<String> {
    vec!["workspace.json".to_string(), "angular.json".to_string()]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MigrateConfig {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    /// Executor identifier that marks a project as having Storybook.
    #[serde(default = "default_storybook_executor")]
    pub storybook_executor: String,
    /// Directory, relative to a project root, holding `main.js`.
    #[serde(default = "default_config_dir")]
    pub config_dir: String,
    /// Workspace configuration files tried in order.
    #[serde(default = "default_workspace_files")]
    pub workspace_files: Vec<String>,
    /// Command run on written files when the migration changed anything.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_command: Option<String>,
}

impl Default for MigrateConfig {
    fn default() -> Self {
        Self {
            schema_version: CONFIG_SCHEMA_VERSION,
            storybook_executor: default_storybook_executor(),
            config_dir: default_config_dir(),
            workspace_files: default_workspace_files(),
            format_command: None,
        }
    }
}

impl MigrateConfig {
    pub fn main_config_rel(&self) -> String {
        format!("{}/main.js", self.config_dir)
    }

    pub fn webpack_config_rel(&self) -> String {
        format!("{}/webpack.config.js", self.config_dir)
    }
}

/// Load a config file, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<MigrateConfig> {
    let Some(path) = path else {
        return Ok(MigrateConfig::default());
    };
    let bytes = fs::read(path).with_context(|| format!("read config {}", path.display()))?;
    let config: MigrateConfig =
        serde_json::from_slice(&bytes).context("parse migrate config JSON")?;
    Ok(config)
}

pub fn validate_config(config: &MigrateConfig) -> Result<()> {
    if config.schema_version != CONFIG_SCHEMA_VERSION {
        return Err(anyhow!(
            "unsupported migrate config schema_version {}",
            config.schema_version
        ));
    }
    if config.storybook_executor.trim().is_empty() {
        return Err(anyhow!("storybook_executor must be non-empty"));
    }
    if config.workspace_files.is_empty() {
        return Err(anyhow!("workspace_files must list at least one file"));
    }
    validate_relative_path(&config.config_dir, "config_dir")?;
    for rel in &config.workspace_files {
        validate_relative_path(rel, "workspace_files")?;
    }
    if let Some(command) = config.format_command.as_deref() {
        if command.trim().is_empty() {
            return Err(anyhow!("format_command must be non-empty when set"));
        }
    }
    Ok(())
}

fn validate_relative_path(rel: &str, label: &str) -> Result<()> {
    let path = Path::new(rel);
    if rel.trim().is_empty() || path.is_absolute() || has_parent_components(path) {
        return Err(anyhow!(
            "{label} entries must be relative paths without '..' (got {rel:?})"
        ));
    }
    Ok(())
}

fn has_parent_components(path: &Path) -> bool {
    path.components()
        .any(|component| matches!(component, std::path::Component::ParentDir))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
