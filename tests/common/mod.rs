//! Shared test infrastructure for integration tests.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

pub const MAIN_JS: &str = "module.exports = {
  stories: [],
  addons: ['@storybook/addon-essentials'],
};
";

/// Throwaway workspace on disk that `sbmigrate` runs against.
pub struct WorkspaceFixture {
    temp_dir: TempDir,
}

impl Default for WorkspaceFixture {
    fn default() -> Self {
        Self {
            temp_dir: TempDir::new().expect("create temp workspace"),
        }
    }
}

impl WorkspaceFixture {
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn write(&self, rel: &str, contents: &str) {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent directory");
        }
        std::fs::write(path, contents).expect("write fixture file");
    }

    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.root().join(rel)).expect("read fixture file")
    }

    pub fn exists(&self, rel: &str) -> bool {
        self.root().join(rel).is_file()
    }

    /// Run `sbmigrate <args> --workspace <root>` without checking the exit status.
    pub fn run_unchecked(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_sbmigrate"))
            .args(args)
            .arg("--workspace")
            .arg(self.root())
            .env("RUST_LOG", "info")
            .output()
            .expect("spawn sbmigrate")
    }

    /// Run `sbmigrate <args> --workspace <root>` and require success.
    pub fn run(&self, args: &[&str]) -> Output {
        let output = self.run_unchecked(args);
        assert!(
            output.status.success(),
            "sbmigrate {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        output
    }

    /// Seed two projects: `proj-a` with a `doctool:run` target and `proj-b`
    /// without one, each with `main.js` and a default webpack override.
    pub fn seed_two_projects(&self, root_webpack: &str, project_webpack: &str) {
        self.write(
            "workspace.json",
            r#"{
              "version": 2,
              "projects": {
                "proj-a": {
                  "root": "libs/proj-a",
                  "targets": { "storybook": { "executor": "doctool:run" } }
                },
                "proj-b": {
                  "root": "libs/proj-b",
                  "targets": { "build": { "executor": "@nrwl/web:build" } }
                }
              }
            }"#,
        );
        self.write(".storybook/main.js", MAIN_JS);
        self.write(".storybook/webpack.config.js", root_webpack);
        for project in ["proj-a", "proj-b"] {
            self.write(&format!("libs/{project}/.storybook/main.js"), MAIN_JS);
            self.write(
                &format!("libs/{project}/.storybook/webpack.config.js"),
                project_webpack,
            );
        }
    }
}
