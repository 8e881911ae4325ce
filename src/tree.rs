//! Path-keyed view of a workspace with an overlay of pending edits.
//!
//! Migrations read and mutate the tree only; nothing reaches the disk until
//! `commit`, so a dry run is the same code path minus the publish step.
use crate::staging::publish_changes;
use anyhow::{anyhow, Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// A pending edit recorded against a workspace-relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChange {
    Write(String),
    Delete,
}

#[derive(Debug, Clone)]
enum Backing {
    Memory(BTreeMap<String, String>),
    Disk(PathBuf),
}

/// Workspace file tree keyed by normalized `/`-separated relative paths.
#[derive(Debug, Clone)]
pub struct Tree {
    backing: Backing,
    changes: BTreeMap<String, FileChange>,
}

impl Tree {
    /// Create an empty tree that lives entirely in memory.
    pub fn in_memory() -> Self {
        Self {
            backing: Backing::Memory(BTreeMap::new()),
            changes: BTreeMap::new(),
        }
    }

    /// Create a tree that reads through to files under `root`.
    pub fn on_disk(root: PathBuf) -> Self {
        Self {
            backing: Backing::Disk(root),
            changes: BTreeMap::new(),
        }
    }

    pub fn exists(&self, path: &str) -> bool {
        let key = normalize_path(path);
        match self.changes.get(&key) {
            Some(FileChange::Write(_)) => true,
            Some(FileChange::Delete) => false,
            None => self.base_exists(&key),
        }
    }

    /// Read a file as UTF-8 text, honoring pending writes and deletes.
    pub fn read_to_string(&self, path: &str) -> Result<String> {
        let key = normalize_path(path);
        match self.changes.get(&key) {
            Some(FileChange::Write(text)) => Ok(text.clone()),
            Some(FileChange::Delete) => Err(anyhow!("{key} was deleted")),
            None => self.base_read(&key),
        }
    }

    pub fn write(&mut self, path: &str, contents: impl Into<String>) {
        self.changes
            .insert(normalize_path(path), FileChange::Write(contents.into()));
    }

    pub fn delete(&mut self, path: &str) {
        let key = normalize_path(path);
        if !self.base_exists(&key) {
            // Never published, so forgetting the pending write is enough.
            self.changes.remove(&key);
            return;
        }
        self.changes.insert(key, FileChange::Delete);
    }

    /// Pending changes in path order.
    pub fn changes(&self) -> impl Iterator<Item = (&str, &FileChange)> {
        self.changes.iter().map(|(path, change)| (path.as_str(), change))
    }

    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Paths with a pending write, used to scope the formatter.
    pub fn written_paths(&self) -> Vec<String> {
        self.changes
            .iter()
            .filter(|(_, change)| matches!(change, FileChange::Write(_)))
            .map(|(path, _)| path.clone())
            .collect()
    }

    /// Apply pending changes to the backing store and clear the overlay.
    pub fn commit(&mut self) -> Result<Vec<String>> {
        let changes = std::mem::take(&mut self.changes);
        let applied: Vec<String> = changes.keys().cloned().collect();
        match &mut self.backing {
            Backing::Memory(files) => {
                for (path, change) in changes {
                    match change {
                        FileChange::Write(text) => {
                            files.insert(path, text);
                        }
                        FileChange::Delete => {
                            files.remove(&path);
                        }
                    }
                }
            }
            Backing::Disk(root) => {
                if let Err(err) = publish_changes(root, &changes) {
                    self.changes = changes;
                    return Err(err);
                }
            }
        }
        Ok(applied)
    }

    fn base_exists(&self, key: &str) -> bool {
        match &self.backing {
            Backing::Memory(files) => files.contains_key(key),
            Backing::Disk(root) => root.join(key).is_file(),
        }
    }

    fn base_read(&self, key: &str) -> Result<String> {
        match &self.backing {
            Backing::Memory(files) => files
                .get(key)
                .cloned()
                .ok_or_else(|| anyhow!("{key} does not exist")),
            Backing::Disk(root) => {
                let path = root.join(key);
                fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))
            }
        }
    }
}

/// Normalize a workspace path to `/`-separated segments without `.` or empty parts.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// Join path fragments the way workspace tooling does: `("", ".storybook/main.js")`
/// and `(".", ".storybook/main.js")` both resolve to `.storybook/main.js`.
pub fn join_path_fragments(base: &str, rel: &str) -> String {
    normalize_path(&format!("{base}/{rel}"))
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tests;
