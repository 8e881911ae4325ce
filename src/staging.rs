use crate::tree::FileChange;
use anyhow::{anyhow, Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Apply pending tree changes under `workspace_root`.
///
/// Writes go through a temp file in the destination directory and are
/// renamed into place. If any change fails, every change already applied is
/// reverted from in-memory backups before the error is returned.
pub fn publish_changes(
    workspace_root: &Path,
    changes: &BTreeMap<String, FileChange>,
) -> Result<()> {
    let mut backups: Vec<(PathBuf, Option<Vec<u8>>)> = Vec::new();
    for (rel, change) in changes {
        let dest = workspace_root.join(rel);
        match apply_change(&dest, change) {
            Ok(previous) => backups.push((dest, previous)),
            Err(err) => {
                rollback_publish(&backups);
                return Err(err);
            }
        }
    }
    Ok(())
}

/// Apply one change and return the bytes it replaced, if any.
fn apply_change(dest: &Path, change: &FileChange) -> Result<Option<Vec<u8>>> {
    let previous = if dest.is_file() {
        Some(fs::read(dest).with_context(|| format!("backup {}", dest.display()))?)
    } else {
        None
    };
    match change {
        FileChange::Write(text) => publish_file(dest, text.as_bytes())?,
        FileChange::Delete => remove_file(dest)?,
    }
    Ok(previous)
}

fn publish_file(dest: &Path, bytes: &[u8]) -> Result<()> {
    let parent = dest
        .parent()
        .ok_or_else(|| anyhow!("{} has no parent directory", dest.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    let mut tmp = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("stage {}", dest.display()))?;
    tmp.write_all(bytes)
        .with_context(|| format!("stage {}", dest.display()))?;
    tmp.persist(dest)
        .map_err(|err| err.error)
        .with_context(|| format!("publish {}", dest.display()))?;
    Ok(())
}

fn remove_file(dest: &Path) -> Result<()> {
    if dest.exists() {
        fs::remove_file(dest).with_context(|| format!("delete {}", dest.display()))?;
    }
    Ok(())
}

fn rollback_publish(backups: &[(PathBuf, Option<Vec<u8>>)]) {
    for (dest, previous) in backups.iter().rev() {
        let restored = match previous {
            Some(bytes) => publish_file(dest, bytes),
            None => remove_file(dest),
        };
        if let Err(err) = restored {
            tracing::warn!(path = %dest.display(), "rollback failed: {err:#}");
        }
    }
}

#[cfg(test)]
#[path = "staging_tests.rs"]
mod tests;
