use anyhow::{anyhow, Context, Result};
use std::path::Path;
use std::process::Command;
use std::time::Instant;

/// Run `command` over `files` from the workspace root.
///
/// The command line is split like a shell would and the written paths are
/// appended, e.g. `npx prettier --write` becomes
/// `npx prettier --write .storybook/main.js`.
pub fn format_files(workspace_root: &Path, command: &str, files: &[String]) -> Result<()> {
    if files.is_empty() {
        return Ok(());
    }
    let argv = shell_words::split(command)
        .with_context(|| format!("parse format command {command:?}"))?;
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| anyhow!("format command is empty"))?;
    let program_path =
        which::which(program).with_context(|| format!("resolve formatter {program}"))?;

    let start = Instant::now();
    let output = Command::new(&program_path)
        .args(args)
        .args(files)
        .current_dir(workspace_root)
        .output()
        .with_context(|| format!("run formatter {}", program_path.display()))?;
    let elapsed_ms = start.elapsed().as_millis();

    tracing::info!(
        elapsed_ms,
        files = files.len(),
        formatter = %program_path.display(),
        "format pass complete"
    );

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr_line = stderr.trim().lines().next().unwrap_or_default();
        let detail = if stderr_line.is_empty() {
            format!("status {}", output.status)
        } else {
            stderr_line.to_string()
        };
        return Err(anyhow!("formatter failed: {detail}"));
    }
    Ok(())
}
