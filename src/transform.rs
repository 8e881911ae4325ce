//! Text transforms applied to Storybook configuration files.
//!
//! Both transforms work on raw text. They assume the shape the workspace
//! generators emit and make no attempt to parse JavaScript.
use crate::templates::{WEBPACK_FINAL_HOOK, WEBPACK_FINAL_MARKER};
use crate::tree::Tree;
use anyhow::Result;
use regex::{Captures, Regex};
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookOutcome {
    Inserted,
    AlreadyPresent,
    NoClosingBrace,
    Missing,
}

impl HookOutcome {
    pub fn changed(self) -> bool {
        matches!(self, HookOutcome::Inserted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideOutcome {
    Removed,
    Customized,
    Absent,
}

impl OverrideOutcome {
    pub fn changed(self) -> bool {
        matches!(self, OverrideOutcome::Removed)
    }
}

fn closing_brace_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\};)").expect("regex for closing brace"))
}

fn root_require_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"const rootWebpackConfig = require\(.*?;")
            .expect("regex for root webpack require")
    })
}

fn whitespace_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("regex for whitespace"))
}

/// Insert the commented hook ahead of every `};`.
///
/// Returns `None` when the marker is already present. Files that export more
/// than one object literal get one hook per `};`.
pub fn insert_hook(text: &str) -> Option<String> {
    if text.contains(WEBPACK_FINAL_MARKER) {
        return None;
    }
    let updated = closing_brace_regex().replace_all(text, |caps: &Captures| {
        format!("{WEBPACK_FINAL_HOOK}{}", &caps[1])
    });
    Some(updated.into_owned())
}

/// Reduce config text to a comparison key.
///
/// Drops the `rootWebpackConfig` require, whose relative path depends on
/// project depth, then every whitespace character.
pub fn normalize_config_text(text: &str) -> String {
    let without_require = root_require_regex().replace(text, "");
    whitespace_regex()
        .replace_all(&without_require, "")
        .into_owned()
}

/// Resolve escape sequences the way a JS template literal does, so `\\.`
/// becomes `\.` and `\.` becomes `.`.
pub fn evaluate_template_escapes(text: &str) -> String {
    let mut evaluated = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            evaluated.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => evaluated.push('\n'),
            Some('t') => evaluated.push('\t'),
            Some('r') => evaluated.push('\r'),
            Some('b') => evaluated.push('\u{8}'),
            Some('f') => evaluated.push('\u{c}'),
            Some('v') => evaluated.push('\u{b}'),
            Some('0') => evaluated.push('\0'),
            // line continuation
            Some('\n') => {}
            Some(other) => evaluated.push(other),
            None => evaluated.push('\\'),
        }
    }
    evaluated
}

/// Compare against the default as written on disk and as it reads once
/// template-literal escapes are applied; overrides exist in both shapes.
pub fn matches_default(actual: &str, default: &str) -> bool {
    let actual = normalize_config_text(actual);
    actual == normalize_config_text(default)
        || actual == normalize_config_text(&evaluate_template_escapes(default))
}

/// Add the commented `webpackFinal` hook to a Storybook `main.js`.
pub fn insert_webpack_final(tree: &mut Tree, main_config_path: &str) -> Result<HookOutcome> {
    if !tree.exists(main_config_path) {
        return Ok(HookOutcome::Missing);
    }
    let content = tree.read_to_string(main_config_path)?;
    let Some(updated) = insert_hook(&content) else {
        tracing::debug!(path = main_config_path, "webpackFinal already present");
        return Ok(HookOutcome::AlreadyPresent);
    };
    if updated == content {
        tracing::warn!(
            " - Could not find a closing \"}};\" in \"{main_config_path}\". Add the \"webpackFinal\" property manually."
        );
        return Ok(HookOutcome::NoClosingBrace);
    }
    tree.write(main_config_path, updated);
    Ok(HookOutcome::Inserted)
}

/// Delete a webpack override that still matches the scaffolded default.
pub fn remove_if_default(
    tree: &mut Tree,
    webpack_path: &str,
    default_content: &str,
) -> Result<OverrideOutcome> {
    if !tree.exists(webpack_path) {
        return Ok(OverrideOutcome::Absent);
    }
    let content = tree.read_to_string(webpack_path)?;
    if matches_default(&content, default_content) {
        tree.delete(webpack_path);
        tracing::info!(
            " - Removed {webpack_path} as it is obsolete and hasn't been modified by the developer."
        );
        return Ok(OverrideOutcome::Removed);
    }
    tracing::warn!(
        " - Detected modified webpack config at \"{webpack_path}\". Consider migrating to the new \"webpackFinal\" property in \"main.js\"."
    );
    Ok(OverrideOutcome::Customized)
}

#[cfg(test)]
#[path = "transform_tests.rs"]
mod tests;
