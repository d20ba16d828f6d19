//! Template materialization: copy the bundled file tree into a new project

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::manifest::FeatureFlags;

/// Environment variable overriding the bundled templates directory
pub const TEMPLATE_DIR_ENV: &str = "EASYNEXT_TEMPLATE_DIR";

/// Filename rewrites applied during the copy.
///
/// Dotfiles are stored without the leading dot so packaging tools do not
/// treat them as hidden; README-template.md dodges bundlers that special-case
/// README.md.
pub fn rename_entry(name: &str) -> &str {
    match name {
        "gitignore" => ".gitignore",
        "cursorrules" => ".cursorrules",
        "cursorignore" => ".cursorignore",
        "README-template.md" => "README.md",
        _ => name,
    }
}

/// Whether a template entry is excluded by a disabled feature flag
pub fn is_excluded(name: &str, flags: &FeatureFlags) -> bool {
    if !flags.eslint && name == "eslint.config.mjs" {
        return true;
    }
    if !flags.tailwind && (name == "tailwind.config.ts" || name == "postcss.config.mjs") {
        return true;
    }
    false
}

/// Locate the bundled template directory for `template`
pub fn resolve_template_dir(template: &str) -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(TEMPLATE_DIR_ENV) {
        return Ok(PathBuf::from(dir).join(template));
    }
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let candidate = dir.join("templates").join(template);
            if candidate.is_dir() {
                return Ok(candidate);
            }
        }
    }
    let local = Path::new("templates").join(template);
    if local.is_dir() {
        return Ok(local);
    }
    anyhow::bail!(
        "template '{}' not found; set {} to your templates directory",
        template,
        TEMPLATE_DIR_ENV
    )
}

/// Copy every template entry into `target_root`, applying rename and
/// exclusion rules. Returns the relative paths written.
pub async fn materialize_template(
    template_dir: &Path,
    target_root: &Path,
    flags: &FeatureFlags,
) -> Result<Vec<PathBuf>> {
    tokio::fs::create_dir_all(target_root)
        .await
        .context("Failed to create target directory")?;

    let mut copied = Vec::new();

    for entry in WalkDir::new(template_dir) {
        let entry = entry.with_context(|| {
            format!("Failed to read template directory {}", template_dir.display())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        if is_excluded(&file_name, flags) {
            continue;
        }

        let relative = entry.path().strip_prefix(template_dir).with_context(|| {
            format!("unexpected entry outside template root: {}", entry.path().display())
        })?;
        let mut target_rel = relative.to_path_buf();
        target_rel.set_file_name(rename_entry(&file_name));

        let target_path = target_root.join(&target_rel);
        if let Some(parent) = target_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        tokio::fs::copy(entry.path(), &target_path)
            .await
            .with_context(|| format!("Failed to write file: {}", target_path.display()))?;

        copied.push(target_rel);
    }

    Ok(copied)
}
