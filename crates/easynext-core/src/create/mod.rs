//! New project creation: materialize the template, synthesize package.json,
//! install dependencies, and bootstrap git.

pub mod copier;
pub mod git;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::install;
use crate::manifest::{self, FeatureFlags};
use crate::messages::Messages;
use crate::project;

pub struct CreateOptions {
    /// Absolute path of the project to create
    pub app_path: PathBuf,
    pub flags: FeatureFlags,
    /// Template directory override; resolved from the bundled templates when unset
    pub template_dir: Option<PathBuf>,
}

/// Abort unless `root` holds only allow-listed entries, printing the
/// conflict report the user needs to fix it.
pub fn ensure_empty_target(root: &Path, name: &str, messages: &Messages) -> Result<()> {
    let conflicts = project::folder_conflicts(root)?;
    if conflicts.is_empty() {
        return Ok(());
    }

    println!(
        "{}",
        messages.t_with("create.folder_conflict", &name.green().to_string())
    );
    println!();
    for conflict in &conflicts {
        if conflict.is_dir {
            println!("  {}/", conflict.name.blue());
        } else {
            println!("  {}", conflict.name);
        }
    }
    println!();
    println!("{}", messages.t("create.folder_conflict_solution"));
    println!();
    bail!("target directory is not empty");
}

/// Run the full `create` pipeline for a blank (non-premium) project
pub async fn create_app(opts: &CreateOptions, messages: &Messages) -> Result<()> {
    let root = &opts.app_path;
    let app_name = root
        .file_name()
        .and_then(|n| n.to_str())
        .context("invalid project directory")?
        .to_string();

    if let Some(parent) = root.parent() {
        if parent.exists() && !project::is_writeable(parent) {
            bail!(
                "{}\n{}",
                messages.t("create.not_writable"),
                messages.t("create.no_permissions")
            );
        }
    }

    std::fs::create_dir_all(root)
        .with_context(|| format!("Failed to create {}", root.display()))?;
    ensure_empty_target(root, &app_name, messages)?;

    let template_dir = match &opts.template_dir {
        Some(dir) => dir.clone(),
        None => copier::resolve_template_dir("default")?,
    };

    println!(
        "{} {}.",
        messages.t("create.creating_app"),
        root.display().to_string().green()
    );
    println!();

    copier::materialize_template(&template_dir, root, &opts.flags).await?;

    let package_manifest = manifest::build_package_manifest(&app_name, &opts.flags);
    manifest::write_package_manifest(root, &package_manifest)?;

    if !opts.flags.skip_install {
        print_dependency_summary(&package_manifest);
        println!("{}", messages.t("create.installing"));
        install::install_in(root).await?;
        println!();
    }

    if opts.flags.disable_git {
        println!("{}", messages.t("create.skip_git"));
        println!();
    } else if git::try_git_init(root) {
        println!("{}", messages.t("create.git_initialized"));
        println!();
    }

    println!(
        "{} Created {} at {}",
        "Success!".green(),
        app_name,
        root.display()
    );
    println!();

    Ok(())
}

fn print_dependency_summary(package_manifest: &serde_json::Value) {
    if let Some(deps) = package_manifest
        .get("dependencies")
        .and_then(|v| v.as_object())
    {
        println!("\nInstalling dependencies:");
        for name in deps.keys() {
            println!("- {}", name.cyan());
        }
    }
    if let Some(dev_deps) = package_manifest
        .get("devDependencies")
        .and_then(|v| v.as_object())
    {
        println!("\nInstalling devDependencies:");
        for name in dev_deps.keys() {
            println!("- {}", name.cyan());
        }
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Lang;
    use std::fs;

    fn fixture_template() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("gitignore"), "node_modules\n").unwrap();
        fs::write(dir.path().join("README-template.md"), "# App\n").unwrap();
        fs::create_dir_all(dir.path().join("src/app")).unwrap();
        fs::write(
            dir.path().join("src/app/layout.tsx"),
            "export default function RootLayout() {}\n",
        )
        .unwrap();
        dir
    }

    #[tokio::test]
    async fn create_produces_a_complete_project() {
        let template = fixture_template();
        let parent = tempfile::tempdir().unwrap();
        let app_path = parent.path().join("my-app");

        let opts = CreateOptions {
            app_path: app_path.clone(),
            flags: FeatureFlags {
                skip_install: true,
                disable_git: true,
                ..FeatureFlags::default()
            },
            template_dir: Some(template.path().to_path_buf()),
        };
        create_app(&opts, &Messages::new(Lang::En)).await.unwrap();

        let raw = fs::read_to_string(app_path.join("package.json")).unwrap();
        let manifest: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(manifest["name"], "my-app");
        assert!(manifest["dependencies"]["next"].is_string());
        assert!(manifest["dependencies"]["react"].is_string());
        assert!(app_path.join(".gitignore").exists());
        assert!(app_path.join("README.md").exists());
    }

    #[tokio::test]
    async fn conflicting_target_aborts() {
        let template = fixture_template();
        let parent = tempfile::tempdir().unwrap();
        let app_path = parent.path().join("my-app");
        fs::create_dir_all(app_path.join("src")).unwrap();

        let opts = CreateOptions {
            app_path: app_path.clone(),
            flags: FeatureFlags {
                skip_install: true,
                disable_git: true,
                ..FeatureFlags::default()
            },
            template_dir: Some(template.path().to_path_buf()),
        };
        let err = create_app(&opts, &Messages::new(Lang::En))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not empty"));
        // nothing was materialized
        assert!(!app_path.join("package.json").exists());
    }

    #[tokio::test]
    async fn allow_listed_entries_are_tolerated() {
        let template = fixture_template();
        let parent = tempfile::tempdir().unwrap();
        let app_path = parent.path().join("my-app");
        fs::create_dir_all(app_path.join(".git")).unwrap();
        fs::write(app_path.join("LICENSE"), "MIT").unwrap();

        let opts = CreateOptions {
            app_path: app_path.clone(),
            flags: FeatureFlags {
                skip_install: true,
                disable_git: true,
                ..FeatureFlags::default()
            },
            template_dir: Some(template.path().to_path_buf()),
        };
        create_app(&opts, &Messages::new(Lang::En)).await.unwrap();
        assert!(app_path.join("package.json").exists());
    }
}
