//! Package manager detection and dependency installation

use anyhow::{Context, Result};
use colored::Colorize;
use std::fmt;
use std::path::Path;
use tokio::process::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Npm,
    Pnpm,
    Yarn,
}

impl PackageManager {
    pub fn command(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command())
    }
}

/// Pick a package manager from lockfiles, then the npm user-agent hint
pub fn detect_package_manager(root: &Path) -> PackageManager {
    if root.join("yarn.lock").exists() {
        return PackageManager::Yarn;
    }
    if root.join("pnpm-lock.yaml").exists() {
        return PackageManager::Pnpm;
    }
    if let Ok(agent) = std::env::var("npm_config_user_agent") {
        if agent.starts_with("yarn") {
            return PackageManager::Yarn;
        }
        if agent.starts_with("pnpm") {
            return PackageManager::Pnpm;
        }
    }
    PackageManager::Npm
}

/// Whether the package registry is reachable
pub async fn get_online() -> bool {
    tokio::net::lookup_host(("registry.npmjs.org", 443))
        .await
        .map(|mut addrs| addrs.next().is_some())
        .unwrap_or(false)
}

/// Run `<manager> install` in `root` with inherited stdio
pub async fn install(root: &Path, manager: PackageManager, online: bool) -> Result<()> {
    let mut args: Vec<&str> = vec!["install"];
    if !online {
        match manager {
            PackageManager::Yarn => args.push("--offline"),
            _ => eprintln!(
                "{} you appear to be offline, the install may fail",
                "Warning:".yellow()
            ),
        }
    }

    let status = Command::new(manager.command())
        .args(&args)
        .current_dir(root)
        .status()
        .await
        .with_context(|| format!("failed to run {}", manager.command()))?;

    if !status.success() {
        anyhow::bail!(
            "{} install exited with code {}",
            manager,
            status.code().unwrap_or(-1)
        );
    }
    Ok(())
}

/// Detect the manager and online state for `root`, then install
pub async fn install_in(root: &Path) -> Result<()> {
    let manager = detect_package_manager(root);
    let online = get_online().await;
    install(root, manager, online).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lockfiles_take_precedence() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("yarn.lock"), "").unwrap();
        assert_eq!(detect_package_manager(dir.path()), PackageManager::Yarn);

        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("pnpm-lock.yaml"), "").unwrap();
        assert_eq!(detect_package_manager(dir.path()), PackageManager::Pnpm);
    }

    #[test]
    fn yarn_lock_wins_over_pnpm_lock() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("yarn.lock"), "").unwrap();
        std::fs::write(dir.path().join("pnpm-lock.yaml"), "").unwrap();
        assert_eq!(detect_package_manager(dir.path()), PackageManager::Yarn);
    }
}
