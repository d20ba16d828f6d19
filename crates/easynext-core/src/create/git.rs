//! Git repository bootstrap for generated projects

use std::path::Path;
use std::process::{Command, Stdio};

fn git(root: &Path, args: &[&str]) -> bool {
    Command::new("git")
        .args(args)
        .current_dir(root)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

fn has_git() -> bool {
    Command::new("git")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

fn in_existing_repo(root: &Path) -> bool {
    git(root, &["rev-parse", "--is-inside-work-tree"])
}

/// Initialize a git repository with an initial commit.
///
/// Returns false (without touching anything) when git is unavailable or the
/// directory already sits inside a work tree.
pub fn try_git_init(root: &Path) -> bool {
    if !has_git() || in_existing_repo(root) {
        return false;
    }
    if !git(root, &["init"]) {
        return false;
    }
    git(root, &["checkout", "-b", "main"]);
    if !git(root, &["add", "-A"]) {
        return false;
    }
    git(
        root,
        &[
            "-c",
            "user.name=EasyNext",
            "-c",
            "user.email=cli@easynext.org",
            "commit",
            "-m",
            "Initial commit from EasyNext",
        ],
    )
}
