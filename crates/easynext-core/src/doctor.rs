//! Read-only environment checks for the `doctor` command

use semver::Version;
use std::process::Command;

/// Minimum supported Node.js version
pub const MIN_NODE_VERSION: &str = "20.10.0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Pass(String),
    Warn(String),
    Fail(String),
}

#[derive(Debug, Clone)]
pub struct DoctorCheck {
    pub name: &'static str,
    pub status: CheckStatus,
}

fn command_output(cmd: &str, args: &[&str]) -> Option<String> {
    let out = Command::new(cmd).args(args).output().ok()?;
    if out.status.success() {
        Some(String::from_utf8_lossy(&out.stdout).trim().to_string())
    } else {
        None
    }
}

pub fn check_node() -> DoctorCheck {
    let status = match command_output("node", &["--version"]) {
        Some(raw) => match node_version_supported(&raw) {
            Some(true) => CheckStatus::Pass(format!("Node.js {raw}")),
            Some(false) => CheckStatus::Fail(format!(
                "Node.js {raw} is not supported, please upgrade to at least v{MIN_NODE_VERSION}"
            )),
            None => CheckStatus::Warn(format!("could not parse Node.js version '{raw}'")),
        },
        None => CheckStatus::Fail("Node.js is not installed".to_string()),
    };
    DoctorCheck {
        name: "node",
        status,
    }
}

fn node_version_supported(raw: &str) -> Option<bool> {
    let cleaned = raw.trim().strip_prefix('v').unwrap_or(raw.trim());
    let installed = Version::parse(cleaned).ok()?;
    let min = Version::parse(MIN_NODE_VERSION).ok()?;
    Some(installed >= min)
}

pub fn check_git() -> DoctorCheck {
    let status = match command_output("git", &["--version"]) {
        Some(version) => CheckStatus::Pass(version),
        None => CheckStatus::Fail("Git is not installed. Please install Git.".to_string()),
    };
    DoctorCheck {
        name: "git",
        status,
    }
}

pub fn check_vercel() -> Vec<DoctorCheck> {
    let Some(version) = command_output("vercel", &["--version"]) else {
        return vec![DoctorCheck {
            name: "vercel",
            status: CheckStatus::Fail("Vercel CLI is not installed.".to_string()),
        }];
    };
    let version = version.lines().next().unwrap_or_default().to_string();

    let auth_status = match Command::new("vercel").arg("whoami").output() {
        Ok(out) if out.status.success() => {
            let user = String::from_utf8_lossy(&out.stdout).trim().to_string();
            CheckStatus::Pass(format!("Vercel authenticated as {user}"))
        }
        Ok(out) => {
            let stderr = String::from_utf8_lossy(&out.stderr);
            if stderr.contains("No existing credentials found") {
                CheckStatus::Warn("Vercel is not authenticated (run `vercel login`)".to_string())
            } else {
                CheckStatus::Fail("Vercel returned an unexpected error.".to_string())
            }
        }
        Err(_) => CheckStatus::Fail("Vercel returned an unexpected error.".to_string()),
    };

    vec![
        DoctorCheck {
            name: "vercel",
            status: CheckStatus::Pass(format!("Vercel CLI {version}")),
        },
        DoctorCheck {
            name: "vercel-auth",
            status: auth_status,
        },
    ]
}

/// Run every check. Results are reported, never turned into a failing exit.
pub fn run_checks() -> Vec<DoctorCheck> {
    let mut checks = vec![check_node(), check_git()];
    checks.extend(check_vercel());
    checks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_version_comparison() {
        assert_eq!(node_version_supported("v20.10.0"), Some(true));
        assert_eq!(node_version_supported("v22.1.0"), Some(true));
        assert_eq!(node_version_supported("v18.19.1"), Some(false));
        assert_eq!(node_version_supported("weird"), None);
    }
}
