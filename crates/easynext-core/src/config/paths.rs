//! Global configuration directory resolution

use std::path::{Path, PathBuf};

/// Directory name under the per-OS application data directory
const APP_DIR_NAME: &str = "com.easynext.cli";

/// Environment variable overriding the global config directory
pub const GLOBAL_DIR_ENV: &str = "EASYNEXT_GLOBAL_DIR";

/// Directory holding the global config and credentials files
pub fn global_config_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(GLOBAL_DIR_ENV) {
        return PathBuf::from(dir);
    }
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// Render a path with the home directory abbreviated to `~`
pub fn humanize(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(rest) = path.strip_prefix(&home) {
            if rest.as_os_str().is_empty() {
                return "~".to_string();
            }
            return format!("~/{}", rest.display());
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn humanize_abbreviates_home() {
        let home = dirs::home_dir().expect("home dir");
        assert_eq!(humanize(&home.join("projects/app")), "~/projects/app");
        assert_eq!(humanize(&home), "~");
    }

    #[test]
    fn humanize_leaves_other_paths_alone() {
        assert_eq!(humanize(Path::new("/tmp/easynext")), "/tmp/easynext");
    }
}
