//! Reading and writing the global config and credentials files

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const CONFIG_FILE: &str = "config.json";
pub const AUTH_CONFIG_FILE: &str = "auth.json";

const CONFIG_NOTE: &str =
    "This is your EasyNext config file. For more information see the global configuration documentation.";
const AUTH_NOTE: &str = "This is your EasyNext credentials file. DO NOT SHARE!";
const DOCS_URL: &str = "https://github.com/easynextjs/easynext";

/// Supported UI languages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Ko,
}

impl Lang {
    pub fn parse(code: &str) -> Option<Lang> {
        match code {
            "en" => Some(Lang::En),
            "ko" => Some(Lang::Ko),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Ko => "ko",
        }
    }
}

/// General settings, persisted as `config.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(rename = "// Note")]
    pub note: String,

    #[serde(rename = "// Docs")]
    pub docs: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<Lang>,
}

impl GlobalConfig {
    pub fn lang(&self) -> Lang {
        self.lang.unwrap_or_default()
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            note: CONFIG_NOTE.to_string(),
            docs: DOCS_URL.to_string(),
            lang: None,
        }
    }
}

/// Credentials, persisted as `auth.json` with mode 0600 on Unix
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(rename = "// Note")]
    pub note: String,

    #[serde(rename = "// Docs")]
    pub docs: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// When set, writes become silent no-ops (non-interactive/test environments)
    #[serde(default, rename = "skipWrite", skip_serializing_if = "is_false")]
    pub skip_write: bool,
}

fn is_false(value: &bool) -> bool {
    !value
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            note: AUTH_NOTE.to_string(),
            docs: DOCS_URL.to_string(),
            token: None,
            skip_write: false,
        }
    }
}

/// Handle on the directory holding both config files
#[derive(Debug, Clone)]
pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn from_default_location() -> Self {
        Self::new(super::paths::global_config_dir())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }

    pub fn auth_path(&self) -> PathBuf {
        self.dir.join(AUTH_CONFIG_FILE)
    }

    pub fn read_global(&self) -> Result<GlobalConfig, ConfigError> {
        read_json(&self.config_path())
    }

    pub fn write_global(&self, config: &GlobalConfig) -> Result<(), ConfigError> {
        write_json(&self.config_path(), config, None)
    }

    pub fn read_auth(&self) -> Result<AuthConfig, ConfigError> {
        read_json(&self.auth_path())
    }

    pub fn write_auth(&self, config: &AuthConfig) -> Result<(), ConfigError> {
        if config.skip_write {
            return Ok(());
        }
        write_json(&self.auth_path(), config, Some(0o600))
    }

    /// Load both config files, substituting and persisting the hard-coded
    /// defaults on first run.
    pub fn load_or_init(&self) -> Result<(GlobalConfig, AuthConfig), ConfigError> {
        fs::create_dir_all(&self.dir)?;

        let global = match self.read_global() {
            Ok(config) => config,
            Err(ConfigError::NotFound(_)) => {
                let config = GlobalConfig::default();
                self.write_global(&config)?;
                config
            }
            Err(err) => return Err(err),
        };

        let auth = match self.read_auth() {
            Ok(config) => config,
            Err(ConfigError::NotFound(_)) => {
                let config = AuthConfig::default();
                self.write_auth(&config)?;
                config
            }
            Err(err) => return Err(err),
        };

        Ok((global, auth))
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(ConfigError::NotFound(path.to_path_buf()))
        }
        Err(err) => return Err(err.into()),
    };
    serde_json::from_str(&raw).map_err(|source| ConfigError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

/// Atomic write: serialize to a temp file in the same directory, then rename.
fn write_json<T: Serialize>(path: &Path, value: &T, mode: Option<u32>) -> Result<(), ConfigError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let map_io = |err: io::Error| match err.kind() {
        io::ErrorKind::PermissionDenied => ConfigError::PermissionDenied(path.to_path_buf()),
        // EBADF has no stable io::ErrorKind mapping
        _ if err.raw_os_error() == Some(9) => ConfigError::BadDescriptor(path.to_path_buf()),
        _ => ConfigError::Io(err),
    };

    let payload = serde_json::to_string_pretty(value)?;
    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(&map_io)?;
    file.write_all(payload.as_bytes()).map_err(&map_io)?;
    file.write_all(b"\n").map_err(&map_io)?;
    file.persist(path).map_err(|err| map_io(err.error))?;

    #[cfg(unix)]
    if let Some(mode) = mode {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(mode)).map_err(&map_io)?;
    }
    #[cfg(not(unix))]
    let _ = mode;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_run_creates_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path());

        let (global, auth) = store.load_or_init().unwrap();
        assert_eq!(global.lang(), Lang::En);
        assert!(auth.token.is_none());
        assert!(store.config_path().exists());
        assert!(store.auth_path().exists());

        // Second invocation reads back the identical objects
        let (global2, auth2) = store.load_or_init().unwrap();
        assert_eq!(global2.note, global.note);
        assert_eq!(global2.docs, global.docs);
        assert_eq!(global2.lang, global.lang);
        assert_eq!(auth2.token, auth.token);
    }

    #[test]
    fn lang_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path());

        let (mut global, _) = store.load_or_init().unwrap();
        global.lang = Some(Lang::Ko);
        store.write_global(&global).unwrap();

        let reread = store.read_global().unwrap();
        assert_eq!(reread.lang(), Lang::Ko);

        let raw = fs::read_to_string(store.config_path()).unwrap();
        assert!(raw.contains("\"lang\": \"ko\""));
        assert!(raw.contains("// Note"));
    }

    #[test]
    fn missing_file_reports_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path());
        assert!(matches!(
            store.read_global(),
            Err(ConfigError::NotFound(_))
        ));
    }

    #[test]
    fn skip_write_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path());

        let auth = AuthConfig {
            token: Some("secret".to_string()),
            skip_write: true,
            ..AuthConfig::default()
        };
        store.write_auth(&auth).unwrap();
        assert!(!store.auth_path().exists());
    }

    #[cfg(unix)]
    #[test]
    fn auth_file_has_narrow_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path());
        store.write_auth(&AuthConfig::default()).unwrap();

        let mode = fs::metadata(store.auth_path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn malformed_config_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path());
        fs::write(store.config_path(), "{ not json").unwrap();
        assert!(matches!(
            store.read_global(),
            Err(ConfigError::Malformed { .. })
        ));
    }
}
