//! Global config and credentials storage
//!
//! Two JSON files live in the per-OS application data directory: `config.json`
//! (general settings, currently the UI language) and `auth.json` (the premium
//! access token, written with narrower permissions). Both are created with
//! defaults on first run.

pub mod paths;
pub mod store;

pub use paths::{global_config_dir, humanize};
pub use store::{AuthConfig, ConfigStore, GlobalConfig, Lang};
