//! EasyNext Core - engine behind the `easynext` CLI
//!
//! This library holds everything the CLI binary wires together:
//!
//! - **Config store** - the global config and credentials JSON files kept in
//!   the per-OS application data directory
//! - **Project creation** - template materialization, package.json synthesis,
//!   dependency installation, and git bootstrap for new Next.js apps
//! - **Integration patcher** - a parameterized recipe engine that wires
//!   third-party services (analytics, chat widgets, auth, Supabase, sitemaps)
//!   into an existing project by idempotent text patching
//! - **Premium templates** - the license API client and the archive fetcher
//!   that downloads and extracts gated templates
//! - **Doctor** - read-only environment checks
//!
//! Commands run one at a time to completion; async operations are awaited
//! sequentially with no parallel fan-out.

pub mod api;
pub mod config;
pub mod create;
pub mod doctor;
pub mod error;
pub mod fetch;
pub mod install;
pub mod manifest;
pub mod messages;
pub mod patch;
pub mod project;

// Re-export main types for convenience
pub use config::{AuthConfig, ConfigStore, GlobalConfig, Lang};
pub use error::{ApiError, ConfigError, FetchError, PatchError};
pub use manifest::FeatureFlags;
pub use messages::Messages;

/// User agent for HTTP requests
pub const USER_AGENT: &str = concat!("easynext/", env!("CARGO_PKG_VERSION"));
