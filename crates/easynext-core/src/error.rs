//! Error types for easynext-core

use std::path::PathBuf;
use thiserror::Error;

/// Errors from the global/auth config store
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("not able to write {} (operation not permitted)", .0.display())]
    PermissionDenied(PathBuf),

    #[error("not able to write {} (bad file descriptor)", .0.display())]
    BadDescriptor(PathBuf),

    #[error("malformed JSON in {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors from the integration patch engine
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("{integration}: no anchor file found (looked for {candidates})")]
    AnchorNotFound {
        integration: &'static str,
        candidates: String,
    },

    #[error("package.json not found at {}", .0.display())]
    ManifestNotFound(PathBuf),

    #[error("package.json is not a JSON object")]
    ManifestShape,

    #[error("malformed package.json: {0}")]
    ManifestParse(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors from the premium template fetcher
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("download failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("download failed: HTTP {0}")]
    Status(u16),

    #[error("unsupported template archive format")]
    UnsupportedTemplateFormat,

    #[error("failed to read archive: {0}")]
    Archive(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors from the license API client
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response shape from server")]
    InvalidResponse,

    #[error("request rejected by server")]
    Rejected,
}
