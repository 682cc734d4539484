//! Installing the host manifest so the browser can find `persephone-host`.
//!
//! Locations are driven by the embedded `browsers.toml`.

pub mod manifest;
pub mod paths;

pub use manifest::*;
pub use paths::*;

use std::{io, path::PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    #[error("unknown browser `{0}`")]
    UnknownBrowser(String),

    #[error("`{browser}` has no {scope:?} manifest location on {os}")]
    Unsupported {
        browser: String,
        scope: Scope,
        os: &'static str,
    },

    #[error("host executable path must be absolute: {}", .0.display())]
    RelativeExePath(PathBuf),

    #[error("HOME is not set")]
    HomeNotSet,

    #[error("invalid embedded browsers.toml: {0}")]
    Config(String),

    #[error("failed to serialize manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
