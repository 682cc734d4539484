use once_cell::sync::Lazy;
use serde::Deserialize;
use std::{
    collections::{BTreeMap, HashMap},
    env,
    path::PathBuf,
};

use super::InstallError;

/// Where a manifest is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Current user's profile; no elevated privileges needed.
    User,
    /// Machine-wide location.
    System,
}

/// Which allow-list field a browser expects in the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Chromium,
    Firefox,
}

/// One browser entry of `browsers.toml`.
#[derive(Debug, Deserialize)]
pub struct BrowserConfig {
    pub family: Family,
    #[serde(default)]
    pub user: HashMap<String, PathBuf>,
    #[serde(default)]
    pub system: HashMap<String, PathBuf>,
}

static BROWSERS: Lazy<Result<BTreeMap<String, BrowserConfig>, String>> =
    Lazy::new(|| toml::from_str(include_str!("browsers.toml")).map_err(|e| e.to_string()));

/// All configured browsers, keyed by name (`chrome`, `firefox`, ...).
pub fn browsers() -> Result<&'static BTreeMap<String, BrowserConfig>, InstallError> {
    BROWSERS
        .as_ref()
        .map_err(|e| InstallError::Config(e.clone()))
}

pub fn browser(key: &str) -> Result<&'static BrowserConfig, InstallError> {
    browsers()?
        .get(key)
        .ok_or_else(|| InstallError::UnknownBrowser(key.to_string()))
}

fn home_dir() -> Result<PathBuf, InstallError> {
    env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
        .ok_or(InstallError::HomeNotSet)
}

/// Directory holding manifests for `browser` at `scope` on this OS.
pub fn manifest_dir(browser_key: &str, scope: Scope) -> Result<PathBuf, InstallError> {
    let info = browser(browser_key)?;
    let os = env::consts::OS;
    let table = match scope {
        Scope::User => &info.user,
        Scope::System => &info.system,
    };
    let dir = table.get(os).ok_or_else(|| InstallError::Unsupported {
        browser: browser_key.to_string(),
        scope,
        os,
    })?;
    match scope {
        Scope::User => Ok(home_dir()?.join(dir)),
        Scope::System => Ok(dir.clone()),
    }
}

/// Full path of `<host_name>.json` for `browser` at `scope`.
pub fn manifest_path(
    browser_key: &str,
    scope: Scope,
    host_name: &str,
) -> Result<PathBuf, InstallError> {
    Ok(manifest_dir(browser_key, scope)?.join(format!("{host_name}.json")))
}
