use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

use super::paths::{browser, browsers, manifest_path, Family, Scope};
use super::InstallError;

/// A native messaging host manifest as the browser reads it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub name: String,
    pub description: String,
    pub path: PathBuf,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_origins: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_extensions: Option<Vec<String>>,
}

impl Manifest {
    /// Build the manifest for one browser family; only that family's allow-list is kept.
    pub fn for_family(
        family: Family,
        host_name: &str,
        description: &str,
        exe_path: &Path,
        allowed_origins: &[String],
        allowed_extensions: &[String],
    ) -> Self {
        let (allowed_origins, allowed_extensions) = match family {
            Family::Chromium => (Some(allowed_origins.to_vec()), None),
            Family::Firefox => (None, Some(allowed_extensions.to_vec())),
        };
        Self {
            name: host_name.to_string(),
            description: description.to_string(),
            path: exe_path.to_path_buf(),
            kind: "stdio".to_string(),
            allowed_origins,
            allowed_extensions,
        }
    }
}

/// Writes the manifest for each of `browsers` and returns the files written.
///
/// # Examples
///
/// ```no_run
/// use persephone_host::install::{install, Scope};
/// use std::path::Path;
///
/// install(
///     "com.persephone.host",
///     "Persephone native messaging host",
///     Path::new("/usr/local/bin/persephone-host"),
///     &["chrome-extension://aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa/".to_string()],
///     &[],
///     &["chrome"],
///     Scope::User,
/// )
/// .expect("install manifest");
/// ```
pub fn install(
    host_name: &str,
    description: &str,
    exe_path: &Path,
    allowed_origins: &[String],
    allowed_extensions: &[String],
    browsers: &[&str],
    scope: Scope,
) -> Result<Vec<PathBuf>, InstallError> {
    if !exe_path.is_absolute() {
        return Err(InstallError::RelativeExePath(exe_path.to_path_buf()));
    }

    let mut written = Vec::with_capacity(browsers.len());
    for &key in browsers {
        let family = browser(key)?.family;
        let path = manifest_path(key, scope, host_name)?;
        let manifest = Manifest::for_family(
            family,
            host_name,
            description,
            exe_path,
            allowed_origins,
            allowed_extensions,
        );

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&path, serde_json::to_string_pretty(&manifest)?)?;
        info!(browser = key, path = %path.display(), "installed manifest");
        written.push(path);
    }
    Ok(written)
}

/// True if a manifest for `host_name` exists for any of `browsers`
/// (every configured browser when `None`).
///
/// Browsers with no location on this OS are skipped.
pub fn verify_installed(
    host_name: &str,
    browsers_filter: Option<&[&str]>,
    scope: Scope,
) -> Result<bool, InstallError> {
    let keys: Vec<&str> = match browsers_filter {
        Some(keys) => keys.to_vec(),
        None => browsers()?.keys().map(String::as_str).collect(),
    };
    for key in keys {
        match manifest_path(key, scope, host_name) {
            Ok(path) if path.exists() => return Ok(true),
            Ok(_) | Err(InstallError::Unsupported { .. }) => {}
            Err(e) => return Err(e),
        }
    }
    Ok(false)
}

/// Deletes the manifest for each of `browsers`; missing files are not an error.
pub fn remove(host_name: &str, browsers: &[&str], scope: Scope) -> Result<(), InstallError> {
    for &key in browsers {
        let path = manifest_path(key, scope, host_name)?;
        if path.exists() {
            fs::remove_file(&path)?;
            info!(browser = key, path = %path.display(), "removed manifest");
        }
    }
    Ok(())
}
