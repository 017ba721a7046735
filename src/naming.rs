//! Name validation and artifact path resolution.
//!
//! Everything here is a pure function of the name, the [`EndpointConfig`]
//! and the process environment. The environment is read on every call so
//! a changed `XDG_RUNTIME_DIR` or `LOCALAPPDATA` is picked up immediately.

use std::{
    env,
    ffi::OsString,
    path::{Path, PathBuf},
};

use crate::{EndpointConfig, LocalnetError, Transport};

/// Suffix of Unix domain socket artifacts.
pub const SOCKET_SUFFIX: &str = ".sock";

/// Suffix of loopback TCP port files.
pub const PORT_SUFFIX: &str = ".port";

/// Subdirectory of the local app data directory that holds port files.
pub const APP_DIR: &str = "localnet";

/// Rejects the empty name. Called before any filesystem access.
#[inline]
pub fn validate_name(name: &str) -> Result<&str, LocalnetError> {
    if name.is_empty() {
        return Err(LocalnetError::invalid_name());
    }
    Ok(name)
}

/// `<dir>/<name><suffix>`
pub fn artifact_file(dir: &Path, name: &str, suffix: &str) -> PathBuf {
    dir.join(format!("{name}{suffix}"))
}

/// Directory for socket artifacts: the configured override, then
/// `$XDG_RUNTIME_DIR`, then the system temp directory.
pub fn socket_dir(cfg: &EndpointConfig) -> PathBuf {
    match &cfg.dir {
        Some(dir) => dir.clone(),
        None => runtime_dir(),
    }
}

/// Directory for port files: the configured override, then
/// `%LOCALAPPDATA%\localnet`, then the platform local data dir.
pub fn port_dir(cfg: &EndpointConfig) -> Result<PathBuf, LocalnetError> {
    match &cfg.dir {
        Some(dir) => Ok(dir.clone()),
        None => app_data_dir().ok_or_else(|| LocalnetError::resolve("local app data")),
    }
}

pub fn runtime_dir() -> PathBuf {
    runtime_dir_from(env::var_os("XDG_RUNTIME_DIR"))
}

pub fn app_data_dir() -> Option<PathBuf> {
    app_data_dir_from(env::var_os("LOCALAPPDATA"))
}

fn runtime_dir_from(xdg: Option<OsString>) -> PathBuf {
    non_empty(xdg).map(PathBuf::from).unwrap_or_else(env::temp_dir)
}

fn app_data_dir_from(local: Option<OsString>) -> Option<PathBuf> {
    non_empty(local)
        .map(PathBuf::from)
        .or_else(dirs::data_local_dir)
        .or_else(|| dirs::home_dir().map(|home| home.join("AppData").join("Local")))
        .map(|base| base.join(APP_DIR))
}

fn non_empty(var: Option<OsString>) -> Option<OsString> {
    var.filter(|v| !v.is_empty())
}

/// Artifact path `T` would use for `name`, for diagnostics.
///
/// Empty when the name is empty or no directory can be resolved. No I/O.
pub fn socket_path_on<T: Transport>(name: &str, cfg: &EndpointConfig) -> PathBuf {
    if name.is_empty() {
        return PathBuf::new();
    }
    T::artifact_path(name, cfg).unwrap_or_default()
}
