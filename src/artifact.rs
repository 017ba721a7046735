//! On-disk rendezvous artifacts: directories, port files, removal.

use std::{
    fs,
    io::{self, Write},
    path::Path,
};

#[cfg(unix)]
use std::os::unix::fs::{DirBuilderExt, PermissionsExt};

use tracing::trace;

use crate::{LocalnetCode, LocalnetError};

/// Creates `dir` and any missing parents. New directories get `mode` on Unix;
/// existing ones are left untouched.
pub fn ensure_dir(dir: &Path, mode: u32) -> Result<(), LocalnetError> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    builder.mode(mode);
    #[cfg(not(unix))]
    let _ = mode;

    builder
        .create(dir)
        .map_err(|e| LocalnetError::at(LocalnetCode::CreateDir, dir, e))
}

/// Removes an artifact. A missing artifact is not an error.
///
/// Returns whether something was actually removed.
pub fn remove_artifact(path: &Path) -> Result<bool, LocalnetError> {
    match fs::remove_file(path) {
        Ok(()) => {
            trace!(path = %path.display(), "removed artifact");
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(LocalnetError::at(LocalnetCode::ArtifactRemove, path, e)),
    }
}

/// Publishes `port` at `path`.
///
/// Written to a uniquely named sibling temp file first and renamed into
/// place, so a reader sees either the previous file, no file, or the full
/// port. Concurrent publishers on one path each rename their own file; the
/// last rename wins.
pub fn write_port_file(path: &Path, port: u16, mode: u32) -> Result<(), LocalnetError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));

    let written = tempfile::Builder::new()
        .prefix(".localnet-")
        .suffix(".port.tmp")
        .tempfile_in(dir)
        .and_then(|mut tmp| {
            #[cfg(unix)]
            fs::set_permissions(tmp.path(), fs::Permissions::from_mode(mode))?;
            #[cfg(not(unix))]
            let _ = mode;

            tmp.write_all(port.to_string().as_bytes())?;
            tmp.as_file().sync_all()?;
            tmp.persist(path).map(drop).map_err(|e| e.error)
        });

    written.map_err(|e| LocalnetError::at(LocalnetCode::ArtifactWrite, path, e))
}

/// Reads the port stored at `path`.
pub fn read_port_file(path: &Path) -> Result<u16, LocalnetError> {
    let bytes = fs::read(path).map_err(|e| LocalnetError::at(LocalnetCode::ArtifactRead, path, e))?;
    let text = String::from_utf8(bytes).map_err(|_| {
        LocalnetError::new(LocalnetCode::MalformedPort)
            .ctx(format_args!("{} is not utf-8", path.display()))
    })?;
    parse_port(&text)
}

/// Parses port file contents: a decimal port, surrounding whitespace allowed.
pub fn parse_port(text: &str) -> Result<u16, LocalnetError> {
    let port: u16 = text.trim().parse().map_err(LocalnetError::malformed_port)?;
    if port == 0 {
        return Err(LocalnetError::new(LocalnetCode::MalformedPort).ctx("port 0"));
    }
    Ok(port)
}
