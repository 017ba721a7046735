use std::{
    fs::{self, Permissions},
    io,
    os::unix::{
        fs::{FileTypeExt, PermissionsExt},
        net::{UnixListener, UnixStream},
    },
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    EndpointAddr, EndpointConfig, LocalnetCode, LocalnetError, Transport, TransportKind, artifact,
    naming::{self, SOCKET_SUFFIX},
};

/// Unix domain sockets at `<dir>/<name>.sock`. The socket file is the artifact.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnixSocket;

impl Transport for UnixSocket {
    type Server = UnixListener;
    type Stream = UnixStream;

    const KIND: TransportKind = TransportKind::Unix;

    fn artifact_path(name: &str, cfg: &EndpointConfig) -> Result<PathBuf, LocalnetError> {
        Ok(naming::artifact_file(&naming::socket_dir(cfg), name, SOCKET_SUFFIX))
    }

    fn bind(path: &Path, cfg: &EndpointConfig) -> Result<UnixListener, LocalnetError> {
        if let Some(dir) = path.parent() {
            artifact::ensure_dir(dir, cfg.dir_mode)?;
        }

        take_over_stale(path)?;

        let listener = UnixListener::bind(path)
            .map_err(|e| LocalnetError::at(LocalnetCode::Bind, path, e))?;

        if let Err(e) = fs::set_permissions(path, Permissions::from_mode(cfg.socket_mode)) {
            drop(listener);
            let _ = fs::remove_file(path);
            return Err(LocalnetError::at(LocalnetCode::Permissions, path, e));
        }

        Ok(listener)
    }

    fn accept(server: &UnixListener) -> io::Result<UnixStream> {
        server.accept().map(|(stream, _)| stream)
    }

    fn local_addr(server: &UnixListener) -> io::Result<EndpointAddr> {
        let addr = server.local_addr()?;
        addr.as_pathname()
            .map(|path| EndpointAddr::Unix(path.to_path_buf()))
            .ok_or_else(|| io::Error::other("listener is not bound to a path"))
    }

    /// Only sockets are removed; anything else at the path is reported as
    /// occupied, matching what `bind` refuses to replace.
    fn remove(path: &Path) -> Result<bool, LocalnetError> {
        match fs::symlink_metadata(path) {
            Ok(meta) if meta.file_type().is_socket() => artifact::remove_artifact(path),
            Ok(_) => Err(LocalnetError::occupied(path)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(LocalnetError::at(LocalnetCode::ArtifactRemove, path, e)),
        }
    }

    fn connect(path: &Path) -> Result<UnixStream, LocalnetError> {
        UnixStream::connect(path).map_err(|e| LocalnetError::at(LocalnetCode::Connect, path, e))
    }
}

/// Removes a leftover socket at `path` so the bind can succeed.
///
/// No liveness check: a socket still served by another process is replaced
/// too, and that process keeps accepting on an unreachable inode.
/// Anything that is not a socket is left alone.
fn take_over_stale(path: &Path) -> Result<(), LocalnetError> {
    if UnixSocket::remove(path)? {
        debug!(path = %path.display(), "replaced existing socket");
    }
    Ok(())
}
