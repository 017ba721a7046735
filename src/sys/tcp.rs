use std::{
    io,
    net::{Ipv4Addr, SocketAddr, TcpListener, TcpStream},
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    EndpointAddr, EndpointConfig, LocalnetCode, LocalnetError, Transport, TransportKind, artifact,
    naming::{self, PORT_SUFFIX},
};

/// Loopback TCP on an ephemeral port, published in `<dir>/<name>.port`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoopbackTcp;

impl Transport for LoopbackTcp {
    type Server = TcpListener;
    type Stream = TcpStream;

    const KIND: TransportKind = TransportKind::LoopbackTcp;

    fn artifact_path(name: &str, cfg: &EndpointConfig) -> Result<PathBuf, LocalnetError> {
        Ok(naming::artifact_file(&naming::port_dir(cfg)?, name, PORT_SUFFIX))
    }

    fn bind(path: &Path, cfg: &EndpointConfig) -> Result<TcpListener, LocalnetError> {
        if let Some(dir) = path.parent() {
            artifact::ensure_dir(dir, cfg.dir_mode)?;
        }

        // a leftover file would point dialers at a dead port until we publish
        artifact::remove_artifact(path)?;

        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
            .map_err(|e| LocalnetError::with_io(LocalnetCode::Bind, e))?;
        let port = listener
            .local_addr()
            .map_err(|e| LocalnetError::with_io(LocalnetCode::Bind, e))?
            .port();

        artifact::write_port_file(path, port, cfg.port_file_mode)?;
        debug!(port, path = %path.display(), "published port file");

        Ok(listener)
    }

    fn accept(server: &TcpListener) -> io::Result<TcpStream> {
        server.accept().map(|(stream, _)| stream)
    }

    fn local_addr(server: &TcpListener) -> io::Result<EndpointAddr> {
        server.local_addr().map(EndpointAddr::Tcp)
    }

    fn connect(path: &Path) -> Result<TcpStream, LocalnetError> {
        let port = artifact::read_port_file(path)?;
        let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, port));

        TcpStream::connect(addr).map_err(|e| {
            let ctx = format!("{addr}: {e}");
            LocalnetError::with_io(LocalnetCode::Connect, e).ctx(ctx)
        })
    }
}
