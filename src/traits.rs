use std::{
    fmt,
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

use crate::{EndpointAddr, EndpointConfig, LocalnetError, TransportKind};

/// One way of rendezvousing on a name: where its artifact lives, how a
/// server publishes it and how a client turns it back into a connection.
///
/// Implementations are zero-sized markers; the platform default is
/// [`crate::Native`].
pub trait Transport {
    type Server: fmt::Debug + Send;
    type Stream: Read + Write + fmt::Debug + Send;

    const KIND: TransportKind;

    /// Artifact path for an already validated name.
    fn artifact_path(name: &str, cfg: &EndpointConfig) -> Result<PathBuf, LocalnetError>;

    /// Binds a server and publishes its artifact at `artifact`.
    /// The artifact is visible to dialers once this returns `Ok`.
    fn bind(artifact: &Path, cfg: &EndpointConfig) -> Result<Self::Server, LocalnetError>;

    fn accept(server: &Self::Server) -> io::Result<Self::Stream>;

    fn local_addr(server: &Self::Server) -> io::Result<EndpointAddr>;

    /// Releases the server. Std listeners close on drop and cannot fail.
    fn close(server: Self::Server) -> io::Result<()> {
        drop(server);
        Ok(())
    }

    /// Removes the artifact at `artifact`. Missing is `Ok(false)`.
    fn remove(artifact: &Path) -> Result<bool, LocalnetError> {
        crate::artifact::remove_artifact(artifact)
    }

    /// Resolves `artifact` and opens one connection. Single attempt.
    fn connect(artifact: &Path) -> Result<Self::Stream, LocalnetError>;
}
