//! Server side: bind a name, accept connections, remove the artifact on close.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    EndpointAddr, EndpointConfig, LocalnetCode, LocalnetError, Native, Transport, TransportKind,
    naming,
};

/// A bound local endpoint.
///
/// Owns the transport listener and the published artifact. The artifact is
/// removed by [`Listener::close`] or, failing that, on drop.
pub struct Listener<T: Transport = Native> {
    server: Option<T::Server>,
    name: String,
    artifact: PathBuf,
    cleaned: bool,
}

impl<T: Transport> Listener<T> {
    /// Binds `name` and publishes its artifact.
    ///
    /// A leftover socket under the same name is replaced without checking
    /// whether someone still serves it; last bind wins.
    pub fn bind(name: &str, cfg: &EndpointConfig) -> Result<Self, LocalnetError> {
        let name = naming::validate_name(name)?;
        let artifact = T::artifact_path(name, cfg)?;
        let server = T::bind(&artifact, cfg)?;

        debug!(name, kind = ?T::KIND, artifact = %artifact.display(), "listening");

        Ok(Self {
            server: Some(server),
            name: name.to_owned(),
            artifact,
            cleaned: false,
        })
    }

    /// Blocks until a client connects.
    ///
    /// Meant to be driven from a single accept loop.
    pub fn accept(&self) -> Result<T::Stream, LocalnetError> {
        let server = self.server.as_ref().ok_or_else(LocalnetError::closed)?;
        T::accept(server).map_err(|e| LocalnetError::with_io(LocalnetCode::Accept, e))
    }

    /// Endless iterator over [`Listener::accept`].
    pub fn incoming(&self) -> Incoming<'_, T> {
        Incoming { listener: self }
    }

    /// Closes the transport listener, then removes the artifact.
    ///
    /// Both steps always run. The transport error wins if both fail. Once the
    /// artifact is gone further calls do nothing and return `Ok(())`, so a
    /// later listener on the same name is never disturbed.
    pub fn close(&mut self) -> Result<(), LocalnetError> {
        let closed = match self.server.take() {
            Some(server) => T::close(server).map_err(|e| LocalnetError::with_io(LocalnetCode::Close, e)),
            None => Ok(()),
        };
        let cleaned = self.cleanup();
        closed.and(cleaned)
    }

    fn cleanup(&mut self) -> Result<(), LocalnetError> {
        if self.cleaned {
            return Ok(());
        }
        T::remove(&self.artifact)?;
        self.cleaned = true;
        debug!(name = %self.name, "closed");
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn artifact_path(&self) -> &Path {
        &self.artifact
    }

    pub fn kind(&self) -> TransportKind {
        T::KIND
    }

    pub fn local_addr(&self) -> Result<EndpointAddr, LocalnetError> {
        let server = self.server.as_ref().ok_or_else(LocalnetError::closed)?;
        T::local_addr(server).map_err(LocalnetError::io)
    }

    pub fn is_closed(&self) -> bool {
        self.server.is_none()
    }
}

impl<T: Transport> Drop for Listener<T> {
    fn drop(&mut self) {
        if self.is_closed() && self.cleaned {
            return;
        }
        if let Err(e) = self.close() {
            debug!(name = %self.name, error = %e, "close on drop failed");
        }
    }
}

impl<T: Transport> fmt::Debug for Listener<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("name", &self.name)
            .field("kind", &T::KIND)
            .field("artifact", &self.artifact)
            .field("server", &self.server)
            .finish()
    }
}

/// Iterator returned by [`Listener::incoming`]. Never yields `None`.
#[derive(Debug)]
pub struct Incoming<'a, T: Transport = Native> {
    listener: &'a Listener<T>,
}

impl<T: Transport> Iterator for Incoming<'_, T> {
    type Item = Result<T::Stream, LocalnetError>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.listener.accept())
    }
}
