//! Client side: find a name's artifact and connect once.

use std::{fmt, marker::PhantomData};

use tracing::trace;

use crate::{EndpointConfig, LocalnetError, Native, Transport, naming};

/// Connects to names published by a [`crate::Listener`] of the same transport.
///
/// Holds no state beyond its configuration. Every [`Dialer::dial`] is a
/// single attempt; retries and deadlines belong to the caller.
pub struct Dialer<T: Transport = Native> {
    cfg: EndpointConfig,
    _transport: PhantomData<fn() -> T>,
}

impl<T: Transport> Dialer<T> {
    pub fn new() -> Self {
        Self::with_config(EndpointConfig::default())
    }

    pub fn with_config(cfg: EndpointConfig) -> Self {
        Self { cfg, _transport: PhantomData }
    }

    pub fn config(&self) -> &EndpointConfig {
        &self.cfg
    }

    pub fn dial(&self, name: &str) -> Result<T::Stream, LocalnetError> {
        dial_on::<T>(name, &self.cfg)
    }
}

/// Connects to `name` over `T`.
///
/// Socket transport: connects to the socket file. Loopback TCP: reads the
/// port file, then connects to `127.0.0.1:<port>`. A missing artifact keeps
/// its `NotFound` kind (see [`LocalnetError::is_not_found`]).
pub fn dial_on<T: Transport>(name: &str, cfg: &EndpointConfig) -> Result<T::Stream, LocalnetError> {
    let name = naming::validate_name(name)?;
    let artifact = T::artifact_path(name, cfg)?;
    trace!(name, artifact = %artifact.display(), "dialing");
    T::connect(&artifact)
}

impl<T: Transport> Default for Dialer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> Clone for Dialer<T> {
    fn clone(&self) -> Self {
        Self::with_config(self.cfg.clone())
    }
}

impl<T: Transport> fmt::Debug for Dialer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dialer")
            .field("kind", &T::KIND)
            .field("cfg", &self.cfg)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Listener, LocalnetCode, LoopbackTcp};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn dial_rejects_empty_name() {
        let dir = TempDir::new().unwrap();
        let dialer = Dialer::<LoopbackTcp>::with_config(EndpointConfig::in_dir(dir.path()));

        assert_eq!(dialer.dial("").unwrap_err().code(), LocalnetCode::InvalidName);
    }

    #[test]
    fn dial_before_listen_is_not_found() {
        let dir = TempDir::new().unwrap();
        let dialer = Dialer::<LoopbackTcp>::with_config(EndpointConfig::in_dir(dir.path()));

        let err = dialer.dial("nobody").unwrap_err();
        assert_eq!(err.code(), LocalnetCode::ArtifactRead);
        assert!(err.is_not_found());
    }

    #[test]
    fn dial_connects_to_published_port() {
        let dir = TempDir::new().unwrap();
        let cfg = EndpointConfig::in_dir(dir.path());
        let listener = Listener::<LoopbackTcp>::bind("svc", &cfg).unwrap();

        let stream = Dialer::<LoopbackTcp>::with_config(cfg).dial("svc").unwrap();
        let published: u16 = fs::read_to_string(listener.artifact_path()).unwrap().parse().unwrap();

        assert_eq!(stream.peer_addr().unwrap().port(), published);
        let accepted = listener.accept().unwrap();
        assert_eq!(accepted.local_addr().unwrap().port(), published);
    }

    #[test]
    fn dial_tolerates_whitespace_in_port_file() {
        let dir = TempDir::new().unwrap();
        let cfg = EndpointConfig::in_dir(dir.path());
        let listener = Listener::<LoopbackTcp>::bind("svc", &cfg).unwrap();

        let port = fs::read_to_string(listener.artifact_path()).unwrap();
        fs::write(listener.artifact_path(), format!("  {port}\n")).unwrap();

        Dialer::<LoopbackTcp>::with_config(cfg).dial("svc").unwrap();
    }
}
