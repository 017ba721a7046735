//! # LOCALNET
//! Named local IPC endpoints with one surface on every platform.
//!
//! A server calls [`listen`] with a name, a client calls [`dial`] with the
//! same name, and both get a plain byte stream. Neither side needs to know
//! how the name was turned into an address:
//!
//! * **Unix:** a domain socket at `$XDG_RUNTIME_DIR/<name>.sock`
//!   (system temp dir when unset). The socket file is the rendezvous.
//! * **Elsewhere:** a loopback TCP listener on an ephemeral port, with the
//!   port written to `%LOCALAPPDATA%\localnet\<name>.port`.
//!
//! The transport is fixed at compile time ([`Native`]); both implement
//! [`Transport`] and can be named explicitly through [`Listener`],
//! [`Dialer`] and [`cleanup_on`].
//!
//! ## What this is not
//! * No framing: streams carry raw bytes.
//! * No retries or timeouts: use the returned stream's own controls.
//! * No exclusion: a second `listen` on a live name takes it over.
//!

pub mod artifact;
pub mod cleanup;
pub mod dialer;
pub mod error;
pub mod listener;
pub mod naming;
pub mod sys;
pub mod traits;
pub mod types;

use std::path::PathBuf;

pub use cleanup::cleanup_on;
pub use dialer::{Dialer, dial_on};
pub use error::*;
pub use listener::{Incoming, Listener};
pub use sys::*;
pub use traits::*;
pub use types::*;

/// Connection type produced by [`dial`] and [`Listener::accept`] on this platform.
pub type Stream = <Native as Transport>::Stream;

/// Binds `name` in the default artifact directory.
pub fn listen(name: &str) -> Result<Listener, LocalnetError> {
    listen_with(name, &EndpointConfig::default())
}

pub fn listen_with(name: &str, cfg: &EndpointConfig) -> Result<Listener, LocalnetError> {
    Listener::<Native>::bind(name, cfg)
}

/// Connects to a name bound by [`listen`].
pub fn dial(name: &str) -> Result<Stream, LocalnetError> {
    dial_with(name, &EndpointConfig::default())
}

pub fn dial_with(name: &str, cfg: &EndpointConfig) -> Result<Stream, LocalnetError> {
    dial_on::<Native>(name, cfg)
}

/// Where the artifact for `name` lives. Empty for an empty name. No I/O.
pub fn socket_path(name: &str) -> PathBuf {
    socket_path_with(name, &EndpointConfig::default())
}

pub fn socket_path_with(name: &str, cfg: &EndpointConfig) -> PathBuf {
    naming::socket_path_on::<Native>(name, cfg)
}

/// Removes a leftover artifact for `name`, e.g. after a crash.
/// Succeeds when there is nothing to remove.
pub fn cleanup(name: &str) -> Result<(), LocalnetError> {
    cleanup_with(name, &EndpointConfig::default())
}

pub fn cleanup_with(name: &str, cfg: &EndpointConfig) -> Result<(), LocalnetError> {
    cleanup_on::<Native>(name, cfg)
}
