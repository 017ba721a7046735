//! Transport implementations, selected per target at compile time.
//!
//! The loopback TCP transport builds everywhere so it can be exercised on
//! Unix as well; the socket transport exists only where `AF_UNIX` does.

#[cfg(unix)]
mod unix;
mod tcp;

#[cfg(unix)]
pub use unix::UnixSocket;
pub use tcp::LoopbackTcp;

/// Transport used by the top-level `listen`/`dial`/`cleanup`.
#[cfg(unix)]
pub type Native = UnixSocket;

/// Transport used by the top-level `listen`/`dial`/`cleanup`.
#[cfg(not(unix))]
pub type Native = LoopbackTcp;
