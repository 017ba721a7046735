use std::{net::SocketAddr, path::PathBuf};

use serde::{Deserialize, Serialize};

/// Which transport backs an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// Unix domain socket; the artifact is the socket file itself.
    Unix,
    /// Loopback TCP; the artifact is a file holding the port number.
    LoopbackTcp,
}

/// Concrete address a listener is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndpointAddr {
    Unix(PathBuf),
    Tcp(SocketAddr),
}

impl core::fmt::Display for EndpointAddr {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Unix(path) => write!(f, "unix:{}", path.display()),
            Self::Tcp(addr) => write!(f, "tcp:{addr}"),
        }
    }
}


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Directory holding the artifacts. `None` resolves the platform default
    /// on every call (runtime dir for sockets, local app data for port files).
    pub dir: Option<PathBuf>,

    /// Mode for artifact directories created on demand. Unix only.
    pub dir_mode: u32,

    /// Mode applied to the socket file after bind. Unix only.
    pub socket_mode: u32,

    /// Mode of the port file. Unix only.
    pub port_file_mode: u32,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            dir: None,
            dir_mode: 0o700,
            socket_mode: 0o700,
            port_file_mode: 0o600,
        }
    }
}

impl EndpointConfig {
    /// Keep artifacts in `dir` instead of the platform default.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: Some(dir.into()), ..Default::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_owner_only() {
        let cfg = EndpointConfig::default();
        assert_eq!(cfg.dir, None);
        assert_eq!(cfg.dir_mode, 0o700);
        assert_eq!(cfg.socket_mode, 0o700);
        assert_eq!(cfg.port_file_mode, 0o600);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let cfg: EndpointConfig =
            serde_json::from_str(r#"{ "dir": "/run/user/1000/app" }"#).unwrap();

        assert_eq!(cfg.dir, Some(PathBuf::from("/run/user/1000/app")));
        assert_eq!(cfg.socket_mode, 0o700);
        assert_eq!(cfg.port_file_mode, 0o600);
    }

    #[test]
    fn addr_display() {
        let unix = EndpointAddr::Unix(PathBuf::from("/tmp/svc.sock"));
        assert_eq!(unix.to_string(), "unix:/tmp/svc.sock");

        let tcp = EndpointAddr::Tcp("127.0.0.1:4000".parse().unwrap());
        assert_eq!(tcp.to_string(), "tcp:127.0.0.1:4000");
    }
}
