use std::{fmt, io, num::ParseIntError, path::Path};


use liaise::{Liaise, RegisterErrors};

#[derive(RegisterErrors, Debug, Copy, Clone, PartialEq, Eq)]
#[error_prefix("LNET")]
pub enum LocalnetCode {
    InvalidName = 1,
    Resolve = 2,
    CreateDir = 3,
    Bind = 4,
    Permissions = 5,
    ArtifactOccupied = 6,
    ArtifactWrite = 7,
    ArtifactRead = 8,
    ArtifactRemove = 9,
    MalformedPort = 10,
    Connect = 11,
    Accept = 12,
    Closed = 13,
    Io = 14,
    Close = 15,
}

impl Liaise for LocalnetCode {
    fn code_id(self) -> u16 { self as u16 }

    fn message(self) -> &'static str {
        match self {
            Self::InvalidName => "Name cannot be empty",
            Self::Resolve => "Artifact directory unavailable",
            Self::CreateDir => "Failed to create artifact directory",
            Self::Bind => "Failed to listen",
            Self::Permissions => "Failed to set socket permissions",
            Self::ArtifactOccupied => "Artifact path is occupied",
            Self::ArtifactWrite => "Failed to write port file",
            Self::ArtifactRead => "Failed to read port file",
            Self::ArtifactRemove => "Failed to remove artifact",
            Self::MalformedPort => "Malformed port file",
            Self::Connect => "Failed to connect",
            Self::Accept => "Failed to accept",
            Self::Closed => "Listener closed",
            Self::Io => "I/O error",
            Self::Close => "Failed to close listener",
        }
    }
}

/// Concrete runtime error type for the crate.
/// Uses `liaise` for stable IDs + formatting.
#[derive(Debug)]
pub struct LocalnetError {
    pub code: LocalnetCode,
    pub ctx: Option<String>,

    pub source: Option<LocalnetSource>,
}

#[derive(Debug)]
pub enum LocalnetSource {
    Io(io::Error),
    Port(ParseIntError),
}

impl LocalnetError {
    #[inline]
    pub fn new(code: LocalnetCode) -> Self {
        Self { code, ctx: None, source: None }
    }

    #[inline]
    pub fn ctx(mut self, ctx: impl fmt::Display) -> Self {
        self.ctx = Some(ctx.to_string());
        self
    }

    /// Wraps an I/O failure under `code`, keeping the original error as source.
    #[inline]
    pub fn with_io(code: LocalnetCode, err: io::Error) -> Self {
        Self {
            code,
            ctx: Some(err.to_string()),
            source: Some(LocalnetSource::Io(err)),
        }
    }

    /// Like [`LocalnetError::with_io`], naming the path the operation touched.
    #[inline]
    pub fn at(code: LocalnetCode, path: &Path, err: io::Error) -> Self {
        Self {
            code,
            ctx: Some(format!("{}: {err}", path.display())),
            source: Some(LocalnetSource::Io(err)),
        }
    }

    #[inline]
    pub fn io(err: io::Error) -> Self {
        Self::with_io(LocalnetCode::Io, err)
    }

    #[inline]
    pub fn invalid_name() -> Self {
        Self::new(LocalnetCode::InvalidName)
    }

    #[inline]
    pub fn closed() -> Self {
        Self::new(LocalnetCode::Closed)
    }

    #[inline]
    pub fn resolve(what: &str) -> Self {
        Self::new(LocalnetCode::Resolve).ctx(format_args!("no {what} directory"))
    }

    #[inline]
    pub fn occupied(path: &Path) -> Self {
        Self::new(LocalnetCode::ArtifactOccupied)
            .ctx(format_args!("{} is not a socket", path.display()))
    }

    #[inline]
    pub fn malformed_port(err: ParseIntError) -> Self {
        Self {
            code: LocalnetCode::MalformedPort,
            ctx: Some(err.to_string()),
            source: Some(LocalnetSource::Port(err)),
        }
    }

    #[inline]
    pub fn code(&self) -> LocalnetCode {
        self.code
    }

    /// Kind of the wrapped I/O error, if the failure came from the OS.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match &self.source {
            Some(LocalnetSource::Io(e)) => Some(e.kind()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.io_kind() == Some(io::ErrorKind::NotFound)
    }
}

impl fmt::Display for LocalnetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base = self.code.render();
        match &self.ctx {
            Some(ctx) => write!(f, "{base}: {ctx}"),
            None => write!(f, "{base}"),
        }
    }
}

impl std::error::Error for LocalnetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.source {
            Some(LocalnetSource::Io(e)) => Some(e),
            Some(LocalnetSource::Port(e)) => Some(e),
            None => None,
        }
    }
}

impl From<io::Error> for LocalnetError {
    #[inline]
    fn from(e: io::Error) -> Self {
        LocalnetError::io(e)
    }
}
