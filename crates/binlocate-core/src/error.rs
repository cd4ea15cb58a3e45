//! Resolution error types.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Stable error codes for machine-readable output.
pub mod codes {
    pub const BIN_NOT_RESOLVED: &str = "BIN_NOT_RESOLVED";
    pub const BIN_UNSUPPORTED_EXTENSION: &str = "BIN_UNSUPPORTED_EXTENSION";
    pub const BIN_NOT_A_DIRECTORY: &str = "BIN_NOT_A_DIRECTORY";
    pub const BIN_IO: &str = "BIN_IO";
    pub const BIN_NOT_FOUND_IN_PATH: &str = "BIN_NOT_FOUND_IN_PATH";
}

/// Longest wrapper-script excerpt carried by [`ResolveError::NotResolved`].
const MAX_SOURCE_EXCERPT: usize = 1024;

/// Error raised while resolving a binary to its real path.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("could not find the real binary behind {path}: no known wrapper format matched\n{source_text}")]
    NotResolved { path: PathBuf, source_text: String },

    #[error("unsupported binary extension '{extension}': {path}")]
    UnsupportedExtension { path: PathBuf, extension: String },

    #[error("path resolution failed, not a directory: {path}")]
    NotADirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{name}: command not found on PATH")]
    NotFoundInPath { name: String },
}

pub type Result<T> = std::result::Result<T, ResolveError>;

impl ResolveError {
    /// Build a [`ResolveError::NotResolved`], keeping only a bounded excerpt of `source`.
    pub fn not_resolved(path: impl Into<PathBuf>, source: &str) -> Self {
        Self::NotResolved {
            path: path.into(),
            source_text: excerpt(source, MAX_SOURCE_EXCERPT).to_string(),
        }
    }

    pub fn unsupported_extension(path: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self::UnsupportedExtension {
            path: path.into(),
            extension: extension.into(),
        }
    }

    /// Wrap a filesystem error, singling out `ENOTDIR`.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotADirectory {
            Self::NotADirectory { path, source }
        } else {
            Self::Io { path, source }
        }
    }

    #[must_use]
    pub fn not_found_in_path(name: &str) -> Self {
        Self::NotFoundInPath {
            name: name.to_string(),
        }
    }

    /// Get the stable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotResolved { .. } => codes::BIN_NOT_RESOLVED,
            Self::UnsupportedExtension { .. } => codes::BIN_UNSUPPORTED_EXTENSION,
            Self::NotADirectory { .. } => codes::BIN_NOT_A_DIRECTORY,
            Self::Io { .. } => codes::BIN_IO,
            Self::NotFoundInPath { .. } => codes::BIN_NOT_FOUND_IN_PATH,
        }
    }

    /// Get the errno-style code (`ENOENT`, `ENOTDIR`, ...).
    #[must_use]
    pub fn errno(&self) -> &'static str {
        match self {
            Self::NotResolved { .. }
            | Self::UnsupportedExtension { .. }
            | Self::NotFoundInPath { .. } => "ENOENT",
            Self::NotADirectory { .. } => "ENOTDIR",
            Self::Io { source, .. } => errno_for_kind(source.kind()),
        }
    }

    /// The path the failed resolution was about, if any.
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::NotResolved { path, .. }
            | Self::UnsupportedExtension { path, .. }
            | Self::NotADirectory { path, .. }
            | Self::Io { path, .. } => Some(path),
            Self::NotFoundInPath { .. } => None,
        }
    }
}

fn errno_for_kind(kind: io::ErrorKind) -> &'static str {
    match kind {
        io::ErrorKind::NotFound => "ENOENT",
        io::ErrorKind::PermissionDenied => "EACCES",
        io::ErrorKind::NotADirectory => "ENOTDIR",
        io::ErrorKind::IsADirectory => "EISDIR",
        io::ErrorKind::InvalidInput => "EINVAL",
        io::ErrorKind::Interrupted => "EINTR",
        _ => "EIO",
    }
}

/// Cut `text` to at most `max` bytes on a char boundary.
fn excerpt(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
