//! Error types for the embedgen-core library.
//!
//! Every variant is fatal to a generation run. Variants that stem from the
//! filesystem carry the offending path so the diagnostic can name it.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for embedgen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all embedgen operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The source directory could not be listed
    #[error("failed to list directory '{path}': {source}")]
    DirectoryUnavailable {
        /// Directory that could not be listed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A candidate payload could not be read in full
    #[error("failed to read payload '{path}': {source}")]
    PayloadUnreadable {
        /// Path to the payload that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The artifact could not be created or truncated
    #[error("failed to write artifact '{path}': {source}")]
    DestinationUnwritable {
        /// Path to the artifact that failed to write
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A directory entry's name is not valid UTF-8
    #[error("file name of '{path}' is not valid UTF-8")]
    InvalidFileName {
        /// The entry with the unrepresentable name
        path: PathBuf,
    },

    /// A byte literal could not be decoded
    #[error("invalid byte literal at offset {offset}: {details}")]
    InvalidLiteral {
        /// Character offset of the malformed token
        offset: usize,
        /// Detailed description of the issue
        details: String,
    },

    /// Writing the artifact text failed
    #[error("failed to render artifact: {0}")]
    Render(#[from] std::fmt::Error),
}

impl Error {
    /// Creates a new directory listing error
    pub fn directory_unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DirectoryUnavailable {
            path: path.into(),
            source,
        }
    }

    /// Creates a new payload read error
    pub fn payload_unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::PayloadUnreadable {
            path: path.into(),
            source,
        }
    }

    /// Creates a new artifact write error
    pub fn destination_unwritable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DestinationUnwritable {
            path: path.into(),
            source,
        }
    }

    /// Creates a new invalid file name error
    pub fn invalid_file_name(path: impl Into<PathBuf>) -> Self {
        Self::InvalidFileName { path: path.into() }
    }

    /// Creates a new literal decode error
    pub fn invalid_literal(offset: usize, details: impl Into<String>) -> Self {
        Self::InvalidLiteral {
            offset,
            details: details.into(),
        }
    }

    /// Returns the filesystem path this error refers to, if any
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::DirectoryUnavailable { path, .. }
            | Self::PayloadUnreadable { path, .. }
            | Self::DestinationUnwritable { path, .. }
            | Self::InvalidFileName { path } => Some(path),
            Self::InvalidLiteral { .. } | Self::Render(_) => None,
        }
    }
}
