use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for takeover operations
pub type Result<T> = std::result::Result<T, TakeoverError>;

/// Errors that can occur while loading inputs or running a scan
#[derive(Error, Debug)]
pub enum TakeoverError {
    /// An input or output file could not be opened, read or written
    #[error("file error ({}): {source}", .path.display())]
    File {
        /// Path of the offending file
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// A single DNS query failed and the scan was aborted
    #[error("DNS query for {subdomain} failed: {message}")]
    Query {
        /// Subdomain whose query failed
        subdomain: String,
        /// Diagnostic text reported by the resolver
        message: String,
    },

    /// The resolver could not be constructed
    #[error("resolver error: {0}")]
    Resolver(String),

    /// Generic internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl TakeoverError {
    /// Build a [`TakeoverError::File`] for `path`
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }

    /// Returns true if this error came from a DNS query rather than local I/O
    #[must_use]
    pub const fn is_query_error(&self) -> bool {
        matches!(self, Self::Query { .. })
    }
}
