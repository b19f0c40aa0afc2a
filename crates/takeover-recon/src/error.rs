use thiserror::Error;

/// Result type alias for reconnaissance operations
pub type ReconResult<T> = std::result::Result<T, ReconError>;

/// Errors from resolver setup and scan plumbing
#[derive(Error, Debug)]
pub enum ReconError {
    /// DNS resolver could not be built
    #[error("DNS error: {0}")]
    Dns(String),

    /// A query task panicked or was cancelled
    #[error("task error: {0}")]
    Join(String),
}

impl From<tokio::task::JoinError> for ReconError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Join(err.to_string())
    }
}

impl From<ReconError> for takeover_core::TakeoverError {
    fn from(err: ReconError) -> Self {
        match err {
            ReconError::Dns(msg) => Self::Resolver(msg),
            ReconError::Join(msg) => Self::Internal(msg),
        }
    }
}
