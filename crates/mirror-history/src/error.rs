//! Error types for mirror-history

/// Result type for mirror-history operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in mirror-history operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),
}
