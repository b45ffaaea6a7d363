//! Error types for mirror-store

/// Result type for mirror-store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in mirror-store operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Filesystem error from mirror-fs
    #[error(transparent)]
    Fs(#[from] mirror_fs::Error),

    /// Document is not valid JSON
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
