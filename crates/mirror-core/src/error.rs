//! Error types for mirror-core

/// Result type for mirror-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in mirror-core operations
///
/// Enumeration and ledger-persist failures are fatal to a pass; every
/// per-entity failure is handled inside the pass (skip and continue)
/// and surfaces only in the pass report.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The catalog could not be enumerated; no removals may be
    /// reconciled from an incomplete enumeration
    #[error("Enumeration failed, aborting pass: {message}")]
    EnumerationFailed { message: String },

    /// The final durable ledger write failed; prior durable state
    /// remains valid
    #[error("Ledger persist failed: {message}")]
    LedgerPersist { message: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from mirror-fs
    #[error(transparent)]
    Fs(#[from] mirror_fs::Error),

    /// Store error from mirror-store
    #[error(transparent)]
    Store(#[from] mirror_store::Error),

    /// History log error from mirror-history
    #[error(transparent)]
    History(#[from] mirror_history::Error),

    /// Remote catalog error from mirror-remote
    #[error(transparent)]
    Remote(#[from] mirror_remote::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}
