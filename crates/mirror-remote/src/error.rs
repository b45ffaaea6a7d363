//! Error types for mirror-remote

/// Result type for mirror-remote operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to the remote catalog
///
/// Enumeration failure is fatal to a synchronization pass; a fetch
/// failure is scoped to one entity and the pass continues without it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to enumerate catalog entities: {message}")]
    Enumeration { message: String },

    #[error("Failed to fetch entity {id}: {message}")]
    Fetch { id: String, message: String },

    #[error("Invalid entity id: {value}")]
    InvalidEntityId { value: String },
}
