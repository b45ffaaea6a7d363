//! Git-backed change history log for schema-mirror
//!
//! The mirror root doubles as a git repository. Every synchronization
//! pass that actually changed content appends exactly one commit; an
//! empty pass appends nothing. The per-entity change timeline is never
//! stored separately — it is derived by replaying the commit graph
//! filtered to the entity's blob path, so there is no second source of
//! truth to drift from the log.

pub mod error;
pub mod log;

pub use error::{Error, Result};
pub use log::{ChangeEvent, HistoryLog, PathHistory};
