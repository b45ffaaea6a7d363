//! Filesystem substrate for schema-mirror
//!
//! Provides the pieces every other crate builds on:
//!
//! - [`path`] — the reversible entity-id ↔ blob file-name mapping
//! - [`io`] — atomic writes with advisory locking
//! - [`checksum`] — canonical SHA-256 content checksums
//! - [`layout`] — the on-disk layout of one mirror root

pub mod checksum;
pub mod error;
pub mod io;
pub mod layout;
pub mod path;

pub use error::{Error, Result};
pub use layout::MirrorLayout;
pub use path::{entity_file_name, entity_id_from_file_name};
