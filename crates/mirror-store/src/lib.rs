//! Canonical document model and blob store for schema-mirror
//!
//! Documents are opaque JSON blobs compared structurally after
//! canonicalization (recursive key sort, fixed serialization), so that
//! two semantically identical documents always produce identical bytes
//! and harmless re-ordering never registers as a change. The store
//! persists one canonical blob per entity and reports whether a write
//! actually changed content — that signal, not the write itself, drives
//! version bumping upstream.

pub mod diff;
pub mod document;
pub mod error;
pub mod store;

pub use diff::DiffStats;
pub use document::Document;
pub use error::{Error, Result};
pub use store::{DocumentStore, WriteOutcome};
