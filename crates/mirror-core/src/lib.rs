//! Snapshot-diff-and-ledger engine for schema-mirror
//!
//! This crate coordinates the leaf crates into the core loop:
//!
//! - **Ledger**: per-entity version records (first seen, last updated,
//!   provider metadata) and the removed-record archive, persisted
//!   atomically with stable ordering
//! - **MirrorConfig**: runtime configuration for one mirror root
//! - **SnapshotRunner**: one full synchronization pass — enumerate,
//!   fetch with a bounded worker pool, store, observe, reconcile
//!   removals, persist, append history
//!
//! # Architecture
//!
//! `mirror-core` sits above the leaf crates:
//!
//! ```text
//!                SnapshotRunner
//!                      |
//!     +---------+------+--------+----------+
//!     |         |               |          |
//! mirror-fs mirror-store mirror-history mirror-remote
//! ```
//!
//! The ledger file is the source of truth for version timestamps; the
//! history log is complementary and derivable, never authoritative.

pub mod config;
pub mod error;
pub mod ledger;
pub mod sync;

pub use config::{MetadataPolicy, MirrorConfig};
pub use error::{Error, Result};
pub use ledger::{Ledger, RemovedRecord, VersionRecord};
pub use sync::{DriftItem, DriftReport, PassReport, SnapshotRunner, check_drift};
