//! Synchronization passes
//!
//! One pass is: enumerate the catalog, fetch and store every entity
//! with a bounded worker pool, fold observations into the ledger,
//! reconcile removals against the successfully-observed set, persist,
//! and append one history entry when content changed.

mod check;
mod report;
mod runner;

pub use check::{DriftItem, DriftReport, check_drift};
pub use report::PassReport;
pub use runner::SnapshotRunner;
