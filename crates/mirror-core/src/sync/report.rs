//! Pass reports

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The externally observable result of one synchronization pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassReport {
    /// Correlation id for this pass
    pub pass_id: Uuid,
    /// The pass timestamp; every record mutation in the pass carries it
    pub started_at: DateTime<Utc>,
    /// Entities fetched and stored successfully
    pub processed: usize,
    /// Entities seen for the first time
    pub added: usize,
    /// Existing entities whose canonical content changed
    pub changed: usize,
    /// Existing entities re-fetched without a content change
    pub unchanged: usize,
    /// Entities archived as removed
    pub removed: usize,
    /// Per-entity failures (fetch, timeout, store write); these
    /// entities were skipped and stay out of removal reconciliation
    pub errors: Vec<String>,
    /// Short hash of the history entry appended for this pass, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
}

impl PassReport {
    pub(crate) fn new(pass_id: Uuid, started_at: DateTime<Utc>) -> Self {
        Self {
            pass_id,
            started_at,
            processed: 0,
            added: 0,
            changed: 0,
            unchanged: 0,
            removed: 0,
            errors: Vec::new(),
            commit: None,
        }
    }

    /// Whether any blob content changed this pass.
    pub fn content_changed(&self) -> bool {
        self.added + self.changed > 0
    }
}
