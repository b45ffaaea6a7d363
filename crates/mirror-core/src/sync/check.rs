//! Drift check between ledger and store

use mirror_fs::checksum::compute_file_checksum;
use mirror_remote::EntityId;
use mirror_store::DocumentStore;

use crate::Ledger;

/// One entity whose stored blob disagrees with its ledger record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriftItem {
    pub id: EntityId,
    pub description: String,
}

/// Result of comparing every active record against the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriftReport {
    /// Blobs whose checksum no longer matches the ledger
    pub drifted: Vec<DriftItem>,
    /// Records with no readable blob behind them
    pub missing: Vec<DriftItem>,
}

impl DriftReport {
    pub fn is_healthy(&self) -> bool {
        self.drifted.is_empty() && self.missing.is_empty()
    }
}

/// Verify that every active ledger record still has a matching blob.
///
/// The ledger is authoritative for version timestamps; this check
/// detects out-of-band edits or deletions of the blobs it describes.
pub fn check_drift(ledger: &Ledger, store: &DocumentStore) -> DriftReport {
    let mut report = DriftReport::default();

    for (id, record) in ledger.records() {
        let path = store.blob_path(id);
        if !path.is_file() {
            report.missing.push(DriftItem {
                id: id.clone(),
                description: "Blob not found".to_string(),
            });
            continue;
        }

        match compute_file_checksum(&path) {
            Ok(actual) if actual == record.checksum => {}
            Ok(actual) => report.drifted.push(DriftItem {
                id: id.clone(),
                description: format!(
                    "Checksum mismatch: expected {}, got {}",
                    record.checksum, actual
                ),
            }),
            Err(e) => report.missing.push(DriftItem {
                id: id.clone(),
                description: format!("Failed to read blob: {}", e),
            }),
        }
    }

    report
}
