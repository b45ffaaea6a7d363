//! Version and removal records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mirror_remote::ProviderMetadata;

/// The version state of one active entity.
///
/// `first_seen` is written once and never mutated; `last_updated` moves
/// only when canonical content changed. Both are local observations —
/// remote timestamps live in the metadata fields and are never trusted
/// for versioning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRecord {
    /// Pass timestamp of the first observation
    pub first_seen: DateTime<Utc>,

    /// Pass timestamp of the most recent content change
    pub last_updated: DateTime<Utc>,

    /// Checksum of the canonical blob as last written (`sha256:<hex>`)
    pub checksum: String,

    /// Provider-reported creation time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_created: Option<DateTime<Utc>>,

    /// Provider-reported deprecation flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecation_status: Option<String>,
}

impl VersionRecord {
    /// Create the record for a first observation.
    pub fn new(now: DateTime<Utc>, checksum: String, metadata: &ProviderMetadata) -> Self {
        let mut record = Self {
            first_seen: now,
            last_updated: now,
            checksum,
            time_created: None,
            deprecation_status: None,
        };
        record.apply_metadata(metadata);
        record
    }

    /// Overwrite metadata fields the provider actually supplied;
    /// absent fields leave the stored values untouched.
    pub fn apply_metadata(&mut self, metadata: &ProviderMetadata) {
        if let Some(time_created) = metadata.time_created {
            self.time_created = Some(time_created);
        }
        if let Some(status) = &metadata.deprecation_status {
            self.deprecation_status = Some(status.clone());
        }
    }
}

/// An archived record for an entity that disappeared from the catalog.
///
/// Immutable once created. If the entity reappears it gets a brand-new
/// [`VersionRecord`]; the archive entry stays as it was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovedRecord {
    /// The version record as it stood at removal time
    #[serde(flatten)]
    pub record: VersionRecord,

    /// Pass timestamp of the pass that no longer saw the entity
    pub removed_date: DateTime<Utc>,
}
