//! The versioning ledger
//!
//! The ledger is the authoritative record of when each entity was first
//! seen and last changed, plus the append-only archive of removed
//! entities. It is persisted as two JSON documents with deterministic
//! key ordering, so that an idempotent pass rewrites byte-identical
//! files and ledger diffs stay minimal when the mirror root is under
//! history tracking.

mod record;

pub use record::{RemovedRecord, VersionRecord};

use std::collections::{BTreeMap, BTreeSet};
use std::fs::{self, File, OpenOptions};
use std::path::Path;

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::Serialize;
use serde::de::DeserializeOwned;

use mirror_fs::MirrorLayout;
use mirror_remote::{EntityId, ProviderMetadata};

use crate::config::MetadataPolicy;
use crate::Result;

/// Per-entity version state for one mirror root.
///
/// The ledger is the sole writer of version and removed records. It is
/// an explicit state object: load it, feed observations from a pass
/// into it, reconcile removals, save it.
#[derive(Debug, Clone)]
pub struct Ledger {
    policy: MetadataPolicy,
    records: BTreeMap<EntityId, VersionRecord>,
    removed: BTreeMap<EntityId, Vec<RemovedRecord>>,
}

impl Ledger {
    /// Create an empty ledger with the given metadata policy.
    pub fn new(policy: MetadataPolicy) -> Self {
        Self {
            policy,
            records: BTreeMap::new(),
            removed: BTreeMap::new(),
        }
    }

    /// Load the ledger from a mirror root, or start empty on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if a ledger file exists but cannot be read,
    /// locked, or parsed.
    pub fn load(layout: &MirrorLayout, policy: MetadataPolicy) -> Result<Self> {
        let records = load_json(&layout.version_file())?.unwrap_or_default();
        let removed = load_json(&layout.removed_file())?.unwrap_or_default();

        Ok(Self {
            policy,
            records,
            removed,
        })
    }

    /// Persist both ledger files atomically.
    ///
    /// Each file is written with the write-to-temp-then-rename pattern
    /// under an exclusive lock; a partially written file is never
    /// visible at the final path.
    pub fn save(&self, layout: &MirrorLayout) -> Result<()> {
        save_json(&layout.version_file(), &self.records)?;
        save_json(&layout.removed_file(), &self.removed)?;
        Ok(())
    }

    /// Active version records, in id order.
    pub fn records(&self) -> &BTreeMap<EntityId, VersionRecord> {
        &self.records
    }

    /// The removed-record archive, in id order.
    pub fn removed(&self) -> &BTreeMap<EntityId, Vec<RemovedRecord>> {
        &self.removed
    }

    /// The active record for `id`, if any.
    pub fn get(&self, id: &EntityId) -> Option<&VersionRecord> {
        self.records.get(id)
    }

    /// Fold one observation into the ledger.
    ///
    /// A first observation creates the record with `first_seen ==
    /// last_updated == now`. A subsequent observation bumps
    /// `last_updated` only when `changed` is set; observing the same
    /// content twice in one pass is idempotent. Metadata is refreshed
    /// according to the configured [`MetadataPolicy`].
    pub fn record_observation(
        &mut self,
        id: &EntityId,
        changed: bool,
        checksum: String,
        now: DateTime<Utc>,
        metadata: &ProviderMetadata,
    ) {
        match self.records.get_mut(id) {
            None => {
                self.records
                    .insert(id.clone(), VersionRecord::new(now, checksum, metadata));
            }
            Some(record) => {
                if changed {
                    record.last_updated = now;
                }
                record.checksum = checksum;
                if changed || self.policy == MetadataPolicy::AlwaysOverwrite {
                    record.apply_metadata(metadata);
                }
            }
        }
    }

    /// Archive every active record absent from `current`.
    ///
    /// Must be called exactly once per pass, after all observations,
    /// with the full set of ids the pass accounted for: successfully
    /// observed entities plus entities skipped on transient failure.
    /// An id outside that set had no evidence of presence this pass
    /// and is archived. Returns the archived ids.
    pub fn reconcile_removals(
        &mut self,
        current: &BTreeSet<EntityId>,
        now: DateTime<Utc>,
    ) -> Vec<EntityId> {
        let gone: Vec<EntityId> = self
            .records
            .keys()
            .filter(|id| !current.contains(*id))
            .cloned()
            .collect();

        for id in &gone {
            if let Some(record) = self.records.remove(id) {
                self.removed.entry(id.clone()).or_default().push(RemovedRecord {
                    record,
                    removed_date: now,
                });
            }
        }

        gone
    }
}

/// Read a JSON document through a shared-locked file handle.
fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.is_file() {
        return Ok(None);
    }

    let file = File::open(path)?;
    file.lock_shared()?;

    // Read through the locked handle to avoid a TOCTOU race
    let mut content = String::new();
    use std::io::Read;
    (&file).read_to_string(&mut content)?;

    Ok(Some(serde_json::from_str(&content)?))
}

/// Write a JSON document atomically under an exclusive lock.
fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');

    let lock_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)?;
    lock_file.lock_exclusive()?;

    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, &content)?;
    fs::rename(&temp_path, path)?;

    // Lock released when lock_file is dropped
    Ok(())
}
