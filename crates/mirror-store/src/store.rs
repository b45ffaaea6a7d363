//! The document store: one canonical blob per entity

use std::fs;
use std::path::PathBuf;

use mirror_fs::path::entity_file_name;
use mirror_fs::{checksum, io};
use mirror_remote::EntityId;

use crate::{Document, Result};

/// Result of one store write.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteOutcome {
    /// Whether the canonical content differs from what was stored
    /// before (always true for a first write).
    pub changed: bool,
    /// Checksum of the canonical blob as written (`sha256:<hex>`).
    pub checksum: String,
    /// The canonical document that was stored before this write, when
    /// one existed and parsed.
    pub previous: Option<Document>,
}

/// Persists one canonical blob per entity under a schemas directory.
///
/// The blob is rewritten on every observation so the store always
/// reflects the latest fetch; the [`WriteOutcome::changed`] signal is
/// what downstream version bumping consumes.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    schemas_dir: PathBuf,
}

impl DocumentStore {
    pub fn new(schemas_dir: impl Into<PathBuf>) -> Self {
        Self {
            schemas_dir: schemas_dir.into(),
        }
    }

    /// Write the canonical blob for `id`, reporting whether content
    /// changed.
    ///
    /// The prior blob is parsed and re-canonicalized before comparison,
    /// so formatting drift in an old blob never registers as a content
    /// change. A prior blob that fails to parse is treated as changed
    /// and overwritten.
    ///
    /// # Errors
    ///
    /// Returns an error if the blob cannot be written; callers skip the
    /// entity for the current pass and continue.
    pub fn write(&self, id: &EntityId, document: &Document) -> Result<WriteOutcome> {
        let path = self.blob_path(id);
        let text = document.canonical_text();

        let previous = self.read(id)?;
        let changed = previous.as_ref().is_none_or(|existing| existing != document);

        io::write_atomic(&path, text.as_bytes())?;

        Ok(WriteOutcome {
            changed,
            checksum: checksum::compute_content_checksum(&text),
            previous,
        })
    }

    /// Read the stored blob for `id`, if any.
    ///
    /// An unparsable blob is reported as absent (it will be rewritten
    /// on the next observation).
    pub fn read(&self, id: &EntityId) -> Result<Option<Document>> {
        let path = self.blob_path(id);
        if !path.is_file() {
            return Ok(None);
        }

        let text = io::read_text(&path)?;
        match Document::from_text(&text) {
            Ok(doc) => Ok(Some(doc)),
            Err(e) => {
                tracing::warn!(entity = %id, error = %e, "Stored blob is not valid JSON");
                Ok(None)
            }
        }
    }

    /// Whether a blob exists for `id`.
    pub fn contains(&self, id: &EntityId) -> bool {
        self.blob_path(id).is_file()
    }

    /// List every entity with a stored blob, in id order.
    ///
    /// File names that do not reverse-map to a valid entity id are
    /// skipped.
    pub fn list(&self) -> Result<Vec<EntityId>> {
        if !self.schemas_dir.is_dir() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.schemas_dir)
            .map_err(|e| mirror_fs::Error::io(&self.schemas_dir, e))?;

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| mirror_fs::Error::io(&self.schemas_dir, e))?;
            let name = entry.file_name();
            let Some(raw) = mirror_fs::entity_id_from_file_name(&name.to_string_lossy()) else {
                continue;
            };
            if let Ok(id) = EntityId::new(raw) {
                ids.push(id);
            }
        }

        ids.sort();
        Ok(ids)
    }

    /// Absolute path of the blob for `id`.
    pub fn blob_path(&self, id: &EntityId) -> PathBuf {
        self.schemas_dir.join(entity_file_name(id.as_str()))
    }
}
