//! On-disk layout of one mirror root
//!
//! A mirror root contains:
//!
//! ```text
//! <root>/
//!   config.toml               runtime configuration
//!   version_metadata.json     active version records
//!   removed_schemas.json      removed-record archive
//!   schemas/                  one canonical blob per entity
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::path::entity_file_name;
use crate::{Error, Result};

/// Directory holding one blob per entity
pub const SCHEMAS_DIR: &str = "schemas";
/// Active version records
pub const VERSION_FILE: &str = "version_metadata.json";
/// Removed-record archive
pub const REMOVED_FILE: &str = "removed_schemas.json";
/// Runtime configuration
pub const CONFIG_FILE: &str = "config.toml";

/// Paths within a single mirror root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorLayout {
    root: PathBuf,
}

impl MirrorLayout {
    /// Create a layout rooted at `root`. Nothing is touched on disk.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the root and schemas directories if they are missing.
    pub fn ensure(&self) -> Result<()> {
        let schemas = self.schemas_dir();
        fs::create_dir_all(&schemas).map_err(|e| Error::io(&schemas, e))?;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn schemas_dir(&self) -> PathBuf {
        self.root.join(SCHEMAS_DIR)
    }

    pub fn version_file(&self) -> PathBuf {
        self.root.join(VERSION_FILE)
    }

    pub fn removed_file(&self) -> PathBuf {
        self.root.join(REMOVED_FILE)
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    /// Absolute path of the blob for `id`.
    pub fn blob_path(&self, id: &str) -> PathBuf {
        self.schemas_dir().join(entity_file_name(id))
    }

    /// Path of the blob for `id` relative to the root.
    ///
    /// This is the path the history log tracks, with forward slashes
    /// regardless of platform.
    pub fn blob_rel_path(&self, id: &str) -> String {
        format!("{}/{}", SCHEMAS_DIR, entity_file_name(id))
    }
}
