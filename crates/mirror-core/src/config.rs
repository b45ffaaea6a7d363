//! Runtime configuration for one mirror root

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use mirror_fs::MirrorLayout;

use crate::Result;

/// When provider-supplied metadata overwrites what the ledger holds.
///
/// One fixed policy per deployment; the ledger applies it uniformly to
/// every observation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetadataPolicy {
    /// Refresh metadata on every observation — remote metadata can
    /// change independently of schema content
    #[default]
    AlwaysOverwrite,
    /// Refresh metadata only when the schema content changed
    OnChangeOnly,
}

/// Configuration for one mirror root, loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MirrorConfig {
    /// Only mirror entities whose id starts with this prefix
    /// (e.g. `AWS::`); `None` mirrors the whole catalog
    pub prefix_filter: Option<String>,

    /// Metadata overwrite policy, see [`MetadataPolicy`]
    pub metadata_policy: MetadataPolicy,

    /// Upper bound on concurrent fetches within one pass
    pub fetch_workers: usize,

    /// Per-entity fetch timeout; a timed-out fetch is a failure for
    /// that entity only
    pub fetch_timeout_secs: u64,

    /// Maintain the git history log at the mirror root
    pub history: bool,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            prefix_filter: None,
            metadata_policy: MetadataPolicy::default(),
            fetch_workers: 8,
            fetch_timeout_secs: 30,
            history: true,
        }
    }
}

impl MirrorConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if it
    /// contains unknown keys.
    pub fn load(path: &Path) -> Result<Self> {
        let content = mirror_fs::io::read_text(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load the mirror root's configuration, falling back to defaults
    /// when no config file exists yet.
    pub fn load_or_default(layout: &MirrorLayout) -> Result<Self> {
        let path = layout.config_file();
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}
