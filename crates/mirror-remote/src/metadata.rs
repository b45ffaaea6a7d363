//! Provider-supplied metadata

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Auxiliary fields the remote reports alongside a schema document.
///
/// All fields are optional; the remote is free to omit any of them, and
/// absent fields are dropped rather than serialized as nulls. Remote
/// timestamps are informational only — they are never used for change
/// detection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderMetadata {
    /// When the remote says the type was created
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_created: Option<DateTime<Utc>>,

    /// Remote deprecation flag (`LIVE`, `DEPRECATED`, …)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecation_status: Option<String>,
}

impl ProviderMetadata {
    /// True when the remote supplied no metadata at all.
    pub fn is_empty(&self) -> bool {
        self.time_created.is_none() && self.deprecation_status.is_none()
    }
}
