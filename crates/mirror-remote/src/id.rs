//! Entity identifiers

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Segments of alphanumerics joined by `::`, e.g. `AWS::S3::Bucket`.
/// Dashes are excluded so the id ↔ file-name mapping stays reversible.
static ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+(::[A-Za-z0-9]+)*$").expect("valid pattern"));

/// Opaque, stable key naming one logical schema document.
///
/// Validated at construction; an `EntityId` that exists is always safe
/// to use verbatim as a map key and to map onto a blob file name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId(String);

impl EntityId {
    /// Parse and validate an entity id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEntityId`] if the value does not match
    /// the expected `Segment::Segment::…` shape.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if ID_PATTERN.is_match(&value) {
            Ok(Self(value))
        } else {
            Err(Error::InvalidEntityId { value })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Leading namespace segment (`AWS` for `AWS::S3::Bucket`).
    pub fn namespace(&self) -> &str {
        self.0.split("::").next().unwrap_or(&self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for EntityId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.0
    }
}
