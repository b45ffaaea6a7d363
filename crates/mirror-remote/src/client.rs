//! The catalog client seam

use async_trait::async_trait;
use serde_json::Value;

use crate::{EntityId, ProviderMetadata, Result};

/// One entry from catalog enumeration.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySummary {
    pub id: EntityId,
    /// Metadata the listing already carries; may be sparser than what a
    /// full fetch returns.
    pub metadata: ProviderMetadata,
}

/// One fetched schema document with its metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedEntity {
    /// Raw schema document as returned by the remote. Canonicalization
    /// happens in the store, not here.
    pub document: Value,
    pub metadata: ProviderMetadata,
}

/// Read-only view of the remote catalog.
///
/// `list_entities` drains the remote's pagination to completion and
/// returns the full current entity set — removal detection is only
/// meaningful against a complete enumeration. `fetch_entity` may fail
/// independently per id; callers skip the entity and continue.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Enumerate every entity currently present in the catalog.
    async fn list_entities(&self) -> Result<Vec<EntitySummary>>;

    /// Fetch the current schema document for one entity.
    async fn fetch_entity(&self, id: &EntityId) -> Result<FetchedEntity>;
}
