//! Scripted in-memory catalog client
//!
//! Tests mutate the corpus between passes to simulate entities
//! appearing, changing, and disappearing, and inject per-entity fetch
//! failures or whole-enumeration failures.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use mirror_remote::{
    CatalogClient, EntityId, EntitySummary, Error, FetchedEntity, ProviderMetadata, Result,
};

#[derive(Default)]
struct CatalogState {
    entities: BTreeMap<EntityId, FetchedEntity>,
    failing_fetches: BTreeSet<EntityId>,
    failing_enumeration: bool,
}

/// An in-memory catalog whose contents are scripted by the test.
#[derive(Default)]
pub struct ScriptedCatalog {
    state: Mutex<CatalogState>,
}

impl ScriptedCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entity with empty provider metadata.
    ///
    /// Panics on an invalid id — test scripts are expected to use
    /// well-formed ids.
    pub fn put(&self, id: &str, document: Value) {
        self.put_with_metadata(id, document, ProviderMetadata::default());
    }

    /// Insert or replace an entity with explicit provider metadata.
    pub fn put_with_metadata(&self, id: &str, document: Value, metadata: ProviderMetadata) {
        let id = EntityId::new(id).expect("test entity id must be valid");
        self.state
            .lock()
            .unwrap()
            .entities
            .insert(id, FetchedEntity { document, metadata });
    }

    /// Remove an entity from the corpus.
    pub fn remove(&self, id: &str) {
        let id = EntityId::new(id).expect("test entity id must be valid");
        let mut state = self.state.lock().unwrap();
        state.entities.remove(&id);
        state.failing_fetches.remove(&id);
    }

    /// Make fetches of `id` fail until cleared. The entity stays
    /// enumerable.
    pub fn fail_fetch(&self, id: &str) {
        let id = EntityId::new(id).expect("test entity id must be valid");
        self.state.lock().unwrap().failing_fetches.insert(id);
    }

    /// Clear all injected fetch failures.
    pub fn clear_fetch_failures(&self) {
        self.state.lock().unwrap().failing_fetches.clear();
    }

    /// Make enumeration itself fail (or succeed again).
    pub fn fail_enumeration(&self, failing: bool) {
        self.state.lock().unwrap().failing_enumeration = failing;
    }
}

#[async_trait]
impl CatalogClient for ScriptedCatalog {
    async fn list_entities(&self) -> Result<Vec<EntitySummary>> {
        let state = self.state.lock().unwrap();
        if state.failing_enumeration {
            return Err(Error::Enumeration {
                message: "scripted enumeration failure".to_string(),
            });
        }

        Ok(state
            .entities
            .iter()
            .map(|(id, entity)| EntitySummary {
                id: id.clone(),
                metadata: entity.metadata.clone(),
            })
            .collect())
    }

    async fn fetch_entity(&self, id: &EntityId) -> Result<FetchedEntity> {
        let state = self.state.lock().unwrap();
        if state.failing_fetches.contains(id) {
            return Err(Error::Fetch {
                id: id.to_string(),
                message: "scripted fetch failure".to_string(),
            });
        }

        state.entities.get(id).cloned().ok_or_else(|| Error::Fetch {
            id: id.to_string(),
            message: "entity not in catalog".to_string(),
        })
    }
}
