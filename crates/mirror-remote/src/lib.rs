//! Remote catalog client interface for schema-mirror
//!
//! The remote catalog is an external collaborator: it can enumerate the
//! current set of entities and fetch one entity's schema document, and
//! nothing else. This crate defines that seam as an async trait plus the
//! identifier and metadata types that cross it. Concrete transports
//! (cloud SDKs, HTTP) implement [`CatalogClient`] elsewhere; tests use
//! the scripted implementation from `mirror-test-utils`.

pub mod client;
pub mod error;
pub mod id;
pub mod metadata;

pub use client::{CatalogClient, EntitySummary, FetchedEntity};
pub use error::{Error, Result};
pub use id::EntityId;
pub use metadata::ProviderMetadata;
