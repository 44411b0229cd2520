//! Versioned, read-mostly view of the semantic metadata.
//!
//! The catalog holds one immutable [`CatalogIndex`] at a time. Readers grab
//! an `Arc` to the current index and keep using it for the whole request;
//! `refresh` builds a replacement index off-lock and swaps it in atomically.
//! A snapshot that fails validation never becomes active.

mod error;
mod index;
mod snapshot;

pub use error::{CatalogError, CatalogResult};
pub use index::{normalize, CatalogIndex, IndexedEntity};
pub use snapshot::MetadataSnapshot;

use std::sync::{Arc, RwLock};

use crate::model::Model;

/// Shared, copy-on-write holder for the active catalog index.
#[derive(Debug, Default)]
pub struct SemanticCatalog {
    active: RwLock<Arc<CatalogIndex>>,
}

impl SemanticCatalog {
    /// Create an empty catalog. Searches against it return nothing and model
    /// lookups fail until the first successful refresh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog pre-loaded with a snapshot.
    pub fn from_snapshot(snapshot: MetadataSnapshot) -> CatalogResult<Self> {
        let catalog = Self::new();
        catalog.refresh(snapshot)?;
        Ok(catalog)
    }

    /// The current index. Cheap to call; the returned `Arc` stays valid for
    /// the lifetime of the request even across concurrent refreshes.
    pub fn snapshot(&self) -> Arc<CatalogIndex> {
        self.active
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Validate, index, and atomically activate a new snapshot.
    ///
    /// Building happens outside the lock; concurrent readers keep the
    /// previous index until the swap and never observe partial state. On
    /// validation failure the previous index stays active.
    pub fn refresh(&self, snapshot: MetadataSnapshot) -> CatalogResult<()> {
        let built = CatalogIndex::build(snapshot)?;
        let entity_count = built.entities().len();
        let mut active = self.active.write().unwrap_or_else(|e| e.into_inner());
        *active = Arc::new(built);
        tracing::debug!(entities = entity_count, "catalog refreshed");
        Ok(())
    }

    /// Look up a model by id in the active index.
    pub fn get_model(&self, id: u64) -> CatalogResult<Model> {
        self.snapshot().get_model(id).cloned()
    }
}
