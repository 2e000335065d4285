//! Models - typed document storage for catalog, customer and order data.
//!
//! Every document lives in a collection and carries a version that grows by
//! one on each write. Writes that span several documents go through a
//! [`Batch`], which is applied all-or-nothing.
//!
//! ## Example
//!
//! ```ignore
//! use storefront::model::{InMemoryModelStore, ModelsExt};
//!
//! let store = InMemoryModelStore::new();
//! store.models::<Product>().save(&product)?;
//! let loaded = store.models::<Product>().get("p-1")?;
//!
//! store
//!     .batch()
//!     .update(&product, loaded.version)
//!     .insert(&order)
//!     .commit()?;
//! ```

mod batch;
mod in_memory;
mod model_repository;
mod store;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Trait for types that can be stored as models.
pub trait Model: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// The collection name for this model type (e.g., "products", "orders").
    /// Maps to a table in SQL, a collection in MongoDB, a key prefix in KV stores, etc.
    const COLLECTION: &'static str;

    /// Returns the unique identifier for this model instance.
    fn id(&self) -> &str;
}

/// A versioned wrapper around model data for optimistic concurrency control.
#[derive(Debug, Clone)]
pub struct Versioned<T> {
    pub data: T,
    pub version: u64,
}

/// Error type for model store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Optimistic concurrency conflict. `expected == 0` means the write
    /// required the document to be absent.
    #[error("concurrency conflict on {collection}:{id} (expected version {expected}, actual {actual})")]
    ConcurrencyConflict {
        collection: String,
        id: String,
        expected: u64,
        actual: u64,
    },
    /// Serialization/deserialization error.
    #[error("model serialization error: {0}")]
    Serde(String),
    /// Storage-level error.
    #[error("model storage error: {0}")]
    Storage(String),
    /// Model not found.
    #[error("model not found: {collection}:{id}")]
    NotFound { collection: String, id: String },
}

impl ModelError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, ModelError::ConcurrencyConflict { .. })
    }
}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        ModelError::Serde(err.to_string())
    }
}

pub use batch::{Batch, BatchWrite, Precondition};
pub use in_memory::InMemoryModelStore;
pub use model_repository::{ModelRepository, ModelsExt};
pub use store::ModelStore;
