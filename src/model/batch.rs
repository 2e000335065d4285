//! Batch - Chain several model writes into one atomic commit.
//!
//! ```ignore
//! store
//!     .batch()
//!     .update(&product_a, version_a)
//!     .update(&product_b, version_b)
//!     .insert(&order)
//!     .commit()?;
//! ```

use super::{Model, ModelError, ModelStore};

/// What must be true of the stored document for a write to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precondition {
    /// Write unconditionally.
    Any,
    /// The document must not exist yet.
    Absent,
    /// The document must exist at exactly this version.
    Version(u64),
}

/// A pre-serialized, type-erased write.
#[derive(Debug, Clone)]
pub struct BatchWrite {
    pub collection: &'static str,
    pub id: String,
    pub bytes: Vec<u8>,
    pub precondition: Precondition,
}

/// Builder collecting writes for a single all-or-nothing commit.
pub struct Batch<'a, S> {
    store: &'a S,
    writes: Vec<BatchWrite>,
    error: Option<ModelError>,
}

impl<'a, S: ModelStore> Batch<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            writes: vec![],
            error: None,
        }
    }

    /// Queue a version-checked update.
    pub fn update<M: Model>(self, model: &M, expected_version: u64) -> Self {
        self.push(model, Precondition::Version(expected_version))
    }

    /// Queue an insert that fails if the document exists.
    pub fn insert<M: Model>(self, model: &M) -> Self {
        self.push(model, Precondition::Absent)
    }

    /// Queue an unconditional upsert.
    pub fn save<M: Model>(self, model: &M) -> Self {
        self.push(model, Precondition::Any)
    }

    /// Commit every queued write. Serialization failures surface here,
    /// before anything reaches the store.
    pub fn commit(self) -> Result<Vec<u64>, ModelError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if self.writes.is_empty() {
            return Ok(vec![]);
        }
        self.store.commit_writes(self.writes)
    }

    fn push<M: Model>(mut self, model: &M, precondition: Precondition) -> Self {
        if self.error.is_some() {
            return self;
        }
        match serde_json::to_vec(model) {
            Ok(bytes) => self.writes.push(BatchWrite {
                collection: M::COLLECTION,
                id: model.id().to_string(),
                bytes,
                precondition,
            }),
            Err(e) => self.error = Some(e.into()),
        }
        self
    }
}
