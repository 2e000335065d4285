//! InMemoryModelStore - HashMap-backed model store for development and tests.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{BatchWrite, Model, ModelError, ModelStore, Precondition, Versioned};

/// Internal stored representation of a model.
struct StoredModel {
    bytes: Vec<u8>,
    version: u64,
}

/// In-memory model store backed by a HashMap.
///
/// Storage key is `"COLLECTION:id"`. Clone-friendly via Arc.
#[derive(Clone)]
pub struct InMemoryModelStore {
    storage: Arc<RwLock<HashMap<String, StoredModel>>>,
}

impl Default for InMemoryModelStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryModelStore {
    /// Create a new empty model store.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn make_key(collection: &str, id: &str) -> String {
        format!("{}:{}", collection, id)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, StoredModel>>, ModelError> {
        self.storage
            .read()
            .map_err(|_| ModelError::Storage("lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, StoredModel>>, ModelError> {
        self.storage
            .write()
            .map_err(|_| ModelError::Storage("lock poisoned".into()))
    }
}

fn conflict(collection: &str, id: &str, expected: u64, actual: u64) -> ModelError {
    ModelError::ConcurrencyConflict {
        collection: collection.to_string(),
        id: id.to_string(),
        expected,
        actual,
    }
}

impl ModelStore for InMemoryModelStore {
    fn get_model<M: Model>(&self, id: &str) -> Result<Option<Versioned<M>>, ModelError> {
        let key = Self::make_key(M::COLLECTION, id);
        let storage = self.read()?;

        match storage.get(&key) {
            Some(stored) => {
                let data: M = serde_json::from_slice(&stored.bytes)?;
                Ok(Some(Versioned {
                    data,
                    version: stored.version,
                }))
            }
            None => Ok(None),
        }
    }

    fn save_model<M: Model>(&self, model: &M) -> Result<Versioned<M>, ModelError> {
        let key = Self::make_key(M::COLLECTION, model.id());
        let bytes = serde_json::to_vec(model)?;

        let mut storage = self.write()?;
        let new_version = storage.get(&key).map(|s| s.version + 1).unwrap_or(1);
        storage.insert(
            key,
            StoredModel {
                bytes,
                version: new_version,
            },
        );

        Ok(Versioned {
            data: model.clone(),
            version: new_version,
        })
    }

    fn insert_model<M: Model>(&self, model: &M) -> Result<Versioned<M>, ModelError> {
        let key = Self::make_key(M::COLLECTION, model.id());
        let bytes = serde_json::to_vec(model)?;

        let mut storage = self.write()?;
        if let Some(existing) = storage.get(&key) {
            return Err(conflict(M::COLLECTION, model.id(), 0, existing.version));
        }
        storage.insert(key, StoredModel { bytes, version: 1 });

        Ok(Versioned {
            data: model.clone(),
            version: 1,
        })
    }

    fn update_model<M: Model>(
        &self,
        model: &M,
        expected_version: u64,
    ) -> Result<Versioned<M>, ModelError> {
        let key = Self::make_key(M::COLLECTION, model.id());
        let bytes = serde_json::to_vec(model)?;

        let mut storage = self.write()?;
        let actual_version =
            storage
                .get(&key)
                .map(|s| s.version)
                .ok_or_else(|| ModelError::NotFound {
                    collection: M::COLLECTION.to_string(),
                    id: model.id().to_string(),
                })?;

        if actual_version != expected_version {
            return Err(conflict(
                M::COLLECTION,
                model.id(),
                expected_version,
                actual_version,
            ));
        }

        let new_version = actual_version + 1;
        storage.insert(
            key,
            StoredModel {
                bytes,
                version: new_version,
            },
        );

        Ok(Versioned {
            data: model.clone(),
            version: new_version,
        })
    }

    fn delete_model<M: Model>(&self, id: &str) -> Result<bool, ModelError> {
        let key = Self::make_key(M::COLLECTION, id);
        let mut storage = self.write()?;
        Ok(storage.remove(&key).is_some())
    }

    fn find_models<M: Model>(
        &self,
        predicate: &dyn Fn(&M) -> bool,
    ) -> Result<Vec<Versioned<M>>, ModelError> {
        let storage = self.read()?;
        let prefix = format!("{}:", M::COLLECTION);
        let mut results = Vec::new();

        for (key, stored) in storage.iter() {
            if !key.starts_with(&prefix) {
                continue;
            }
            let data: M = serde_json::from_slice(&stored.bytes)?;
            if predicate(&data) {
                results.push(Versioned {
                    data,
                    version: stored.version,
                });
            }
        }

        Ok(results)
    }

    fn commit_writes(&self, writes: Vec<BatchWrite>) -> Result<Vec<u64>, ModelError> {
        let mut storage = self.write()?;

        // Versions as they will be after the writes queued so far, so a
        // batch touching the same document twice is checked in order.
        let mut staged: HashMap<String, u64> = HashMap::new();
        let mut versions = Vec::with_capacity(writes.len());

        for write in &writes {
            let key = Self::make_key(write.collection, &write.id);
            let current = staged
                .get(&key)
                .copied()
                .or_else(|| storage.get(&key).map(|s| s.version));

            match (write.precondition, current) {
                (Precondition::Any, _) => {}
                (Precondition::Absent, None) => {}
                (Precondition::Absent, Some(actual)) => {
                    return Err(conflict(write.collection, &write.id, 0, actual));
                }
                (Precondition::Version(expected), Some(actual)) if expected == actual => {}
                (Precondition::Version(expected), actual) => {
                    return Err(conflict(
                        write.collection,
                        &write.id,
                        expected,
                        actual.unwrap_or(0),
                    ));
                }
            }

            let next = current.unwrap_or(0) + 1;
            staged.insert(key, next);
            versions.push(next);
        }

        for (write, version) in writes.into_iter().zip(versions.iter()) {
            storage.insert(
                Self::make_key(write.collection, &write.id),
                StoredModel {
                    bytes: write.bytes,
                    version: *version,
                },
            );
        }

        Ok(versions)
    }
}
