//! InMemoryCollection - Vec-backed collection store for testing and development.

use std::sync::{Arc, RwLock};

use super::{CollectionStore, StoreError};

/// In-memory collection store.
///
/// Clone-friendly via Arc: clones share the same storage.
#[derive(Clone)]
pub struct InMemoryCollection<T> {
    storage: Arc<RwLock<Vec<T>>>,
}

impl<T> Default for InMemoryCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> InMemoryCollection<T> {
    /// Create a new empty collection.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Create a collection seeded with `items` in the given storage order.
    pub fn with_items(items: Vec<T>) -> Self {
        Self {
            storage: Arc::new(RwLock::new(items)),
        }
    }
}

impl<T> CollectionStore<T> for InMemoryCollection<T>
where
    T: Clone + Send + Sync,
{
    fn load(&self) -> Result<Vec<T>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned("load"))?;
        Ok(storage.clone())
    }

    fn save(&self, items: &[T]) -> Result<(), StoreError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::LockPoisoned("save"))?;
        *storage = items.to_vec();
        Ok(())
    }
}
