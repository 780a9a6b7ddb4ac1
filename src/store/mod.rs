//! Collection stores with whole-collection persistence behind a trait.
//!
//! A collection is loaded in full and saved in full. Implementations must never
//! leave a partially written collection behind: `save` either replaces the
//! stored collection or fails.
//!
//! ## Example
//!
//! ```ignore
//! use ranked_films::{CollectionStore, InMemoryCollection, JsonFileCollection};
//!
//! let films = JsonFileCollection::<Film>::new("top250.json");
//! let mut all = films.load()?;
//! all.retain(|f| f.year >= 1950);
//! films.save(&all)?;
//! ```

mod in_memory;
mod json_file;

use std::sync::Arc;

pub use in_memory::InMemoryCollection;
pub use json_file::JsonFileCollection;

/// Errors from a collection store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("collection I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("collection serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("collection lock poisoned during {0}")]
    LockPoisoned(&'static str),
    #[error("collection store unavailable: {0}")]
    Unavailable(String),
}

/// Load/save persistence for an ordered collection of `T`.
pub trait CollectionStore<T>: Send + Sync {
    /// Load the whole collection in storage order. A collection that was never
    /// saved loads as empty.
    fn load(&self) -> Result<Vec<T>, StoreError>;

    /// Replace the whole collection.
    fn save(&self, items: &[T]) -> Result<(), StoreError>;
}

impl<T, S> CollectionStore<T> for Arc<S>
where
    S: CollectionStore<T> + ?Sized,
{
    fn load(&self) -> Result<Vec<T>, StoreError> {
        (**self).load()
    }

    fn save(&self, items: &[T]) -> Result<(), StoreError> {
        (**self).save(items)
    }
}

/// A store shared behind a trait object.
pub type SharedCollection<T> = Arc<dyn CollectionStore<T>>;
