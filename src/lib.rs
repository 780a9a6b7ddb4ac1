pub mod auth;
pub mod catalog;
#[cfg(feature = "http")]
pub mod config;
mod error;
mod film;
#[cfg(feature = "http")]
pub mod http;
mod lock;
mod ranked;
pub mod ranking;
mod store;

pub use error::FilmError;
pub use film::{Film, FilmDraft, FilmPatch, NewFilm, ValidationError, MIN_POSITION, MIN_YEAR};
pub use lock::{CollectionLock, ExclusiveGuard, InMemoryCollectionLock, LockError, SharedGuard};
pub use ranked::{fresh_id, ClockIdSource, IdSource, RankedStore, MAX_ID_ATTEMPTS};
pub use store::{CollectionStore, InMemoryCollection, JsonFileCollection, SharedCollection, StoreError};

pub use catalog::{CatalogFeed, FeedError, StaticFeed};
