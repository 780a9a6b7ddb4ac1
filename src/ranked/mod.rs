//! RankedStore: CRUD over a densely ranked film collection.
//!
//! Every call runs one load → validate → mutate → sort → save cycle against
//! the injected [`CollectionStore`]; nothing is cached between calls. Writes
//! hold the collection lock exclusively from load to save, reads hold it
//! shared, so two writers never interleave and a reader never sees a
//! half-applied write.
//!
//! After every successful mutation the positions are exactly `1..=N`:
//! inserts make room at the resolved slot, moves take the film out of the
//! order before placing it again, and deletes close the gap they leave.
//!
//! ## Example
//!
//! ```ignore
//! use ranked_films::{FilmDraft, InMemoryCollection, RankedStore};
//!
//! let films = RankedStore::new(InMemoryCollection::new());
//! let stored = films.insert(&draft)?;
//! films.delete(stored.id)?;
//! ```

mod id;

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::catalog::CatalogFeed;
use crate::error::FilmError;
use crate::film::{Film, FilmDraft, FilmPatch};
use crate::lock::{CollectionLock, ExclusiveGuard, InMemoryCollectionLock, SharedGuard};
use crate::ranking::{
    close_gap, is_contiguous, make_room, resolve_position, sort_by_position, sorted_positions,
};
use crate::store::CollectionStore;

pub use id::{fresh_id, ClockIdSource, IdSource, MAX_ID_ATTEMPTS};

pub struct RankedStore<S> {
    store: S,
    lock: Arc<dyn CollectionLock>,
    ids: Arc<dyn IdSource>,
}

impl<S: CollectionStore<Film>> RankedStore<S> {
    /// Wrap `store` with an in-memory collection lock and clock-based identifiers.
    pub fn new(store: S) -> Self {
        RankedStore {
            store,
            lock: Arc::new(InMemoryCollectionLock::new()),
            ids: Arc::new(ClockIdSource),
        }
    }

    /// Use a different collection lock (e.g. one shared with another process).
    pub fn with_lock(mut self, lock: Arc<dyn CollectionLock>) -> Self {
        self.lock = lock;
        self
    }

    pub fn with_id_source(mut self, ids: Arc<dyn IdSource>) -> Self {
        self.ids = ids;
        self
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// All films, ranked.
    pub fn list_all(&self) -> Result<Vec<Film>, FilmError> {
        let _guard = SharedGuard::acquire(self.lock.as_ref())?;
        let mut films = self.store.load()?;
        sort_by_position(&mut films);
        debug!(count = films.len(), "listed films");
        Ok(films)
    }

    pub fn get_by_id(&self, id: i64) -> Result<Film, FilmError> {
        let _guard = SharedGuard::acquire(self.lock.as_ref())?;
        self.store
            .load()?
            .into_iter()
            .find(|f| f.id == id)
            .ok_or(FilmError::NotFound(id))
    }

    /// Validate `draft`, rank it at the tightest legal slot for its desired
    /// position, and persist it. The returned film carries the resolved position.
    pub fn insert(&self, draft: &FilmDraft) -> Result<Film, FilmError> {
        let new_film = draft.validate()?;

        let _guard = ExclusiveGuard::acquire(self.lock.as_ref())?;
        let mut films = self.store.load()?;
        sort_by_position(&mut films);

        let desired = new_film.desired_position;
        let position = resolve_position(&sorted_positions(&films), desired);
        debug!(desired, resolved = position, "resolved insert position");

        let id = fresh_id(self.ids.as_ref(), |candidate| {
            films.iter().any(|f| f.id == candidate)
        })
        .map_err(|attempts| FilmError::IdentifierCollision { attempts })?;

        make_room(&mut films, position);
        let film = Film::from_new(id, new_film, position);
        films.push(film.clone());
        sort_by_position(&mut films);

        self.store.save(&films)?;
        info!(id, position, title = %film.title, "film inserted");
        Ok(film)
    }

    /// Apply `patch` to the film it names.
    ///
    /// Fields other than `position` are copied verbatim. A changed position is
    /// resolved against the other films, exactly like an insert.
    pub fn update(&self, patch: &FilmPatch) -> Result<Film, FilmError> {
        patch.validate()?;

        let _guard = ExclusiveGuard::acquire(self.lock.as_ref())?;
        let mut films = self.store.load()?;
        sort_by_position(&mut films);

        let index = films
            .iter()
            .position(|f| f.id == patch.id)
            .ok_or(FilmError::NotFound(patch.id))?;
        let mut film = films.remove(index);
        patch.apply_fields(&mut film);

        if let Some(desired) = patch.position.filter(|p| *p != film.position) {
            let previous = film.position;
            close_gap(&mut films, previous);
            let position = resolve_position(&sorted_positions(&films), desired);
            make_room(&mut films, position);
            film.position = position;
            debug!(id = film.id, previous, desired, resolved = position, "film moved");
        }

        films.push(film.clone());
        sort_by_position(&mut films);

        self.store.save(&films)?;
        info!(id = film.id, position = film.position, "film updated");
        Ok(film)
    }

    /// Remove a film and pull every lower-ranked film up one slot.
    /// Returns the removed film.
    pub fn delete(&self, id: i64) -> Result<Film, FilmError> {
        let _guard = ExclusiveGuard::acquire(self.lock.as_ref())?;
        let mut films = self.store.load()?;

        let index = films
            .iter()
            .position(|f| f.id == id)
            .ok_or(FilmError::NotFound(id))?;
        let removed = films.remove(index);
        close_gap(&mut films, removed.position);
        sort_by_position(&mut films);

        self.store.save(&films)?;
        info!(id, position = removed.position, "film deleted");
        Ok(removed)
    }

    /// Overwrite the whole collection with the feed's ranking.
    ///
    /// The feed's positions are used as delivered. Returns the number of films
    /// written.
    pub fn refresh_from_external_catalog(&self, feed: &dyn CatalogFeed) -> Result<usize, FilmError> {
        let mut films = feed.fetch()?;
        sort_by_position(&mut films);
        if !is_contiguous(&films) {
            warn!(count = films.len(), "catalog feed delivered a non-contiguous ranking");
        }

        let _guard = ExclusiveGuard::acquire(self.lock.as_ref())?;
        self.store.save(&films)?;
        info!(count = films.len(), "collection replaced from catalog feed");
        Ok(films.len())
    }
}
