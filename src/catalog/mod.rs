//! External catalog feeds: sources of a complete, already-ranked film list.
//!
//! A feed is used only to replace the whole collection
//! (`RankedStore::refresh_from_external_catalog`). Its positions are trusted as
//! delivered.

#[cfg(feature = "http")]
mod kinopoisk;

#[cfg(feature = "http")]
pub use kinopoisk::{KinopoiskFeed, DEFAULT_CATALOG_URL};

use crate::film::Film;

/// Errors from an external catalog feed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedError {
    #[error("feed is not configured: missing {0}")]
    NotConfigured(&'static str),
    #[error("feed request failed: {0}")]
    Request(String),
    #[error("feed responded with status {0}")]
    Status(u16),
    #[error("feed response could not be decoded: {0}")]
    Decode(String),
    #[error("feed entry {id} is missing {field}")]
    Incomplete { id: i64, field: &'static str },
}

pub trait CatalogFeed: Send + Sync {
    /// Fetch the full ranked list.
    fn fetch(&self) -> Result<Vec<Film>, FeedError>;
}

/// A feed that always returns the same list.
#[derive(Debug, Clone, Default)]
pub struct StaticFeed {
    films: Vec<Film>,
}

impl StaticFeed {
    pub fn new(films: Vec<Film>) -> Self {
        StaticFeed { films }
    }
}

impl CatalogFeed for StaticFeed {
    fn fetch(&self) -> Result<Vec<Film>, FeedError> {
        Ok(self.films.clone())
    }
}
