//! Films: the ranked entity, its insert candidate, and its partial update.
//!
//! ## Example
//!
//! ```ignore
//! use ranked_films::{FilmDraft, FilmPatch};
//!
//! let draft: FilmDraft = serde_json::from_value(json!({
//!     "title": "Stalker", "rating": "8.1", "year": 1979,
//!     "budget": 1000000, "gross": 4300000,
//!     "poster": "https://example.com/stalker.jpg", "position": 3
//! }))?;
//! let new_film = draft.validate()?;
//!
//! let patch = FilmPatch { id: 42, rating: Some("8.2".into()), ..Default::default() };
//! ```

mod validation;

use serde::{Deserialize, Serialize};

pub use validation::{ValidationError, MIN_POSITION, MIN_YEAR};

/// A ranked film as persisted in the collection.
///
/// Field names are the on-disk layout; do not rename them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Film {
    pub id: i64,
    pub title: String,
    pub rating: String,
    pub year: i64,
    pub budget: i64,
    pub gross: i64,
    pub poster: String,
    pub position: i64,
}

impl Film {
    /// Build a stored film from validated fields, an identifier, and a resolved position.
    pub fn from_new(id: i64, new_film: NewFilm, position: i64) -> Self {
        Film {
            id,
            title: new_film.title,
            rating: new_film.rating,
            year: new_film.year,
            budget: new_film.budget,
            gross: new_film.gross,
            poster: new_film.poster,
            position,
        }
    }
}

/// Insert candidate as received from a caller. Every field is optional on the
/// wire so that a missing field becomes a field-level validation error rather
/// than a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilmDraft {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub year: Option<i64>,
    #[serde(default)]
    pub budget: Option<i64>,
    #[serde(default)]
    pub gross: Option<i64>,
    #[serde(default)]
    pub poster: Option<String>,
    /// Desired rank. The stored rank may differ after reconciliation.
    #[serde(default)]
    pub position: Option<i64>,
}

/// A validated insert candidate. Produced only by [`FilmDraft::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFilm {
    pub title: String,
    pub rating: String,
    pub year: i64,
    pub budget: i64,
    pub gross: i64,
    pub poster: String,
    pub desired_position: i64,
}

/// Partial update. Omitted fields keep their stored values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilmPatch {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gross: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
}

impl FilmPatch {
    pub fn new(id: i64) -> Self {
        FilmPatch {
            id,
            ..Default::default()
        }
    }

    /// Copy every present field except `position` onto `film`.
    pub fn apply_fields(&self, film: &mut Film) {
        if let Some(title) = &self.title {
            film.title = title.clone();
        }
        if let Some(rating) = &self.rating {
            film.rating = rating.clone();
        }
        if let Some(year) = self.year {
            film.year = year;
        }
        if let Some(budget) = self.budget {
            film.budget = budget;
        }
        if let Some(gross) = self.gross {
            film.gross = gross;
        }
        if let Some(poster) = &self.poster {
            film.poster = poster.clone();
        }
    }
}
