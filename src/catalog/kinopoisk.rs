//! Kinopoisk top-250 feed.
//!
//! Requires the `http` feature. Uses the blocking reqwest client, so call
//! [`CatalogFeed::fetch`] from a blocking context (e.g. `spawn_blocking`).

use std::time::Duration;

use serde::Deserialize;

use super::{CatalogFeed, FeedError};
use crate::film::Film;

/// Top 250 by rank, restricted to entries with a known budget and world gross.
pub const DEFAULT_CATALOG_URL: &str = "https://api.kinopoisk.dev/v1.4/movie?page=1&limit=250\
&selectFields=id&selectFields=name&selectFields=rating&selectFields=year\
&selectFields=budget&selectFields=fees&selectFields=poster&selectFields=top250\
&notNullFields=top250&notNullFields=budget.value&notNullFields=fees.world.value\
&sortField=top250&sortType=1&lists=top250";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct KinopoiskFeed {
    url: String,
    api_key: Option<String>,
}

impl KinopoiskFeed {
    pub fn new(url: impl Into<String>, api_key: Option<String>) -> Self {
        KinopoiskFeed {
            url: url.into(),
            api_key,
        }
    }
}

impl CatalogFeed for KinopoiskFeed {
    fn fetch(&self) -> Result<Vec<Film>, FeedError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(FeedError::NotConfigured("api key"))?;

        // Built per call: a blocking client must not be created or dropped on an async worker.
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| FeedError::Request(e.to_string()))?;

        let response = client
            .get(&self.url)
            .header("accept", "application/json")
            .header("X-API-KEY", api_key)
            .send()
            .map_err(|e| FeedError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }

        let page: MoviePage = response
            .json()
            .map_err(|e| FeedError::Decode(e.to_string()))?;
        tracing::debug!(entries = page.docs.len(), "catalog page fetched");

        page.docs.into_iter().map(Movie::into_film).collect()
    }
}

#[derive(Debug, Deserialize)]
struct MoviePage {
    #[serde(default)]
    docs: Vec<Movie>,
}

#[derive(Debug, Deserialize)]
struct Movie {
    id: i64,
    name: Option<String>,
    rating: Option<Rating>,
    year: Option<i64>,
    budget: Option<Money>,
    fees: Option<Fees>,
    poster: Option<Poster>,
    top250: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct Rating {
    kp: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Money {
    value: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Fees {
    world: Option<Money>,
}

#[derive(Debug, Deserialize)]
struct Poster {
    url: Option<String>,
}

impl Movie {
    fn into_film(self) -> Result<Film, FeedError> {
        let id = self.id;
        let missing = |field| FeedError::Incomplete { id, field };

        let kp = self.rating.and_then(|r| r.kp).ok_or_else(|| missing("rating.kp"))?;
        let budget = self
            .budget
            .and_then(|m| m.value)
            .ok_or_else(|| missing("budget.value"))?;
        let gross = self
            .fees
            .and_then(|f| f.world)
            .and_then(|m| m.value)
            .ok_or_else(|| missing("fees.world.value"))?;

        Ok(Film {
            id,
            title: self.name.ok_or_else(|| missing("name"))?,
            rating: format!("{:.1}", kp),
            year: self.year.ok_or_else(|| missing("year"))?,
            budget: budget.round() as i64,
            gross: gross.round() as i64,
            poster: self
                .poster
                .and_then(|p| p.url)
                .ok_or_else(|| missing("poster.url"))?,
            position: self.top250.ok_or_else(|| missing("top250"))?,
        })
    }
}
