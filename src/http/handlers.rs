//! Route handlers.
//!
//! Store and account calls do blocking file I/O, so each handler moves its
//! work onto the blocking pool. Authorization happens first, inside that same
//! unit of work, and the resolved principal is passed on explicitly.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::error::ApiError;
use super::state::AppState;
use crate::auth::{AccessGuard, Capability, Principal};
use crate::film::{Film, FilmDraft, FilmPatch};

#[derive(Debug, Deserialize)]
struct IdRequest {
    #[serde(default)]
    id: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct Credentials {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

/// `GET /health`
pub(crate) async fn health() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

/// `GET /films`: every film, ranked.
pub(crate) async fn list_films(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Film>>, ApiError> {
    let authorization = authorization(&headers);
    let films = blocking(&state, move |state| {
        let principal = authorize(state, authorization, Capability::Read)?;
        debug!(principal = principal.id, "listing films");
        Ok(state.films.list_all()?)
    })
    .await?;
    Ok(Json(films))
}

/// `GET /films/:id`
pub(crate) async fn get_film(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Film>, ApiError> {
    let id = id
        .parse::<i64>()
        .map_err(|_| ApiError::BadRequest(format!("invalid film id: {}", id)))?;
    read_one(state, authorization(&headers), id).await
}

/// `GET /films/read` with a `{ "id": ... }` body.
pub(crate) async fn read_film(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Film>, ApiError> {
    let id = required_id(&body)?;
    read_one(state, authorization(&headers), id).await
}

async fn read_one(
    state: Arc<AppState>,
    authorization: Option<String>,
    id: i64,
) -> Result<Json<Film>, ApiError> {
    let film = blocking(&state, move |state| {
        let principal = authorize(state, authorization, Capability::Read)?;
        debug!(principal = principal.id, id, "reading film");
        Ok(state.films.get_by_id(id)?)
    })
    .await?;
    Ok(Json(film))
}

/// `POST /films`: insert at the desired position (resolved by the store).
pub(crate) async fn create_film(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let authorization = authorization(&headers);
    let draft: FilmDraft = decode(&body)?;
    let film = blocking(&state, move |state| {
        let principal = authorize(state, authorization, Capability::Write)?;
        debug!(principal = principal.id, "creating film");
        Ok(state.films.insert(&draft)?)
    })
    .await?;
    Ok((StatusCode::CREATED, Json(film)))
}

/// `POST /films/update` with `{ "id": ..., <fields> }`.
pub(crate) async fn update_film(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Film>, ApiError> {
    let authorization = authorization(&headers);
    required_id(&body)?;
    let patch: FilmPatch = decode(&body)?;
    let film = blocking(&state, move |state| {
        let principal = authorize(state, authorization, Capability::Write)?;
        debug!(principal = principal.id, id = patch.id, "updating film");
        Ok(state.films.update(&patch)?)
    })
    .await?;
    Ok(Json(film))
}

/// `POST /films/delete` with `{ "id": ... }`.
pub(crate) async fn delete_film(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<String, ApiError> {
    let authorization = authorization(&headers);
    let id = required_id(&body)?;
    blocking(&state, move |state| {
        let principal = authorize(state, authorization, Capability::Write)?;
        debug!(principal = principal.id, id, "deleting film");
        state.films.delete(id)?;
        Ok(())
    })
    .await?;
    Ok(format!("film {} deleted", id))
}

/// `POST /auth/register`
pub(crate) async fn register(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let credentials: Credentials = decode(&body)?;
    blocking(&state, move |state| {
        state.accounts.register(
            credentials.email.as_deref().unwrap_or_default(),
            credentials.password.as_deref().unwrap_or_default(),
        )?;
        Ok(())
    })
    .await?;
    Ok((StatusCode::CREATED, "manager registered"))
}

/// `POST /auth/login`: returns `{ "token": ... }`.
pub(crate) async fn login(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let credentials: Credentials = decode(&body)?;
    let token = blocking(&state, move |state| {
        Ok(state.accounts.login(
            credentials.email.as_deref().unwrap_or_default(),
            credentials.password.as_deref().unwrap_or_default(),
        )?)
    })
    .await?;
    Ok(Json(json!({ "token": token })))
}

/// `GET /refresh-catalog`: replace the collection from the external feed.
pub(crate) async fn refresh_catalog(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<String, ApiError> {
    let authorization = authorization(&headers);
    let count = blocking(&state, move |state| {
        let principal = authorize(state, authorization, Capability::Read)?;
        debug!(principal = principal.id, "refreshing catalog");
        Ok(state.films.refresh_from_external_catalog(state.feed.as_ref())?)
    })
    .await?;
    Ok(format!("catalog refreshed: {} films written", count))
}

fn authorization(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn authorize(
    state: &AppState,
    authorization: Option<String>,
    capability: Capability,
) -> Result<Principal, ApiError> {
    Ok(state
        .accounts
        .authorize(authorization.as_deref(), capability)?)
}

/// Decode a JSON body. An empty body decodes as `{}`.
fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    let body: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
        b"{}"
    } else {
        body
    };
    serde_json::from_slice(body).map_err(|e| ApiError::BadRequest(format!("invalid body: {}", e)))
}

fn required_id(body: &[u8]) -> Result<i64, ApiError> {
    decode::<IdRequest>(body)?
        .id
        .ok_or_else(|| ApiError::BadRequest("film id is required".into()))
}

async fn blocking<T, F>(state: &Arc<AppState>, work: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&AppState) -> Result<T, ApiError> + Send + 'static,
{
    let state = Arc::clone(state);
    tokio::task::spawn_blocking(move || work(state.as_ref()))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
}
