//! HTTP transport for the ranked film catalog.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `GET /films`: ranked list (read)
//! - `GET /films/:id`, `GET /films/read` with `{ "id" }`: one film (read)
//! - `POST /films`: insert at a desired position (write)
//! - `POST /films/update`, `POST /films/delete`: by `{ "id" }` (write)
//! - `POST /auth/register`, `POST /auth/login`: no token needed
//! - `GET /refresh-catalog`: replace the collection from the feed (read)
//! - `GET /health`
//!
//! ## Example
//!
//! ```ignore
//! let state = Arc::new(AppState::new(films, accounts, feed));
//!
//! // Compose with other axum routes
//! let app = ranked_films::http::router(state.clone());
//!
//! // Or serve directly
//! ranked_films::http::serve(state, "0.0.0.0:3000").await?;
//! ```

mod error;
mod handlers;
mod state;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use state::AppState;

/// Build the axum `Router` for the catalog.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/films",
            get(handlers::list_films).post(handlers::create_film),
        )
        .route("/films/read", get(handlers::read_film))
        .route("/films/update", post(handlers::update_film))
        .route("/films/delete", post(handlers::delete_film))
        .route("/films/:id", get(handlers::get_film))
        .route("/auth/register", post(handlers::register))
        .route("/auth/login", post(handlers::login))
        .route("/refresh-catalog", get(handlers::refresh_catalog))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the catalog at `addr` (e.g. `"0.0.0.0:3000"`) until Ctrl-C.
pub async fn serve(state: Arc<AppState>, addr: &str) -> Result<(), std::io::Error> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for shutdown signal");
                std::future::pending::<()>().await;
            }
        })
        .await
}
