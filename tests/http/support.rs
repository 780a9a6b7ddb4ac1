//! Test server wiring: in-memory collections, cheap password hashing, and a
//! swappable catalog feed.

use std::sync::Arc;

use ranked_films::auth::{Accounts, Manager, Passwords, TokenIssuer, DEFAULT_TOKEN_TTL};
use ranked_films::http::{self, AppState};
use ranked_films::{
    CatalogFeed, FeedError, Film, InMemoryCollection, RankedStore, SharedCollection, StaticFeed,
};
use serde_json::{json, Value};

pub const EMAIL: &str = "ops@example.com";
pub const PASSWORD: &str = "correct horse";

pub struct DownFeed;

impl CatalogFeed for DownFeed {
    fn fetch(&self) -> Result<Vec<Film>, FeedError> {
        Err(FeedError::Request("connection refused".into()))
    }
}

pub fn state_with_feed(feed: Arc<dyn CatalogFeed>) -> Arc<AppState> {
    let films: SharedCollection<Film> = Arc::new(InMemoryCollection::<Film>::new());
    let managers: SharedCollection<Manager> = Arc::new(InMemoryCollection::<Manager>::new());
    let tokens = TokenIssuer::new("integration-secret", DEFAULT_TOKEN_TTL).unwrap();
    let accounts = Accounts::new(managers, tokens)
        .with_passwords(Passwords::with_params(1024, 1, 1).unwrap());

    Arc::new(AppState::new(RankedStore::new(films), accounts, feed))
}

pub fn test_state() -> Arc<AppState> {
    state_with_feed(Arc::new(StaticFeed::default()))
}

/// Bind to port 0 and return the base URL.
pub async fn start_server(state: Arc<AppState>) -> String {
    let app = http::router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Register a manager over HTTP and log it in. Returns the bearer token.
pub async fn login(base: &str, client: &reqwest::Client, email: &str) -> String {
    let resp = client
        .post(format!("{base}/auth/register"))
        .json(&json!({ "email": email, "password": PASSWORD }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let resp = client
        .post(format!("{base}/auth/login"))
        .json(&json!({ "email": email, "password": PASSWORD }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    body["token"].as_str().unwrap().to_string()
}

/// Start a server and return its URL, a client, the state, and a super
/// manager's token.
pub async fn super_session() -> (String, reqwest::Client, Arc<AppState>, String) {
    let state = test_state();
    let base = start_server(state.clone()).await;
    let client = reqwest::Client::new();
    let token = login(&base, &client, EMAIL).await;

    let promote_state = state.clone();
    tokio::task::spawn_blocking(move || promote_state.accounts.promote(EMAIL).unwrap())
        .await
        .unwrap();

    (base, client, state, token)
}

pub fn film_body(title: &str, position: i64) -> Value {
    json!({
        "title": title,
        "rating": "8.6",
        "year": 1957,
        "budget": 350000,
        "gross": 1000000,
        "poster": format!("https://example.com/{title}.jpg"),
        "position": position
    })
}
