use ranked_films::auth::AccessGuard;
use serde_json::{json, Value};

use super::support::{login, start_server, test_state, EMAIL, PASSWORD};

#[tokio::test]
async fn health_check() {
    let base = start_server(test_state()).await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn register_rejects_duplicates_and_missing_fields() {
    let base = start_server(test_state()).await;
    let client = reqwest::Client::new();
    login(&base, &client, EMAIL).await;

    let resp = client
        .post(format!("{base}/auth/register"))
        .json(&json!({ "email": EMAIL, "password": "again" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let resp = client
        .post(format!("{base}/auth/register"))
        .json(&json!({ "email": "x@example.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "email and password are required");
}

#[tokio::test]
async fn login_failures() {
    let base = start_server(test_state()).await;
    let client = reqwest::Client::new();
    login(&base, &client, EMAIL).await;

    let resp = client
        .post(format!("{base}/auth/login"))
        .json(&json!({ "email": "nobody@example.com", "password": PASSWORD }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let resp = client
        .post(format!("{base}/auth/login"))
        .json(&json!({ "email": EMAIL, "password": "wrong" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn issued_token_names_the_manager() {
    let state = test_state();
    let base = start_server(state.clone()).await;
    let client = reqwest::Client::new();
    let token = login(&base, &client, EMAIL).await;

    let principal = tokio::task::spawn_blocking(move || {
        state
            .accounts
            .resolve(Some(&format!("Bearer {token}")))
            .unwrap()
    })
    .await
    .unwrap();
    assert_eq!(principal.email, EMAIL);
}

#[tokio::test]
async fn missing_token_returns_401() {
    let base = start_server(test_state()).await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/films")).send().await.unwrap();
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn invalid_token_returns_403() {
    let base = start_server(test_state()).await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/films"))
        .bearer_auth("not-a-token")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);
}

#[tokio::test]
async fn regular_manager_is_forbidden() {
    let base = start_server(test_state()).await;
    let client = reqwest::Client::new();
    let token = login(&base, &client, EMAIL).await;

    let resp = client
        .get(format!("{base}/films"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);

    let resp = client
        .post(format!("{base}/films"))
        .bearer_auth(&token)
        .json(&super::support::film_body("x", 1))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);
}
