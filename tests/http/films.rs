use serde_json::{json, Value};

use super::support::{film_body, super_session};

async fn create(base: &str, client: &reqwest::Client, token: &str, title: &str, position: i64) -> Value {
    let resp = client
        .post(format!("{base}/films"))
        .bearer_auth(token)
        .json(&film_body(title, position))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    resp.json().await.unwrap()
}

async fn ranked_titles(base: &str, client: &reqwest::Client, token: &str) -> Vec<String> {
    let resp = client
        .get(format!("{base}/films"))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let films: Vec<Value> = resp.json().await.unwrap();
    films
        .iter()
        .enumerate()
        .map(|(i, f)| {
            assert_eq!(f["position"], (i + 1) as i64);
            f["title"].as_str().unwrap().to_string()
        })
        .collect()
}

#[tokio::test]
async fn create_returns_resolved_position() {
    let (base, client, _state, token) = super_session().await;

    let first = create(&base, &client, &token, "first", 7).await;
    assert_eq!(first["position"], 1);
    assert!(first["id"].is_i64());

    create(&base, &client, &token, "top", 1).await;
    assert_eq!(ranked_titles(&base, &client, &token).await, vec!["top", "first"]);
}

#[tokio::test]
async fn create_validation_errors_are_400() {
    let (base, client, _state, token) = super_session().await;

    let mut body = film_body("too-early", 1);
    body["year"] = json!(1894);
    let resp = client
        .post(format!("{base}/films"))
        .bearer_auth(&token)
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let err: Value = resp.json().await.unwrap();
    assert!(err["error"].as_str().unwrap().contains("year"));

    let resp = client
        .post(format!("{base}/films"))
        .bearer_auth(&token)
        .json(&json!({ "title": "bare" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn read_by_path_and_by_body() {
    let (base, client, _state, token) = super_session().await;
    let film = create(&base, &client, &token, "solaris", 1).await;
    let id = film["id"].as_i64().unwrap();

    let resp = client
        .get(format!("{base}/films/{id}"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, film);

    let resp = client
        .get(format!("{base}/films/read"))
        .bearer_auth(&token)
        .json(&json!({ "id": id }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["title"], "solaris");
}

#[tokio::test]
async fn read_errors() {
    let (base, client, _state, token) = super_session().await;

    let resp = client
        .get(format!("{base}/films/read"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let resp = client
        .get(format!("{base}/films/abc"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let resp = client
        .get(format!("{base}/films/424242"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn update_moves_and_patches() {
    let (base, client, _state, token) = super_session().await;
    let a = create(&base, &client, &token, "a", 1).await;
    create(&base, &client, &token, "b", 2).await;
    create(&base, &client, &token, "c", 3).await;

    let resp = client
        .post(format!("{base}/films/update"))
        .bearer_auth(&token)
        .json(&json!({ "id": a["id"], "position": 3, "rating": "9.0" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let updated: Value = resp.json().await.unwrap();
    assert_eq!(updated["position"], 3);
    assert_eq!(updated["rating"], "9.0");
    assert_eq!(updated["year"], a["year"]);

    assert_eq!(ranked_titles(&base, &client, &token).await, vec!["b", "c", "a"]);
}

#[tokio::test]
async fn update_errors() {
    let (base, client, _state, token) = super_session().await;

    let resp = client
        .post(format!("{base}/films/update"))
        .bearer_auth(&token)
        .json(&json!({ "title": "no id" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let resp = client
        .post(format!("{base}/films/update"))
        .bearer_auth(&token)
        .json(&json!({ "id": 99, "title": "ghost" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn delete_compacts_ranking() {
    let (base, client, _state, token) = super_session().await;
    create(&base, &client, &token, "a", 1).await;
    let b = create(&base, &client, &token, "b", 2).await;
    create(&base, &client, &token, "c", 3).await;

    let resp = client
        .post(format!("{base}/films/delete"))
        .bearer_auth(&token)
        .json(&json!({ "id": b["id"] }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let text = resp.text().await.unwrap();
    assert!(text.contains("deleted"));

    assert_eq!(ranked_titles(&base, &client, &token).await, vec!["a", "c"]);

    let resp = client
        .post(format!("{base}/films/delete"))
        .bearer_auth(&token)
        .json(&json!({ "id": b["id"] }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}
