use std::sync::Arc;

use ranked_films::{Film, StaticFeed};
use serde_json::Value;

use super::support::{login, start_server, state_with_feed, DownFeed, EMAIL};

fn feed_film(id: i64, position: i64) -> Film {
    Film {
        id,
        title: format!("feed-{}", id),
        rating: "8.8".into(),
        year: 1994,
        budget: 25_000_000,
        gross: 28_000_000,
        poster: format!("https://example.com/{}.jpg", id),
        position,
    }
}

async fn session(state: Arc<ranked_films::http::AppState>) -> (String, reqwest::Client, String) {
    let base = start_server(state.clone()).await;
    let client = reqwest::Client::new();
    let token = login(&base, &client, EMAIL).await;
    tokio::task::spawn_blocking(move || state.accounts.promote(EMAIL).unwrap())
        .await
        .unwrap();
    (base, client, token)
}

#[tokio::test]
async fn refresh_replaces_collection() {
    let feed = StaticFeed::new(vec![feed_film(2, 2), feed_film(1, 1), feed_film(3, 3)]);
    let (base, client, token) = session(state_with_feed(Arc::new(feed))).await;

    let resp = client
        .get(format!("{base}/refresh-catalog"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp.text().await.unwrap().contains("3 films"));

    let resp = client
        .get(format!("{base}/films"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let films: Vec<Value> = resp.json().await.unwrap();
    let ids: Vec<i64> = films.iter().map(|f| f["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn upstream_failure_is_502() {
    let (base, client, token) = session(state_with_feed(Arc::new(DownFeed))).await;

    let resp = client
        .get(format!("{base}/refresh-catalog"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 502);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("catalog feed failed"));
}
