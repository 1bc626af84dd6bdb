use super::*;
use crate::state::test_helpers::test_app_state;
use reqwest::StatusCode as HttpStatus;
use serde_json::{Value, json};

/// Serve the full router on an ephemeral port and return its base URL.
async fn spawn_app(state: AppState) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app(state)).await.expect("serve");
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn put_then_get_round_trips_through_router() {
    let base = spawn_app(test_app_state()).await;
    let client = reqwest::Client::new();

    let put = client
        .put(format!("{base}/user/abc123"))
        .json(&json!({ "location": { "latitude": "45.0", "longitude": "-93.5" }, "zoom": "10" }))
        .send()
        .await
        .expect("put");
    assert_eq!(put.status(), HttpStatus::OK);
    assert!(put.text().await.expect("body").is_empty());

    let get = client.get(format!("{base}/user/abc123")).send().await.expect("get");
    assert_eq!(get.status(), HttpStatus::OK);
    let body: Value = get.json().await.expect("json");
    assert_eq!(body, json!({ "location": { "latitude": 45.0, "longitude": -93.5 }, "zoom": 10 }));
}

#[tokio::test]
async fn rejected_put_answers_405_and_stores_nothing() {
    let base = spawn_app(test_app_state()).await;
    let client = reqwest::Client::new();

    let put = client
        .put(format!("{base}/user/abc123"))
        .json(&json!({ "location": { "latitude": "bad", "longitude": "-93.5" }, "zoom": null }))
        .send()
        .await
        .expect("put");
    assert_eq!(put.status(), HttpStatus::METHOD_NOT_ALLOWED);

    let get = client.get(format!("{base}/user/abc123")).send().await.expect("get");
    assert_eq!(get.status(), HttpStatus::NOT_FOUND);
    assert!(get.text().await.expect("body").is_empty());
}

#[tokio::test]
async fn unknown_id_is_404() {
    let base = spawn_app(test_app_state()).await;
    let get = reqwest::get(format!("{base}/user/neverwritten")).await.expect("get");
    assert_eq!(get.status(), HttpStatus::NOT_FOUND);
}

#[tokio::test]
async fn form_post_is_accepted_through_router() {
    let base = spawn_app(test_app_state()).await;
    let client = reqwest::Client::new();

    let put = client
        .put(format!("{base}/user/formuser"))
        .header(reqwest::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body("location%5Blatitude%5D=45.0&location%5Blongitude%5D=-93.5")
        .send()
        .await
        .expect("put");
    assert_eq!(put.status(), HttpStatus::OK);

    let body: Value = client
        .get(format!("{base}/user/formuser"))
        .send()
        .await
        .expect("get")
        .json()
        .await
        .expect("json");
    assert_eq!(body, json!({ "location": { "latitude": 45.0, "longitude": -93.5 }, "zoom": null }));
}

#[tokio::test]
async fn create_user_healthz_and_unlisted_asset() {
    let base = spawn_app(test_app_state()).await;

    let user: Value = reqwest::get(format!("{base}/user")).await.expect("get").json().await.expect("json");
    assert!(user["id"].as_str().is_some_and(|id| !id.is_empty()));

    let health = reqwest::get(format!("{base}/healthz")).await.expect("get");
    assert_eq!(health.status(), HttpStatus::OK);

    let asset = reqwest::get(format!("{base}/site/config.json")).await.expect("get");
    assert_eq!(asset.status(), HttpStatus::NOT_FOUND);
}
