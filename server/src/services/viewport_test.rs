use super::*;
use crate::state::test_helpers::{seed_view, test_app_state};

const VALID_BODY: &[u8] = br#"{"location":{"latitude":"45.0","longitude":"-93.5"},"zoom":"10"}"#;

#[tokio::test]
async fn publish_stores_parsed_view() {
    let state = test_app_state();
    let id = UserId::from("abc123");

    let view = publish(&state, id.clone(), BodyEncoding::Json, VALID_BODY).await.expect("publish");
    assert_eq!(view, MapView::new(45.0, -93.5, Some(10)));
    assert_eq!(state.views.get(&id).await, Some(view));
}

#[tokio::test]
async fn publish_overwrites_previous_view() {
    let state = test_app_state();
    let id = UserId::from("abc123");
    seed_view(&state, "abc123", MapView::new(1.0, 2.0, Some(3))).await;

    let body = br#"{"location":{"latitude":"10","longitude":"20"},"zoom":null}"#;
    publish(&state, id.clone(), BodyEncoding::Json, body).await.expect("publish");

    assert_eq!(fetch(&state, &id).await.expect("fetch"), MapView::new(10.0, 20.0, None));
}

#[tokio::test]
async fn rejected_publish_leaves_store_unchanged() {
    let state = test_app_state();
    let id = UserId::from("abc123");
    let previous = MapView::new(1.0, 2.0, Some(3));
    seed_view(&state, "abc123", previous).await;

    let body = br#"{"location":{"latitude":"bad","longitude":"-93.5"},"zoom":null}"#;
    let err = publish(&state, id.clone(), BodyEncoding::Json, body).await.expect_err("should reject");

    assert!(matches!(err, ViewportError::Invalid(ValidationError::InvalidLatitude)));
    assert_eq!(state.views.get(&id).await, Some(previous));
}

#[tokio::test]
async fn rejected_first_publish_creates_no_entry() {
    let state = test_app_state();
    let id = UserId::from("fresh");

    let err = publish(&state, id.clone(), BodyEncoding::Json, b"{}").await.expect_err("should reject");
    assert!(matches!(err, ViewportError::Invalid(ValidationError::MissingLocation)));
    assert!(matches!(fetch(&state, &id).await, Err(ViewportError::NotFound(_))));
}

#[tokio::test]
async fn fetch_unknown_id_is_not_found() {
    let state = test_app_state();
    let err = fetch(&state, &UserId::from("neverwritten")).await.expect_err("not found");
    match err {
        ViewportError::NotFound(id) => assert_eq!(id.as_str(), "neverwritten"),
        ViewportError::Invalid(e) => panic!("unexpected validation error: {e}"),
    }
}

#[tokio::test]
async fn publishes_are_isolated_per_id() {
    let state = test_app_state();
    publish(&state, UserId::from("a"), BodyEncoding::Json, VALID_BODY).await.expect("publish");

    assert!(fetch(&state, &UserId::from("a")).await.is_ok());
    assert!(fetch(&state, &UserId::from("b")).await.is_err());
}

#[tokio::test]
async fn publish_accepts_form_bodies() {
    let state = test_app_state();
    let id = UserId::from("abc123");
    let body = b"location%5Blatitude%5D=45.0&location%5Blongitude%5D=-93.5&zoom=10";

    let view = publish(&state, id.clone(), BodyEncoding::Form, body).await.expect("publish");
    assert_eq!(view, MapView::new(45.0, -93.5, Some(10)));
    assert_eq!(fetch(&state, &id).await.expect("fetch"), view);
}

fn assert_send<T: Send>(_: &T) {}

#[test]
fn publish_future_is_send() {
    let state = test_app_state();
    let future = publish(&state, UserId::from("abc123"), BodyEncoding::Json, VALID_BODY);
    assert_send(&future);
}
