//! Sync API: create-session, fetch and publish.
//!
//! Publishing takes stringified numbers, as JSON or as a form post chosen by
//! `Content-Type`, and answers with an empty body;
//! fetching returns native numbers. Rejected publishes answer 405, which is
//! what existing browser clients check for.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::Json;
use location::{BodyEncoding, MapView, User, UserId};

use crate::services::user;
use crate::services::viewport::{self, ViewportError};
use crate::state::AppState;

/// `GET /user`: issue a fresh identifier. Nothing is stored until the first publish.
pub async fn create_user() -> Json<User> {
    Json(user::create_user())
}

/// `GET /user/:id`: latest published view, or 404.
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<MapView>, StatusCode> {
    viewport::fetch(&state, &id)
        .await
        .map(Json)
        .map_err(viewport_error_to_status)
}

/// `PUT /user/:id`: validate and store a view. 200 on success, 405 on rejection.
pub async fn put_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let content_type = headers.get(CONTENT_TYPE).and_then(|value| value.to_str().ok());
    let encoding = BodyEncoding::from_content_type(content_type);
    match viewport::publish(&state, id, encoding, &body).await {
        Ok(_) => StatusCode::OK,
        Err(e) => viewport_error_to_status(e),
    }
}

pub(crate) fn viewport_error_to_status(err: ViewportError) -> StatusCode {
    match err {
        ViewportError::NotFound(_) => StatusCode::NOT_FOUND,
        ViewportError::Invalid(_) => StatusCode::METHOD_NOT_ALLOWED,
    }
}

#[cfg(test)]
#[path = "users_test.rs"]
mod tests;
