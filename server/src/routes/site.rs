//! Static site scripts.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use crate::services::assets::AssetError;
use crate::state::AppState;

const SCRIPT_CONTENT_TYPE: &str = "text/javascript; charset=utf-8";

/// `GET /site/:file`: serve an allow-listed script by exact name, else 404.
pub async fn asset(State(state): State<AppState>, Path(file): Path<String>) -> Response {
    match state.assets.read(&file).await {
        Ok(bytes) => ([(CONTENT_TYPE, SCRIPT_CONTENT_TYPE)], bytes).into_response(),
        Err(AssetError::NotAllowed(_)) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            warn!(error = %e, "site asset unavailable");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

#[cfg(test)]
#[path = "site_test.rs"]
mod tests;
