//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One Axum router serves the sync API (`/user`), the share and view pages,
//! the allow-listed site scripts and a health probe. API routes allow any
//! origin so pages served from another host can still poll.

pub mod pages;
pub mod site;
pub mod users;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(pages::share_page))
        .route("/view/{id}", get(pages::view_page))
        .route("/site/{file}", get(site::asset))
        .route("/user", get(users::create_user))
        .route("/user/{id}", get(users::get_user).put(users::put_user))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
