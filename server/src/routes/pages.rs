//! Server-rendered share and view pages.
//!
//! Both pages are one static HTML shell. The only per-request content is a
//! JSON boot block (`#coordshare-boot`) carrying the user id, mode, share
//! link and site config; `/site/client.js` reads it, fills in the page and
//! loads the map script. Nothing user-controlled is interpolated into HTML
//! or URLs on the server.

use axum::extract::{Path, State};
use axum::response::Html;
use location::{ShareLink, User, UserId};
use serde_json::{Value, json};

use crate::config::SiteConfig;
use crate::services::user;
use crate::state::AppState;

const BOOT_MARKER: &str = "__COORDSHARE_BOOT__";

const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>coordshare</title>
<style>html, body, #map { margin: 0; height: 100%; }</style>
<script id="coordshare-boot" type="application/json">__COORDSHARE_BOOT__</script>
<script src="/site/client.js" defer></script>
</head>
<body>
<p id="sharePanel" hidden>
  <button id="share" type="button">Copy share link</button>
  <span id="shareMessage" hidden>Link copied</span>
  <input id="shareUrl" type="text" readonly hidden>
</p>
<p id="viewPanel" hidden>Following <code id="viewId"></code></p>
<div id="map"></div>
</body>
</html>
"#;

/// `GET /`: share page for a freshly generated user.
pub async fn share_page(State(state): State<AppState>) -> Html<String> {
    let user = user::create_user();
    let share = ShareLink::for_user(&state.config.public_url, &user);
    Html(render_share_page(&user, &share, &state.config.site))
}

/// `GET /view/:id`: page that follows `id`'s published view.
pub async fn view_page(State(state): State<AppState>, Path(id): Path<UserId>) -> Html<String> {
    Html(render_view_page(&User { id }, &state.config.site))
}

pub(crate) fn render_share_page(user: &User, share: &ShareLink, site: &SiteConfig) -> String {
    render_page(&json!({ "mode": "share", "user": user, "share": share, "config": site }))
}

pub(crate) fn render_view_page(user: &User, site: &SiteConfig) -> String {
    render_page(&json!({ "mode": "view", "user": user, "config": site }))
}

fn render_page(boot: &Value) -> String {
    PAGE_HTML.replacen(BOOT_MARKER, &script_json(boot), 1)
}

/// Serialize JSON for embedding inside a `<script>` element. `<`, `>` and
/// `&` become unicode escapes so the data cannot end the element.
fn script_json(value: &Value) -> String {
    value
        .to_string()
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

#[cfg(test)]
#[path = "pages_test.rs"]
mod tests;
