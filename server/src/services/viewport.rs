//! Viewport service: publish and fetch map views.
//!
//! ERROR HANDLING
//! ==============
//! A rejected publish never reaches the store, so a viewer can only ever
//! observe views that passed validation. Fetch distinguishes "never
//! published" from a validation failure so routes can map them to
//! different status codes.

use location::{BodyEncoding, MapView, UserId, ValidationError};
use tracing::{debug, info, warn};

use crate::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum ViewportError {
    #[error("no map view published for {0}")]
    NotFound(UserId),
    #[error("invalid map view: {0}")]
    Invalid(#[from] ValidationError),
}

/// Validate a raw publish body in `encoding` and store it for `id`.
///
/// # Errors
///
/// Returns [`ViewportError::Invalid`] if the body fails validation; the
/// store is left untouched in that case.
pub async fn publish(
    state: &AppState,
    id: UserId,
    encoding: BodyEncoding,
    body: &[u8],
) -> Result<MapView, ViewportError> {
    let view = location::parse_map_view_body(body, encoding).inspect_err(|e| {
        warn!(%id, error = %e, "rejected map view");
    })?;

    let replaced = state.views.put(id.clone(), view).await;
    if replaced {
        debug!(
            %id,
            latitude = view.location.latitude,
            longitude = view.location.longitude,
            zoom = ?view.zoom,
            "map view updated"
        );
    } else {
        let sessions = state.views.len().await;
        info!(%id, sessions, "first map view published");
    }
    Ok(view)
}

/// Latest published view for `id`.
///
/// # Errors
///
/// Returns [`ViewportError::NotFound`] if nothing was ever published.
pub async fn fetch(state: &AppState, id: &UserId) -> Result<MapView, ViewportError> {
    state
        .views
        .get(id)
        .await
        .ok_or_else(|| ViewportError::NotFound(id.clone()))
}

#[cfg(test)]
#[path = "viewport_test.rs"]
mod tests;
