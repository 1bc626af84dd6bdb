//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the viewport store, the loaded configuration and the static
//! asset allow-list. The store is created at startup and dropped with the
//! process; nothing is persisted.

use std::collections::HashMap;
use std::sync::Arc;

use location::{MapView, UserId};
use tokio::sync::RwLock;

use crate::config::ServerConfig;
use crate::services::assets::SiteAssets;

// =============================================================================
// VIEW STORE
// =============================================================================

/// Last published map view per user.
///
/// Writes overwrite unconditionally (last write wins, no versioning). The
/// lock is held only for the single map operation.
#[derive(Clone, Default)]
pub struct ViewStore {
    views: Arc<RwLock<HashMap<UserId, MapView>>>,
}

impl ViewStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `view` for `id`. Returns `true` if a previous view was replaced.
    pub async fn put(&self, id: UserId, view: MapView) -> bool {
        self.views.write().await.insert(id, view).is_some()
    }

    /// Latest view for `id`, or `None` if nothing was ever published.
    pub async fn get(&self, id: &UserId) -> Option<MapView> {
        self.views.read().await.get(id).copied()
    }

    /// Number of users with a published view.
    pub async fn len(&self) -> usize {
        self.views.read().await.len()
    }
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub views: ViewStore,
    pub config: Arc<ServerConfig>,
    pub assets: Arc<SiteAssets>,
}

impl AppState {
    #[must_use]
    pub fn new(config: ServerConfig, assets: SiteAssets) -> Self {
        Self { views: ViewStore::new(), config: Arc::new(config), assets: Arc::new(assets) }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use std::path::PathBuf;

    use super::*;
    use crate::config::SiteConfig;

    /// Config pointing at a non-existent site dir, with default site settings.
    #[must_use]
    pub fn test_config() -> ServerConfig {
        ServerConfig {
            bind_addr: "127.0.0.1".into(),
            port: 0,
            site_dir: PathBuf::from("__no_site_dir__"),
            public_url: "http://localhost:3000".into(),
            site: SiteConfig::default(),
        }
    }

    /// Create a test `AppState` with an empty store and no static assets.
    #[must_use]
    pub fn test_app_state() -> AppState {
        let config = test_config();
        let assets = SiteAssets::empty(&config.site_dir);
        AppState::new(config, assets)
    }

    /// Create a test `AppState` serving the given assets.
    #[must_use]
    pub fn test_app_state_with_assets(assets: SiteAssets) -> AppState {
        AppState::new(test_config(), assets)
    }

    /// Publish a view directly into the store, bypassing validation.
    pub async fn seed_view(state: &AppState, id: &str, view: MapView) {
        state.views.put(UserId::from(id), view).await;
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
