//! Local map abstraction driven by the sync loops.
//!
//! The share loop reads the current viewport from a [`MapSurface`]; the view
//! loop writes fetched viewports back into one. [`MemoryMap`] is the only
//! surface the command line needs: it keeps the viewport in a `watch`
//! channel so the caller can observe every applied change.

use std::sync::Arc;

use location::MapView;
use tokio::sync::watch;

pub trait MapSurface: Send + Sync + 'static {
    /// Current viewport.
    fn map_view(&self) -> MapView;

    /// Move the map to `view`. A view without zoom keeps the current zoom.
    fn set_map_view(&self, view: &MapView);
}

/// In-memory map. Until a view is applied it reports `fallback` and its
/// channel holds `None`, so the first applied view is always a change.
#[derive(Clone)]
pub struct MemoryMap {
    view: Arc<watch::Sender<Option<MapView>>>,
    fallback: MapView,
}

impl MemoryMap {
    /// Map already showing `initial`.
    #[must_use]
    pub fn new(initial: MapView) -> Self {
        let (view, _) = watch::channel(Some(initial));
        Self { view: Arc::new(view), fallback: initial }
    }

    /// Map with nothing applied yet, reporting `fallback` until then.
    #[must_use]
    pub fn unset(fallback: MapView) -> Self {
        let (view, _) = watch::channel(None);
        Self { view: Arc::new(view), fallback }
    }

    /// Receiver notified whenever the applied viewport changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<MapView>> {
        self.view.subscribe()
    }
}

impl MapSurface for MemoryMap {
    fn map_view(&self) -> MapView {
        self.view.borrow().unwrap_or(self.fallback)
    }

    fn set_map_view(&self, view: &MapView) {
        let fallback = self.fallback;
        self.view.send_if_modified(|current| {
            let zoom = view.zoom.or(current.unwrap_or(fallback).zoom);
            let next = Some(MapView { location: view.location, zoom });
            if next == *current {
                return false;
            }
            *current = next;
            true
        });
    }
}

#[cfg(test)]
#[path = "map_test.rs"]
mod tests;
