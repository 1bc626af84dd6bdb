//! Map view value types.

use serde::{Deserialize, Serialize};

/// A map center in degrees.
///
/// The usual `[-90, 90]` / `[-180, 180]` ranges are not enforced here; only
/// finiteness is guaranteed by the parsers.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Where a map is currently looking: center plus optional zoom level.
///
/// Serializes to the fetch response shape,
/// `{"location":{"latitude":45.0,"longitude":-93.5},"zoom":10}`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub location: Location,
    #[serde(default)]
    pub zoom: Option<i32>,
}

impl MapView {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, zoom: Option<i32>) -> Self {
        Self { location: Location { latitude, longitude }, zoom }
    }

    /// Encode into the publish wire shape with stringified numbers.
    #[must_use]
    pub fn to_wire(&self) -> WireMapView {
        WireMapView::from(self)
    }
}

/// Publish-side location with numbers carried as strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireLocation {
    pub latitude: String,
    pub longitude: String,
}

/// Publish request body: `{"location":{"latitude":"..","longitude":".."},"zoom":".."|null}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMapView {
    pub location: WireLocation,
    pub zoom: Option<String>,
}

impl From<&MapView> for WireMapView {
    fn from(view: &MapView) -> Self {
        Self {
            location: WireLocation {
                latitude: view.location.latitude.to_string(),
                longitude: view.location.longitude.to_string(),
            },
            zoom: view.zoom.map(|z| z.to_string()),
        }
    }
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;
