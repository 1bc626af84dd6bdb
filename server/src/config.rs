//! Server configuration parsed from environment variables and the site
//! `config.json`.
//!
//! Variables (all optional):
//! - `PORT`: listen port, default 3000
//! - `BIND_ADDR`: listen address, default `0.0.0.0`
//! - `SITE_DIR`: directory holding `config.json` and the static scripts
//! - `PUBLIC_URL`: base URL used to build share links

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use location::MapView;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
pub const SITE_CONFIG_FILE: &str = "config.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {key}: {value:?}")]
    InvalidVar { key: &'static str, value: String },
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[error("invalid site config {}: {source}", .path.display())]
    SiteConfig { path: PathBuf, source: serde_json::Error },
}

/// API keys handed to the browser pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigKeys {
    #[serde(rename = "BingMapsApi")]
    pub bing_maps_api: String,
}

/// Contents of `<SITE_DIR>/config.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub keys: ConfigKeys,
    /// Where a freshly opened map starts before any view is applied.
    #[serde(rename = "defaultMapView")]
    pub default_map_view: MapView,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self { keys: ConfigKeys::default(), default_map_view: MapView::new(0.0, 0.0, None) }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub port: u16,
    pub site_dir: PathBuf,
    /// Base of share links, without a trailing slash.
    pub public_url: String,
    pub site: SiteConfig,
}

impl ServerConfig {
    /// Build the server config from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for an unparseable `PORT` or a malformed
    /// site `config.json`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidVar { key: "PORT", value: raw.clone() })?,
            None => DEFAULT_PORT,
        };
        let bind_addr = lookup("BIND_ADDR")
            .filter(|addr| !addr.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
        let site_dir = lookup("SITE_DIR").map_or_else(default_site_dir, PathBuf::from);
        let public_url = lookup("PUBLIC_URL")
            .map(|url| url.trim_end_matches('/').to_owned())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| format!("http://localhost:{port}"));
        let site = load_site_config(&site_dir.join(SITE_CONFIG_FILE))?;

        Ok(Self { bind_addr, port, site_dir, public_url, site })
    }
}

/// Resolve the default site directory shipped next to the server crate.
fn default_site_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("site")
}

/// Load the site config. A missing file falls back to defaults.
///
/// # Errors
///
/// Returns [`ConfigError::Read`] when the file exists but cannot be read and
/// [`ConfigError::SiteConfig`] when it does not match the expected shape.
pub fn load_site_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(text) => serde_json::from_str(&text)
            .map_err(|source| ConfigError::SiteConfig { path: path.to_path_buf(), source }),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "site config not found; using defaults");
            Ok(SiteConfig::default())
        }
        Err(source) => Err(ConfigError::Read { path: path.to_path_buf(), source }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
