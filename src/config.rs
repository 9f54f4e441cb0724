//! Dashboard configuration
//!
//! Read once at startup from `<config_dir>/surveydeck/config.json`, then
//! overridden from the environment. Nothing is ever written back.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::core::activity::DEFAULT_LOG_CAPACITY;
use crate::map::{DEFAULT_OVERLAY_PADDING_PX, ProviderId};

/// Overrides `backend_url`
pub const BACKEND_URL_ENV: &str = "SURVEYDECK_BACKEND_URL";
/// Overrides `google_maps_api_key`
pub const GOOGLE_MAPS_API_KEY_ENV: &str = "SURVEYDECK_GOOGLE_MAPS_API_KEY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Base URL every endpoint path is joined to
    pub backend_url: String,
    /// Enables the Google Maps provider when set
    pub google_maps_api_key: Option<String>,
    /// Drawing provider shown at startup
    pub default_provider: ProviderId,
    /// Margin kept around an overlay when fitting the viewport
    pub overlay_padding_px: u32,
    /// Entries kept in the operator log before the oldest are dropped
    pub log_capacity: usize,
    /// Drop responses overtaken by a newer request on the same panel
    pub discard_stale_responses: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://127.0.0.1:8000".to_string(),
            google_maps_api_key: None,
            default_provider: ProviderId::OpenStreetMap,
            overlay_padding_px: DEFAULT_OVERLAY_PADDING_PX,
            log_capacity: DEFAULT_LOG_CAPACITY,
            discard_stale_responses: true,
        }
    }
}

impl DashboardConfig {
    /// Directory name under the platform config dir
    pub const APP_DIR: &'static str = "surveydeck";

    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::APP_DIR).join("config.json"))
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        let from_disk = match Self::path() {
            Some(path) if path.exists() => match Self::load_from(&path) {
                Ok(config) => config,
                Err(err) => {
                    log::warn!("Error loading config, using defaults: {err:#}");
                    Self::default()
                }
            },
            Some(_) => Self::default(),
            None => {
                log::warn!("Could not determine config directory, using defaults");
                Self::default()
            }
        };
        from_disk.with_env_overrides(|name| std::env::var(name).ok())
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// Apply environment overrides; blank values are ignored
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        if let Some(url) = lookup(BACKEND_URL_ENV) {
            self.backend_url = url;
        }
        if let Some(key) = lookup(GOOGLE_MAPS_API_KEY_ENV) {
            self.google_maps_api_key = Some(key);
        }
        self
    }

    /// API key, treating an empty string as absent
    pub fn google_maps_api_key(&self) -> Option<&str> {
        self.google_maps_api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
    }
}
