//! Configuration data model.
//!
//! Struct/enum definitions plus default values. Loading and precedence logic
//! stay in `config::loader` and `config::sources`.

use serde::Deserialize;
use std::path::PathBuf;

use super::defaults::{
    default_settings_path, default_theme_cache_path, DEFAULT_MIN_OVERLAY_MS,
    DEFAULT_PORTAL_BASE, DEFAULT_PORTAL_ORIGIN, DEFAULT_PORTAL_TOKEN_LEN, DEFAULT_TOAST_TTL_MS,
};

/// Top-level runtime configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub account: AccountConfig,
    pub theme: ThemeConfig,
    pub toast: ToastConfig,
    pub storage: StorageConfig,
    pub portal: PortalConfig,
    pub display: DisplayConfig,
}

/// Session identity and authorization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AccountConfig {
    /// Signed-in user id. `None` means signed out.
    pub user_id: Option<String>,
    /// Authorization flag gating the admin tab and admin-only themes.
    pub admin: bool,
}

/// City theme transition settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub min_overlay_ms: u64,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            min_overlay_ms: DEFAULT_MIN_OVERLAY_MS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ToastConfig {
    pub ttl_ms: u64,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            ttl_ms: DEFAULT_TOAST_TTL_MS,
        }
    }
}

/// Local file locations for the settings table and theme cache.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub settings_path: Option<String>,
    pub theme_cache_path: Option<String>,
}

impl StorageConfig {
    pub fn resolved_settings_path(&self) -> PathBuf {
        non_empty(&self.settings_path)
            .map(PathBuf::from)
            .unwrap_or_else(default_settings_path)
    }

    pub fn resolved_theme_cache_path(&self) -> PathBuf {
        non_empty(&self.theme_cache_path)
            .map(PathBuf::from)
            .unwrap_or_else(default_theme_cache_path)
    }
}

/// Public portal link settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    pub origin: String,
    pub base: String,
    pub token_length: usize,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_PORTAL_ORIGIN.to_string(),
            base: DEFAULT_PORTAL_BASE.to_string(),
            token_length: DEFAULT_PORTAL_TOKEN_LEN,
        }
    }
}

/// Display / rendering preferences.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

/// Result of explicit global config initialization (`lyra init`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlobalConfigInitResult {
    Created {
        path: PathBuf,
    },
    AlreadyInitialized {
        path: PathBuf,
    },
    Overwritten {
        path: PathBuf,
        backup_path: PathBuf,
    },
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
