//! Default configuration constants.
//!
//! Keeping defaults in one module lets types, env overrides, and tests share
//! the same literals.

use std::path::PathBuf;

/// Embedded default `lyra.toml` template written by `lyra init`.
pub(super) const DEFAULT_LYRA_CONFIG_TEMPLATE: &str = include_str!("../templates/lyra.toml");
/// Config file name for both local and global config.
pub(super) const CONFIG_FILE_NAME: &str = "lyra.toml";
/// Application directory under config/data roots.
pub(super) const APP_DIR: &str = "lyra";
/// Minimum transition overlay duration.
pub(super) const DEFAULT_MIN_OVERLAY_MS: u64 = 2000;
/// Toast lifetime.
pub(super) const DEFAULT_TOAST_TTL_MS: u64 = 3000;
/// Default portal token length.
pub(super) const DEFAULT_PORTAL_TOKEN_LEN: usize = 12;
pub(super) const DEFAULT_PORTAL_ORIGIN: &str = "http://localhost:5173";
pub(super) const DEFAULT_PORTAL_BASE: &str = "/";

const SETTINGS_FILE_NAME: &str = "user_settings.toml";
const THEME_CACHE_FILE_NAME: &str = "city_theme";

/// Base directory for local state files.
pub(super) fn data_root_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR))
}

/// Default path of the local settings table.
pub(super) fn default_settings_path() -> PathBuf {
    data_root_dir()
        .unwrap_or_else(|| PathBuf::from(".lyra"))
        .join(SETTINGS_FILE_NAME)
}

/// Default path of the durable theme cache entry.
pub(super) fn default_theme_cache_path() -> PathBuf {
    data_root_dir()
        .unwrap_or_else(|| PathBuf::from(".lyra"))
        .join(THEME_CACHE_FILE_NAME)
}
