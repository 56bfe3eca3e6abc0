//! Local durable cache for the active theme key.
//!
//! Read once at startup, before any backend round-trip, so the first paint
//! already wears the user's theme. Writes are best effort: a failed cache
//! write never fails a theme save.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::CityTheme;

/// Entry name of the cached theme key.
pub const THEME_CACHE_KEY: &str = "city_theme";

/// Single-entry key/value cache for the theme preference.
pub trait ThemeCache: Send + Sync {
    fn load(&self) -> Option<CityTheme>;
    fn store(&self, theme: CityTheme) -> std::io::Result<()>;
}

/// Cache backed by one small file holding the theme key.
#[derive(Debug, Clone)]
pub struct FileThemeCache {
    path: PathBuf,
}

impl FileThemeCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ThemeCache for FileThemeCache {
    fn load(&self) -> Option<CityTheme> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        CityTheme::parse(&raw)
    }

    fn store(&self, theme: CityTheme) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, format!("{}\n", theme.key()))
    }
}

/// In-memory cache used by tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryThemeCache {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryThemeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored value, bypassing theme parsing.
    pub fn raw(&self) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(THEME_CACHE_KEY).cloned())
    }
}

impl ThemeCache for MemoryThemeCache {
    fn load(&self) -> Option<CityTheme> {
        self.raw().as_deref().and_then(CityTheme::parse)
    }

    fn store(&self, theme: CityTheme) -> std::io::Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| std::io::Error::other("theme cache lock poisoned"))?;
        entries.insert(THEME_CACHE_KEY.to_string(), theme.key().to_string());
        Ok(())
    }
}
