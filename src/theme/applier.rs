//! Document-level theme attribute.
//!
//! The coordinator is the only writer; stylesheet-side consumers read the
//! applied theme through `current_visual`.

use std::sync::{Arc, RwLock};

use super::CityTheme;

/// Channel through which the visually-applied theme is set and observed.
pub trait ThemeApplier: Send + Sync {
    /// Apply `theme` to the visual root.
    fn apply_visual(&self, theme: CityTheme);
    /// Theme currently applied to the visual root, if any.
    fn current_visual(&self) -> Option<CityTheme>;
}

/// In-process stand-in for the document root's `data-theme` attribute.
#[derive(Debug, Clone, Default)]
pub struct DocumentTheme {
    attribute: Arc<RwLock<Option<CityTheme>>>,
}

impl DocumentTheme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `theme` already applied, as a boot script would.
    pub fn with_theme(theme: CityTheme) -> Self {
        Self {
            attribute: Arc::new(RwLock::new(Some(theme))),
        }
    }
}

impl ThemeApplier for DocumentTheme {
    fn apply_visual(&self, theme: CityTheme) {
        let mut attribute = match self.attribute.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *attribute = Some(theme);
    }

    fn current_visual(&self) -> Option<CityTheme> {
        match self.attribute.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}
