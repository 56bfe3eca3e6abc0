//! City theme catalog.
//!
//! Every city theme the site can wear resolves through this module: metadata
//! for the picker carousel, visibility rules for admin-only and hidden
//! entries, and tolerant parsing of persisted keys.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AccountError;

pub mod applier;
pub mod cache;
pub mod coordinator;

pub use applier::{DocumentTheme, ThemeApplier};
pub use cache::{FileThemeCache, MemoryThemeCache, ThemeCache, THEME_CACHE_KEY};
pub use coordinator::{
    ApplyOutcome, ThemeCoordinator, ThemeState, TransitionSignal, DEFAULT_MIN_OVERLAY,
};

/// Closed set of city themes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CityTheme {
    #[default]
    Taipei,
    Rio,
    LosAngeles,
    Amsterdam,
    Tokyo,
    Seoul,
    Santorini,
    Arjeplog,
}

impl CityTheme {
    pub const ALL: [CityTheme; 8] = [
        CityTheme::Taipei,
        CityTheme::Rio,
        CityTheme::LosAngeles,
        CityTheme::Amsterdam,
        CityTheme::Tokyo,
        CityTheme::Seoul,
        CityTheme::Santorini,
        CityTheme::Arjeplog,
    ];

    /// Stable key stored in settings and the theme cache.
    pub fn key(self) -> &'static str {
        self.meta().key
    }

    /// Display name, e.g. `Rio de Janeiro`.
    pub fn label(self) -> &'static str {
        self.meta().name
    }

    pub fn meta(self) -> &'static ThemeMeta {
        // CATALOG is declared in `ALL` order.
        &CATALOG[self as usize]
    }

    /// Parse a stored key. Case and surrounding whitespace are ignored.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|theme| theme.key() == normalized)
    }

    /// Resolve a persisted value, falling back to the default theme.
    pub fn resolve_or_default(raw: Option<&str>) -> Self {
        raw.and_then(Self::parse).unwrap_or_default()
    }
}

impl fmt::Display for CityTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CityTheme {
    type Err = AccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| AccountError::UnknownTheme(s.trim().to_string()))
    }
}

/// Picker metadata for one city theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeMeta {
    pub theme: CityTheme,
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub tagline: &'static str,
    pub primary_color: &'static str,
    pub bg_color: &'static str,
    /// Relative image path under the site base URL.
    pub image: &'static str,
    /// Avatar fill and glyph colors.
    pub avatar_bg: &'static str,
    pub avatar_text: &'static str,
    pub admin_only: bool,
    pub hidden: bool,
}

impl ThemeMeta {
    /// Whether the picker shows this entry for the given session/selection.
    pub fn is_visible(&self, is_admin: bool, selected: CityTheme, active: CityTheme) -> bool {
        if self.admin_only && !is_admin {
            return false;
        }
        if self.hidden && self.theme != selected && self.theme != active {
            return false;
        }
        true
    }
}

static CATALOG: [ThemeMeta; 8] = [
    ThemeMeta {
        theme: CityTheme::Taipei,
        key: "taipei",
        name: "Taipei",
        description: "Brutalist Tech",
        tagline: "Industrial contrast with monospaced precision.",
        primary_color: "#999999",
        bg_color: "#121212",
        image: "themes/taipei.jpg",
        avatar_bg: "#999999",
        avatar_text: "#121212",
        admin_only: false,
        hidden: false,
    },
    ThemeMeta {
        theme: CityTheme::Rio,
        key: "rio",
        name: "Rio de Janeiro",
        description: "Organic Growth",
        tagline: "Lush gradients with botanical softness.",
        primary_color: "#61BB46",
        bg_color: "#F0FFF0",
        image: "themes/rio_de_janeiro.jpg",
        avatar_bg: "#61BB46",
        avatar_text: "#1B3022",
        admin_only: false,
        hidden: false,
    },
    ThemeMeta {
        theme: CityTheme::LosAngeles,
        key: "los_angeles",
        name: "Los Angeles",
        description: "Cinematic Retro",
        tagline: "Golden hour palettes and film grain warmth.",
        primary_color: "#FDBD2C",
        bg_color: "#000000",
        image: "themes/los_angeles.jpg",
        avatar_bg: "#FDBD2C",
        avatar_text: "#3D2B1F",
        admin_only: false,
        hidden: false,
    },
    ThemeMeta {
        theme: CityTheme::Amsterdam,
        key: "amsterdam",
        name: "Amsterdam",
        description: "Modern Heritage",
        tagline: "Serif editorial with Dutch restraint.",
        primary_color: "#F58220",
        bg_color: "#FAF9F6",
        image: "themes/amsterdam.jpg",
        avatar_bg: "#F58220",
        avatar_text: "#FFFFFF",
        admin_only: false,
        hidden: false,
    },
    ThemeMeta {
        theme: CityTheme::Tokyo,
        key: "tokyo",
        name: "Tokyo",
        description: "Precise Editorial",
        tagline: "Minimal grids and surgical color pops.",
        primary_color: "#333333",
        bg_color: "#FFFFFF",
        image: "themes/tokyo.jpg",
        avatar_bg: "#333333",
        avatar_text: "#FFFFFF",
        admin_only: false,
        hidden: false,
    },
    ThemeMeta {
        theme: CityTheme::Seoul,
        key: "seoul",
        name: "Seoul",
        description: "Cyber-Pop",
        tagline: "Neon blurs and candy chrome typography.",
        primary_color: "#963D97",
        bg_color: "#0B0114",
        image: "themes/seoul.jpg",
        avatar_bg: "#963D97",
        avatar_text: "#FFFFFF",
        admin_only: false,
        hidden: false,
    },
    ThemeMeta {
        theme: CityTheme::Santorini,
        key: "santorini",
        name: "Santorini",
        description: "Fluid Coastal",
        tagline: "Breezy white space with ink accents.",
        primary_color: "#009DDC",
        bg_color: "#FFFFFF",
        image: "themes/santorini.jpg",
        avatar_bg: "#009DDC",
        avatar_text: "#FFFFFF",
        admin_only: false,
        hidden: true,
    },
    ThemeMeta {
        theme: CityTheme::Arjeplog,
        key: "arjeplog",
        name: "Arjeplog",
        description: "Arctic Horizon",
        tagline: "Polar night navies with frozen cyan highlights.",
        primary_color: "#F0EEE9",
        bg_color: "#002147",
        image: "themes/arjeplog.jpg",
        avatar_bg: "#F0EEE9",
        avatar_text: "#002147",
        admin_only: true,
        hidden: false,
    },
];

/// Full catalog in picker order.
pub fn catalog() -> &'static [ThemeMeta] {
    &CATALOG
}

/// Entries the picker shows for this session and selection.
pub fn visible_themes(
    is_admin: bool,
    selected: CityTheme,
    active: CityTheme,
) -> Vec<&'static ThemeMeta> {
    CATALOG
        .iter()
        .filter(|meta| meta.is_visible(is_admin, selected, active))
        .collect()
}

/// Carousel step forward from `selected`, wrapping at the end.
pub fn next_visible(is_admin: bool, selected: CityTheme, active: CityTheme) -> CityTheme {
    step_visible(is_admin, selected, active, 1)
}

/// Carousel step backward from `selected`, wrapping at the start.
pub fn prev_visible(is_admin: bool, selected: CityTheme, active: CityTheme) -> CityTheme {
    step_visible(is_admin, selected, active, -1)
}

fn step_visible(is_admin: bool, selected: CityTheme, active: CityTheme, delta: isize) -> CityTheme {
    let visible = visible_themes(is_admin, selected, active);
    if visible.is_empty() {
        return selected;
    }
    let len = visible.len() as isize;
    let idx = visible
        .iter()
        .position(|meta| meta.theme == selected)
        .unwrap_or(0) as isize;
    let next = (idx + delta).rem_euclid(len) as usize;
    visible[next].theme
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_indexed_in_declaration_order() {
        for theme in CityTheme::ALL {
            assert_eq!(theme.meta().theme, theme);
        }
        assert_eq!(CityTheme::Rio.label(), "Rio de Janeiro");
    }

    #[test]
    fn parse_is_case_insensitive_and_rejects_unknown() {
        assert_eq!(CityTheme::parse(" Los_Angeles "), Some(CityTheme::LosAngeles));
        assert_eq!(CityTheme::parse("paris"), None);
        assert!("paris".parse::<CityTheme>().is_err());
    }

    #[test]
    fn resolve_falls_back_to_taipei() {
        assert_eq!(CityTheme::resolve_or_default(None), CityTheme::Taipei);
        assert_eq!(CityTheme::resolve_or_default(Some("atlantis")), CityTheme::Taipei);
        assert_eq!(CityTheme::resolve_or_default(Some("seoul")), CityTheme::Seoul);
    }

    #[test]
    fn admin_only_entries_need_the_flag() {
        let plain = visible_themes(false, CityTheme::Taipei, CityTheme::Taipei);
        assert!(plain.iter().all(|meta| meta.theme != CityTheme::Arjeplog));
        let admin = visible_themes(true, CityTheme::Taipei, CityTheme::Taipei);
        assert!(admin.iter().any(|meta| meta.theme == CityTheme::Arjeplog));
    }

    #[test]
    fn hidden_entries_show_only_when_selected_or_active() {
        let idle = visible_themes(false, CityTheme::Tokyo, CityTheme::Taipei);
        assert!(idle.iter().all(|meta| meta.theme != CityTheme::Santorini));

        let active = visible_themes(false, CityTheme::Tokyo, CityTheme::Santorini);
        assert!(active.iter().any(|meta| meta.theme == CityTheme::Santorini));

        let selected = visible_themes(false, CityTheme::Santorini, CityTheme::Taipei);
        assert!(selected.iter().any(|meta| meta.theme == CityTheme::Santorini));
    }

    #[test]
    fn carousel_wraps_in_both_directions() {
        assert_eq!(
            prev_visible(false, CityTheme::Taipei, CityTheme::Taipei),
            CityTheme::Seoul
        );
        assert_eq!(
            next_visible(false, CityTheme::Seoul, CityTheme::Taipei),
            CityTheme::Taipei
        );
        assert_eq!(
            next_visible(true, CityTheme::Seoul, CityTheme::Taipei),
            CityTheme::Arjeplog
        );
    }

    #[test]
    fn carousel_treats_invisible_selection_as_first_entry() {
        // Arjeplog is not visible without the flag, so stepping starts at index 0.
        assert_eq!(
            next_visible(false, CityTheme::Arjeplog, CityTheme::Taipei),
            CityTheme::Rio
        );
    }
}
