//! Lyra account page coordination.
//!
//! Three pieces keep the account page consistent with the URL, the settings
//! backend, and the visual root:
//!
//! - [`account::TabRouter`] mirrors the active tab into the `tab` query
//!   parameter and gates the admin tab.
//! - [`theme::ThemeCoordinator`] separates the previewed theme from the saved
//!   one, persists saves, and keeps the transition overlay up for a minimum
//!   duration, rolling back on failure.
//! - [`toast::ToastNotifier`] holds the page's single self-expiring status
//!   message, rendered only where its scope matches.
//!
//! # Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//! use lyra::account::{AccountDeps, AccountPage, QueryParams};
//! use lyra::config::Config;
//! use lyra::store::MemorySettingsStore;
//! use lyra::theme::{CityTheme, DocumentTheme, MemoryThemeCache};
//!
//! # async fn example() {
//! let mut config = Config::default();
//! config.account.user_id = Some("me".to_string());
//! let deps = AccountDeps {
//!     store: Arc::new(MemorySettingsStore::new()),
//!     applier: Arc::new(DocumentTheme::new()),
//!     cache: Arc::new(MemoryThemeCache::new()),
//! };
//! let page = AccountPage::new(&config, QueryParams::parse("?tab=look_and_feel"), deps);
//! page.load().await.unwrap();
//! page.themes().preview_theme(CityTheme::Tokyo);
//! page.themes().apply_theme().await;
//! # }
//! ```

pub mod account;
pub mod config;
pub mod error;
pub mod portal;
pub mod store;
#[cfg(test)]
pub mod testsupport;
pub mod theme;
pub mod toast;
pub mod ui;
