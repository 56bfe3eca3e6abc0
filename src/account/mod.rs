//! Account page coordination.
//!
//! `AccountPage` wires the session (user id + admin flag) to the tab bridge,
//! the city theme coordinator, the page's toast slot, and its confirmation
//! slot. Every mutating operation handles its own failure by emitting a
//! scoped toast; nothing here is fatal.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::config::Config;
use crate::error::AccountError;
use crate::store::SettingsStore;
use crate::theme::{CityTheme, ThemeApplier, ThemeCache, ThemeCoordinator, TransitionSignal};
use crate::toast::{Toast, ToastNotifier, ToastScope};

pub mod avatar;
pub mod confirm;
pub mod flyer;
pub mod query;
pub mod tab;

pub use confirm::ConfirmSlot;
pub use flyer::{FlyerError, FrequentFlyer, FrequentFlyerBook, FrequentFlyerDraft};
pub use query::QueryParams;
pub use tab::{AccountTab, TabRouter, TAB_PARAM};

const LOAD_FAILED_FALLBACK: &str = "Failed to load account";
const FLYER_ADDED: &str = "Added.";
const FLYER_DELETED: &str = "Deleted.";

/// External collaborators of the account page.
#[derive(Clone)]
pub struct AccountDeps {
    pub store: Arc<dyn SettingsStore>,
    pub applier: Arc<dyn ThemeApplier>,
    pub cache: Arc<dyn ThemeCache>,
}

/// Apply the cached theme before anything talks to the backend.
///
/// Returns the theme now on the visual root.
pub fn apply_boot_theme(cache: &dyn ThemeCache, applier: &dyn ThemeApplier) -> CityTheme {
    let theme = cache.load().unwrap_or_default();
    applier.apply_visual(theme);
    theme
}

pub struct AccountPage {
    user_id: Option<String>,
    store: Arc<dyn SettingsStore>,
    router: TabRouter,
    themes: ThemeCoordinator,
    toasts: ToastNotifier,
    confirm: ConfirmSlot,
    flyers: FrequentFlyerBook,
}

impl AccountPage {
    /// Mount the page for the configured session and current URL query.
    pub fn new(config: &Config, query: QueryParams, deps: AccountDeps) -> Self {
        let toasts = ToastNotifier::new(Duration::from_millis(config.toast.ttl_ms));
        let user_id = config.account.user_id.clone();
        let mut themes = ThemeCoordinator::new(
            Arc::clone(&deps.store),
            deps.applier,
            deps.cache,
            toasts.clone(),
        )
        .with_min_overlay(Duration::from_millis(config.theme.min_overlay_ms));
        themes.set_user(user_id.clone());
        Self {
            user_id,
            store: deps.store,
            router: TabRouter::new(query, config.account.admin),
            themes,
            toasts,
            confirm: ConfirmSlot::new(),
            flyers: FrequentFlyerBook::new(),
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn is_admin(&self) -> bool {
        self.router.is_admin()
    }

    /// Record the session's authorization flag once it resolves.
    pub fn set_admin(&mut self, is_admin: bool) {
        self.router.set_admin(is_admin);
    }

    /// Load persisted settings and adopt the saved theme.
    pub async fn load(&self) -> Result<CityTheme, AccountError> {
        self.toasts.clear();
        let Some(user_id) = self.user_id.as_deref() else {
            let err = AccountError::NotSignedIn;
            self.toasts.error(err.to_string(), ToastScope::Profile);
            return Err(err);
        };
        let settings = match self.store.fetch(user_id).await {
            Ok(settings) => settings,
            Err(e) => {
                let mut message = e.to_string();
                if message.trim().is_empty() {
                    message = LOAD_FAILED_FALLBACK.to_string();
                }
                tracing::warn!(error = %e, "failed to load account settings");
                self.toasts.error(message, ToastScope::Profile);
                return Err(e.into());
            }
        };
        let raw = settings.as_ref().and_then(|s| s.city_theme.as_deref());
        let theme = CityTheme::resolve_or_default(raw);
        if let Some(stored) = raw.filter(|raw| CityTheme::parse(raw).is_none()) {
            tracing::warn!(stored, "unknown stored city theme; using default");
        }
        self.themes.hydrate(theme);
        tracing::info!(user = user_id, theme = %theme, "account loaded");
        Ok(theme)
    }

    // -- tabs ---------------------------------------------------------------

    pub fn current_tab(&self) -> AccountTab {
        self.router.current_tab()
    }

    pub fn tabs(&self) -> &TabRouter {
        &self.router
    }

    pub fn set_tab(&mut self, next: AccountTab) -> Result<&QueryParams, AccountError> {
        self.router.set_tab(next)
    }

    /// The URL changed underneath the page (back button, pasted link).
    pub fn on_query_changed(&mut self, query: &QueryParams) {
        self.router.sync_from_query(query);
    }

    // -- themes -------------------------------------------------------------

    pub fn themes(&self) -> &ThemeCoordinator {
        &self.themes
    }

    pub fn subscribe_transitions(&mut self) -> mpsc::UnboundedReceiver<TransitionSignal> {
        self.themes.subscribe()
    }

    // -- toasts / confirm ---------------------------------------------------

    pub fn toasts(&self) -> &ToastNotifier {
        &self.toasts
    }

    pub fn render_toast(&self, scope: ToastScope) -> Option<Toast> {
        self.toasts.render(scope)
    }

    pub fn confirm(&mut self) -> &mut ConfirmSlot {
        &mut self.confirm
    }

    // -- frequent flyers ----------------------------------------------------

    pub fn frequent_flyers(&self) -> &[FrequentFlyer] {
        self.flyers.rows()
    }

    /// Submit the add form. Validation errors stay inside the form
    /// (`ff-modal`); success is announced on the list (`ff`).
    pub fn add_frequent_flyer(&mut self, draft: &FrequentFlyerDraft) -> Option<u64> {
        if self.user_id.is_none() {
            return None;
        }
        self.toasts.clear();
        match self.flyers.add(draft) {
            Ok(row) => {
                let id = row.id;
                self.toasts.success(FLYER_ADDED, ToastScope::Ff);
                Some(id)
            }
            Err(e) => {
                self.toasts.error(e.to_string(), ToastScope::FfModal);
                None
            }
        }
    }

    pub fn delete_frequent_flyer(&mut self, id: u64) -> bool {
        self.toasts.clear();
        match self.flyers.remove(id) {
            Ok(_) => {
                self.toasts.success(FLYER_DELETED, ToastScope::Ff);
                true
            }
            Err(e) => {
                tracing::warn!(id, "frequent flyer delete failed");
                self.toasts.error(e.to_string(), ToastScope::Ff);
                false
            }
        }
    }
}
