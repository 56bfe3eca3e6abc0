//! City theme selection, persistence, and transition overlay timing.
//!
//! The coordinator owns three things nobody else writes: the selected vs.
//! active theme state, the visually-applied theme (through `ThemeApplier`),
//! and the durable theme cache entry. Saving a different theme brackets the
//! backend call with transition signals for the full-screen overlay, holding
//! the overlay for at least `min_overlay` no matter how fast the save lands.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::error::AccountError;
use crate::store::{SettingsStore, UserSettings};
use crate::toast::{ToastNotifier, ToastScope};

use super::{next_visible, prev_visible, CityTheme, ThemeApplier, ThemeCache};

/// Minimum time the transition overlay stays up.
pub const DEFAULT_MIN_OVERLAY: Duration = Duration::from_millis(2000);

const SAVED_MESSAGE: &str = "Theme saved.";
const SAVE_FAILED_FALLBACK: &str = "Failed to save theme";

/// Selected vs. active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeState {
    /// Nothing previewed; the picker shows the active theme.
    Idle { active: CityTheme },
    /// The picker shows `selected`, not yet saved.
    Previewing {
        active: CityTheme,
        selected: CityTheme,
    },
    /// A save of `selected` is in flight. `started_at` is set when a
    /// transition overlay was started for it.
    Saving {
        active: CityTheme,
        selected: CityTheme,
        started_at: Option<Instant>,
    },
}

impl ThemeState {
    pub fn active(&self) -> CityTheme {
        match *self {
            Self::Idle { active }
            | Self::Previewing { active, .. }
            | Self::Saving { active, .. } => active,
        }
    }

    pub fn selected(&self) -> CityTheme {
        match *self {
            Self::Idle { active } => active,
            Self::Previewing { selected, .. } | Self::Saving { selected, .. } => selected,
        }
    }

    pub fn is_saving(&self) -> bool {
        matches!(self, Self::Saving { .. })
    }

    /// Settled state for a given active/selected pair.
    fn settled(active: CityTheme, selected: CityTheme) -> Self {
        if active == selected {
            Self::Idle { active }
        } else {
            Self::Previewing { active, selected }
        }
    }
}

/// Signals consumed by the full-screen transition overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionSignal {
    Start {
        theme: CityTheme,
        label: &'static str,
        at: Instant,
    },
    End {
        theme: CityTheme,
        at: Instant,
    },
}

/// Result of one `apply_theme` call. Failures have already been surfaced as
/// a `theme`-scoped toast by the time this is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    Saved {
        theme: CityTheme,
        transitioned: bool,
    },
    Failed {
        theme: CityTheme,
        message: String,
    },
    /// No signed-in user; nothing was attempted.
    Skipped,
}

pub struct ThemeCoordinator {
    state: Mutex<ThemeState>,
    user_id: Option<String>,
    store: Arc<dyn SettingsStore>,
    applier: Arc<dyn ThemeApplier>,
    cache: Arc<dyn ThemeCache>,
    toasts: ToastNotifier,
    signals: Option<mpsc::UnboundedSender<TransitionSignal>>,
    min_overlay: Duration,
}

impl ThemeCoordinator {
    pub fn new(
        store: Arc<dyn SettingsStore>,
        applier: Arc<dyn ThemeApplier>,
        cache: Arc<dyn ThemeCache>,
        toasts: ToastNotifier,
    ) -> Self {
        let active = applier.current_visual().unwrap_or_default();
        Self {
            state: Mutex::new(ThemeState::Idle { active }),
            user_id: None,
            store,
            applier,
            cache,
            toasts,
            signals: None,
            min_overlay: DEFAULT_MIN_OVERLAY,
        }
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_min_overlay(mut self, min_overlay: Duration) -> Self {
        self.min_overlay = min_overlay;
        self
    }

    /// Route transition signals to a new receiver, replacing any previous one.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<TransitionSignal> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.signals = Some(tx);
        rx
    }

    pub fn set_user(&mut self, user_id: Option<String>) {
        self.user_id = user_id;
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn state(&self) -> ThemeState {
        *self.lock()
    }

    pub fn active_theme(&self) -> CityTheme {
        self.lock().active()
    }

    pub fn selected_theme(&self) -> CityTheme {
        self.lock().selected()
    }

    pub fn is_saving(&self) -> bool {
        self.lock().is_saving()
    }

    pub fn min_overlay(&self) -> Duration {
        self.min_overlay
    }

    /// Adopt `active` from freshly loaded settings and apply it visually.
    pub fn hydrate(&self, active: CityTheme) {
        *self.lock() = ThemeState::Idle { active };
        self.applier.apply_visual(active);
    }

    /// Select `theme` in the picker without saving it.
    pub fn preview_theme(&self, theme: CityTheme) {
        let mut state = self.lock();
        *state = match *state {
            ThemeState::Idle { active } | ThemeState::Previewing { active, .. } => {
                ThemeState::settled(active, theme)
            }
            ThemeState::Saving {
                active, started_at, ..
            } => ThemeState::Saving {
                active,
                selected: theme,
                started_at,
            },
        };
        tracing::debug!(selected = %theme, "theme preview");
    }

    /// Select a theme by key, accepting only entries the picker would offer
    /// this session. Admin-only and hidden themes are reported as unknown.
    pub fn select_by_key(&self, raw: &str, is_admin: bool) -> Result<CityTheme, AccountError> {
        let theme: CityTheme = raw.parse()?;
        let state = self.state();
        if !theme
            .meta()
            .is_visible(is_admin, state.selected(), state.active())
        {
            return Err(AccountError::UnknownTheme(raw.trim().to_string()));
        }
        self.preview_theme(theme);
        Ok(theme)
    }

    /// Step the picker to the next visible theme.
    pub fn preview_next(&self, is_admin: bool) -> CityTheme {
        let state = self.state();
        let next = next_visible(is_admin, state.selected(), state.active());
        self.preview_theme(next);
        next
    }

    /// Step the picker to the previous visible theme.
    pub fn preview_prev(&self, is_admin: bool) -> CityTheme {
        let state = self.state();
        let prev = prev_visible(is_admin, state.selected(), state.active());
        self.preview_theme(prev);
        prev
    }

    /// Persist the selected theme and make it active.
    pub async fn apply_theme(&self) -> ApplyOutcome {
        let Some(user_id) = self.user_id.clone() else {
            tracing::debug!("apply_theme without a signed-in user");
            return ApplyOutcome::Skipped;
        };
        self.toasts.clear();

        let prev = self.applier.current_visual().unwrap_or_default();
        let (active, target) = {
            let state = self.lock();
            (state.active(), state.selected())
        };
        let is_same_theme = prev == target;

        let started_at = if is_same_theme {
            None
        } else {
            let now = Instant::now();
            self.emit(TransitionSignal::Start {
                theme: target,
                label: target.label(),
                at: now,
            });
            self.applier.apply_visual(target);
            Some(now)
        };
        *self.lock() = ThemeState::Saving {
            active,
            selected: target,
            started_at,
        };
        tracing::info!(from = %prev, to = %target, "saving city theme");

        let result = self
            .store
            .upsert(&UserSettings::with_theme(user_id, target.key()))
            .await;

        let outcome = match result {
            Ok(()) => {
                if let Err(e) = self.cache.store(target) {
                    tracing::warn!(error = %e, "failed to cache city theme");
                }
                self.settle(Some(target));
                // The visual root follows the active theme even if an
                // overlapping save rolled it back meanwhile.
                self.applier.apply_visual(target);
                self.toasts.success(SAVED_MESSAGE, ToastScope::Theme);
                ApplyOutcome::Saved {
                    theme: target,
                    transitioned: started_at.is_some(),
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, theme = %target, "city theme save failed");
                // Only undo our own optimistic change; a later save may own
                // the visual root by now.
                if started_at.is_some() && self.applier.current_visual() == Some(target) {
                    self.applier.apply_visual(prev);
                    if let Err(e) = self.cache.store(prev) {
                        tracing::warn!(error = %e, "failed to restore cached city theme");
                    }
                }
                let mut message = e.to_string();
                if message.trim().is_empty() {
                    message = SAVE_FAILED_FALLBACK.to_string();
                }
                self.settle(None);
                self.toasts.error(message.clone(), ToastScope::Theme);
                ApplyOutcome::Failed {
                    theme: target,
                    message,
                }
            }
        };

        if let Some(started_at) = started_at {
            self.schedule_transition_end(target, started_at);
        }
        outcome
    }

    /// Leave `Saving`, adopting `saved` as active when the save landed and
    /// keeping whatever the picker selected meanwhile.
    fn settle(&self, saved: Option<CityTheme>) {
        let mut state = self.lock();
        let active = saved.unwrap_or_else(|| state.active());
        let selected = state.selected();
        *state = ThemeState::settled(active, selected);
    }

    fn schedule_transition_end(&self, theme: CityTheme, started_at: Instant) {
        let Some(signals) = self.signals.clone() else {
            return;
        };
        let remaining = self.min_overlay.saturating_sub(started_at.elapsed());
        tokio::spawn(async move {
            tokio::time::sleep(remaining).await;
            let _ = signals.send(TransitionSignal::End {
                theme,
                at: Instant::now(),
            });
        });
    }

    fn emit(&self, signal: TransitionSignal) {
        if let Some(signals) = &self.signals {
            let _ = signals.send(signal);
        }
    }

    fn lock(&self) -> MutexGuard<'_, ThemeState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
