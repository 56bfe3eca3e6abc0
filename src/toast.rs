//! Scoped, auto-expiring status messages.
//!
//! At most one toast exists at a time. Each panel asks whether the current
//! toast belongs to its scope and renders it inline if so. A single expiry
//! timer runs per toast; showing or clearing cancels the previous one, and a
//! generation check keeps a timer that already fired from clearing a newer
//! toast.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

/// Default lifetime of a toast.
pub const DEFAULT_TOAST_TTL: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// UI region a toast is routed to.
///
/// The account page itself emits `profile`, `theme`, `ff` and `ff-modal`.
/// `invite`, `invite-modal`, `waitlist` and `support` are reserved for the
/// admin invite, waitlist review and deactivation flows that callers drive
/// through the shared `ToastNotifier`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToastScope {
    Profile,
    Ff,
    FfModal,
    Theme,
    Invite,
    InviteModal,
    Waitlist,
    Support,
}

impl ToastScope {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Ff => "ff",
            Self::FfModal => "ff-modal",
            Self::Theme => "theme",
            Self::Invite => "invite",
            Self::InviteModal => "invite-modal",
            Self::Waitlist => "waitlist",
            Self::Support => "support",
        }
    }
}

impl fmt::Display for ToastScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub scope: ToastScope,
}

#[derive(Debug, Default)]
struct ToastSlot {
    current: Option<Toast>,
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

impl ToastSlot {
    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

/// Shared handle to the page's single toast slot.
#[derive(Debug, Clone)]
pub struct ToastNotifier {
    slot: Arc<Mutex<ToastSlot>>,
    ttl: Duration,
}

impl Default for ToastNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_TTL)
    }
}

impl ToastNotifier {
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(ToastSlot::default())),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Replace the current toast and restart the expiry timer.
    pub fn show(&self, kind: ToastKind, message: impl Into<String>, scope: ToastScope) {
        let toast = Toast {
            kind,
            message: message.into(),
            scope,
        };
        tracing::debug!(kind = kind.as_str(), %scope, message = %toast.message, "toast");

        let mut slot = self.lock();
        slot.cancel_timer();
        slot.generation += 1;
        slot.current = Some(toast);

        let generation = slot.generation;
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::debug!("no async runtime; toast will not auto-expire");
            return;
        };
        let weak = Arc::downgrade(&self.slot);
        let ttl = self.ttl;
        slot.timer = Some(runtime.spawn(async move {
            tokio::time::sleep(ttl).await;
            let Some(shared) = weak.upgrade() else {
                return;
            };
            let mut slot = match shared.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            if slot.generation == generation {
                slot.current = None;
                slot.timer = None;
            }
        }));
    }

    pub fn success(&self, message: impl Into<String>, scope: ToastScope) {
        self.show(ToastKind::Success, message, scope);
    }

    pub fn error(&self, message: impl Into<String>, scope: ToastScope) {
        self.show(ToastKind::Error, message, scope);
    }

    /// Drop the current toast and cancel its pending expiry.
    pub fn clear(&self) {
        let mut slot = self.lock();
        slot.cancel_timer();
        slot.generation += 1;
        slot.current = None;
    }

    pub fn current(&self) -> Option<Toast> {
        self.lock().current.clone()
    }

    /// The current toast if it belongs to `scope`.
    pub fn render(&self, scope: ToastScope) -> Option<Toast> {
        self.lock()
            .current
            .as_ref()
            .filter(|toast| toast.scope == scope)
            .cloned()
    }

    fn lock(&self) -> MutexGuard<'_, ToastSlot> {
        match self.slot.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
