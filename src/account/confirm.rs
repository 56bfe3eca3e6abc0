//! Pending confirmation with a deferred continuation.

use std::fmt;

type Continuation = Box<dyn FnOnce() + Send>;

struct ConfirmRequest {
    title: String,
    message: String,
    continuation: Continuation,
}

/// Holds at most one confirmation awaiting the user's answer.
#[derive(Default)]
pub struct ConfirmSlot {
    pending: Option<ConfirmRequest>,
}

impl fmt::Debug for ConfirmSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfirmSlot")
            .field("pending", &self.pending().map(|(title, _)| title))
            .finish()
    }
}

impl ConfirmSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for confirmation, replacing any request still open.
    pub fn request<F>(&mut self, title: impl Into<String>, message: impl Into<String>, on_confirm: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.pending = Some(ConfirmRequest {
            title: title.into(),
            message: message.into(),
            continuation: Box::new(on_confirm),
        });
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    /// Title and message of the open request.
    pub fn pending(&self) -> Option<(&str, &str)> {
        self.pending
            .as_ref()
            .map(|req| (req.title.as_str(), req.message.as_str()))
    }

    /// Run the continuation and close. Returns false when nothing was open.
    pub fn confirm(&mut self) -> bool {
        match self.pending.take() {
            Some(req) => {
                (req.continuation)();
                true
            }
            None => false,
        }
    }

    /// Close without running the continuation.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
