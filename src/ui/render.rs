//! Rendering contract and default terminal renderer binding.
//!
//! `RenderSink` is the UI contract consumed by the view helpers and the
//! binary. Tests substitute a recording sink without touching stderr.

pub use crate::ui::terminal::Renderer;

/// Injectable rendering interface.
pub trait RenderSink: Send + Sync {
    /// Render a titled section divider.
    fn section(&self, title: &str);
    /// Render one key/value field row.
    fn field(&self, key: &str, value: &str);
    /// Render additional detail text.
    fn detail(&self, text: &str);
    /// Render a color swatch row for a theme (`hex` like `#61BB46`).
    fn swatch(&self, label: &str, hex: &str, marker: &str);
    /// Render a success status line.
    fn success(&self, msg: &str);
    fn warn(&self, msg: &str);
    fn error(&self, msg: &str);
}

impl RenderSink for Renderer {
    fn section(&self, title: &str) {
        self.section(title);
    }

    fn field(&self, key: &str, value: &str) {
        self.field(key, value);
    }

    fn detail(&self, text: &str) {
        self.detail(text);
    }

    fn swatch(&self, label: &str, hex: &str, marker: &str) {
        self.swatch(label, hex, marker);
    }

    fn success(&self, msg: &str) {
        self.success(msg);
    }

    fn warn(&self, msg: &str) {
        self.warn(msg);
    }

    fn error(&self, msg: &str) {
        self.error(msg);
    }
}
