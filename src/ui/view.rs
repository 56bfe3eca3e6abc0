//! Account page views rendered through a `RenderSink`.

use crate::account::TabRouter;
use crate::theme::{visible_themes, ThemeState, TransitionSignal};
use crate::toast::{Toast, ToastKind};

use super::render::RenderSink;

/// Tab strip with the current tab marked.
pub fn render_tabs(sink: &dyn RenderSink, router: &TabRouter) {
    sink.section("Account");
    for tab in router.visible_tabs() {
        let marker = if tab == router.current_tab() { "*" } else { " " };
        sink.field(&format!("{marker} {}", tab.as_str()), tab.label());
    }
    sink.field("query", &format!("?{}", router.query()));
}

/// Theme picker. `>` marks the selection, `*` the saved theme.
pub fn render_themes(sink: &dyn RenderSink, state: &ThemeState, is_admin: bool) {
    let active = state.active();
    let selected = state.selected();
    sink.section("City themes");
    for meta in visible_themes(is_admin, selected, active) {
        let marker = match (meta.theme == selected, meta.theme == active) {
            (true, true) => ">*",
            (true, false) => "> ",
            (false, true) => " *",
            (false, false) => "  ",
        };
        let label = format!("{:<12} {} · {}", meta.key, meta.name, meta.description);
        sink.swatch(&label, meta.primary_color, marker);
    }
    if state.is_saving() {
        sink.detail("saving…");
    }
}

pub fn render_toast(sink: &dyn RenderSink, toast: Option<&Toast>) {
    let Some(toast) = toast else {
        return;
    };
    let msg = format!("[{}] {}", toast.scope, toast.message);
    match toast.kind {
        ToastKind::Success => sink.success(&msg),
        ToastKind::Error => sink.error(&msg),
    }
}

pub fn render_transition(sink: &dyn RenderSink, signal: &TransitionSignal) {
    match signal {
        TransitionSignal::Start { theme, label, .. } => {
            sink.field("transition", &format!("→ {label} ({})", theme.key()));
        }
        TransitionSignal::End { theme, .. } => {
            sink.field("transition", &format!("done ({})", theme.key()));
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::account::{AccountTab, QueryParams};
    use crate::theme::CityTheme;
    use crate::toast::ToastScope;
    use std::sync::Mutex;

    /// Sink that records every call as one line.
    #[derive(Default)]
    pub(crate) struct RecordingSink {
        pub(crate) lines: Mutex<Vec<String>>,
    }

    impl RecordingSink {
        fn push(&self, line: String) {
            self.lines.lock().unwrap().push(line);
        }

        pub(crate) fn lines(&self) -> Vec<String> {
            self.lines.lock().unwrap().clone()
        }
    }

    impl RenderSink for RecordingSink {
        fn section(&self, title: &str) {
            self.push(format!("section {title}"));
        }
        fn field(&self, key: &str, value: &str) {
            self.push(format!("field {key}={value}"));
        }
        fn detail(&self, text: &str) {
            self.push(format!("detail {text}"));
        }
        fn swatch(&self, label: &str, hex: &str, marker: &str) {
            self.push(format!("swatch {marker}|{label}|{hex}"));
        }
        fn success(&self, msg: &str) {
            self.push(format!("success {msg}"));
        }
        fn warn(&self, msg: &str) {
            self.push(format!("warn {msg}"));
        }
        fn error(&self, msg: &str) {
            self.push(format!("error {msg}"));
        }
    }

    #[test]
    fn tabs_hide_admin_for_regular_users() {
        let sink = RecordingSink::default();
        let router = TabRouter::new(QueryParams::parse("?tab=support"), false);
        render_tabs(&sink, &router);
        let lines = sink.lines();
        assert!(lines.contains(&"field * support=Support".to_string()));
        assert!(!lines.iter().any(|l| l.contains("admin")));
        assert_eq!(lines.last().unwrap(), "field query=?tab=support");
    }

    #[test]
    fn tabs_show_admin_for_admins() {
        let sink = RecordingSink::default();
        let router = TabRouter::new(QueryParams::new(), true);
        render_tabs(&sink, &router);
        assert_eq!(router.current_tab(), AccountTab::Profile);
        assert!(sink.lines().iter().any(|l| l.starts_with("field   admin")));
    }

    #[test]
    fn themes_mark_selection_and_active() {
        let sink = RecordingSink::default();
        let state = ThemeState::Previewing {
            active: CityTheme::Taipei,
            selected: CityTheme::Rio,
        };
        render_themes(&sink, &state, false);
        let lines = sink.lines();
        assert!(lines.iter().any(|l| l.starts_with("swatch  *|taipei")));
        assert!(lines.iter().any(|l| l.starts_with("swatch > |rio")));
        assert!(!lines.iter().any(|l| l.contains("arjeplog")));
        assert!(!lines.iter().any(|l| l.contains("santorini")));
    }

    #[test]
    fn toast_kind_picks_status_line() {
        let sink = RecordingSink::default();
        render_toast(&sink, None);
        render_toast(
            &sink,
            Some(&Toast {
                kind: ToastKind::Error,
                message: "nope".to_string(),
                scope: ToastScope::Theme,
            }),
        );
        assert_eq!(sink.lines(), vec!["error [theme] nope".to_string()]);
    }
}
