//! CLI entry point for lyra.

mod cli;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use lyra::account::avatar::{avatar_svg, avatar_text};
use lyra::account::{apply_boot_theme, AccountDeps, AccountPage, AccountTab, QueryParams};
use lyra::config::{initialize_default_global_config, load_config, GlobalConfigInitResult};
use lyra::error::AccountError;
use lyra::portal::{make_token, portal_url};
use lyra::store::FileSettingsStore;
use lyra::theme::{
    visible_themes, ApplyOutcome, CityTheme, DocumentTheme, FileThemeCache, TransitionSignal,
};
use lyra::toast::ToastScope;
use lyra::ui::render::Renderer;
use lyra::ui::view::{render_tabs, render_themes, render_toast, render_transition};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let args = cli::Args::parse();

    if let Some(cli::Command::Init { force }) = args.command {
        let renderer = Renderer::new(!args.no_color);
        return run_init(&renderer, force);
    }

    let mut config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(user) = &args.user {
        config.account.user_id = Some(user.clone());
    }
    if args.admin {
        config.account.admin = true;
    }
    if args.no_color {
        config.display.color = false;
    }
    let renderer = Renderer::new(config.display.color);

    let cache = Arc::new(FileThemeCache::new(
        config.storage.resolved_theme_cache_path(),
    ));
    let applier = Arc::new(DocumentTheme::new());
    let boot = apply_boot_theme(cache.as_ref(), applier.as_ref());
    tracing::debug!(theme = %boot, "boot theme applied");

    let deps = AccountDeps {
        store: Arc::new(FileSettingsStore::new(
            config.storage.resolved_settings_path(),
        )),
        applier,
        cache,
    };
    let mut page = AccountPage::new(&config, QueryParams::parse(&args.query), deps);
    let mut signals = page.subscribe_transitions();

    if page.user_id().is_some() && page.load().await.is_err() {
        render_toast(&renderer, page.render_toast(ToastScope::Profile).as_ref());
        return ExitCode::FAILURE;
    }

    let result = match args.command {
        None => {
            render_tabs(&renderer, page.tabs());
            render_themes(&renderer, &page.themes().state(), page.is_admin());
            Ok(ExitCode::SUCCESS)
        }
        Some(cli::Command::Themes { json: false }) => {
            render_themes(&renderer, &page.themes().state(), page.is_admin());
            Ok(ExitCode::SUCCESS)
        }
        Some(cli::Command::Themes { json: true }) => {
            let state = page.themes().state();
            let visible = visible_themes(page.is_admin(), state.selected(), state.active());
            match serde_json::to_string_pretty(&visible) {
                Ok(json) => {
                    renderer.detail(&json);
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    renderer.error(&format!("failed to encode themes: {e}"));
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Some(cli::Command::Apply { theme }) => {
            run_apply(&renderer, &page, &mut signals, &theme).await
        }
        Some(cli::Command::Tab { tab }) => run_tab(&renderer, &mut page, tab.as_deref()),
        Some(cli::Command::PortalToken { length }) => {
            let token = make_token(length.unwrap_or(config.portal.token_length));
            renderer.section("Public portal");
            renderer.field("token", &token);
            renderer.detail(&portal_url(
                &config.portal.origin,
                &config.portal.base,
                &token,
            ));
            Ok(ExitCode::SUCCESS)
        }
        Some(cli::Command::Avatar { name, theme, svg }) => {
            run_avatar(&renderer, &page, &name, theme.as_deref(), svg)
        }
        Some(cli::Command::Init { .. }) => Ok(ExitCode::SUCCESS),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            renderer.error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

/// Structured logs go to stderr; `LYRA_LOG` sets the filter (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_env("LYRA_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .with(filter)
        .init();
}

fn run_init(renderer: &Renderer, force: bool) -> ExitCode {
    match initialize_default_global_config(force) {
        Ok(GlobalConfigInitResult::Created { path }) => {
            renderer.success(&format!("wrote {}", path.display()));
            ExitCode::SUCCESS
        }
        Ok(GlobalConfigInitResult::AlreadyInitialized { path }) => {
            renderer.warn(&format!(
                "{} already exists; pass --force to overwrite",
                path.display()
            ));
            ExitCode::SUCCESS
        }
        Ok(GlobalConfigInitResult::Overwritten { path, backup_path }) => {
            renderer.success(&format!(
                "wrote {} (previous saved to {})",
                path.display(),
                backup_path.display()
            ));
            ExitCode::SUCCESS
        }
        Err(e) => {
            renderer.error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

async fn run_apply(
    renderer: &Renderer,
    page: &AccountPage,
    signals: &mut mpsc::UnboundedReceiver<TransitionSignal>,
    raw: &str,
) -> Result<ExitCode, AccountError> {
    let themes = page.themes();
    let target = match raw.trim() {
        "next" => themes.preview_next(page.is_admin()),
        "prev" => themes.preview_prev(page.is_admin()),
        other => themes.select_by_key(other, page.is_admin())?,
    };
    tracing::debug!(theme = %target, "theme selected");

    let outcome = themes.apply_theme().await;
    drain_transition(renderer, signals).await;
    render_toast(renderer, page.render_toast(ToastScope::Theme).as_ref());

    match outcome {
        ApplyOutcome::Saved { .. } => Ok(ExitCode::SUCCESS),
        ApplyOutcome::Failed { .. } => Ok(ExitCode::FAILURE),
        ApplyOutcome::Skipped => Err(AccountError::NotSignedIn),
    }
}

/// Print transition signals until the overlay (if any) has been dismissed.
async fn drain_transition(
    renderer: &Renderer,
    signals: &mut mpsc::UnboundedReceiver<TransitionSignal>,
) {
    let mut overlay_up = false;
    while let Ok(signal) = signals.try_recv() {
        overlay_up = matches!(signal, TransitionSignal::Start { .. });
        render_transition(renderer, &signal);
    }
    while overlay_up {
        let Some(signal) = signals.recv().await else {
            break;
        };
        overlay_up = matches!(signal, TransitionSignal::Start { .. });
        render_transition(renderer, &signal);
    }
}

fn run_tab(
    renderer: &Renderer,
    page: &mut AccountPage,
    raw: Option<&str>,
) -> Result<ExitCode, AccountError> {
    if let Some(raw) = raw {
        let tab: AccountTab = raw.trim().parse()?;
        let query = page.set_tab(tab)?;
        renderer.detail(&format!("?{query}"));
    }
    render_tabs(renderer, page.tabs());
    Ok(ExitCode::SUCCESS)
}

fn run_avatar(
    renderer: &Renderer,
    page: &AccountPage,
    name: &str,
    theme: Option<&str>,
    svg: bool,
) -> Result<ExitCode, AccountError> {
    let theme = match theme {
        Some(raw) => raw.parse::<CityTheme>()?,
        None => page.themes().active_theme(),
    };
    let text = avatar_text(name);
    if svg {
        renderer.detail(&avatar_svg(&text, theme));
    } else {
        renderer.section("Avatar");
        renderer.field("theme", theme.label());
        renderer.detail(&text);
    }
    Ok(ExitCode::SUCCESS)
}
