//! `LYRA_*` environment overrides.

use crate::error::ConfigError;

use super::Config;

pub(super) fn apply_runtime_env_overrides<FEnv>(
    config: &mut Config,
    env_lookup: &FEnv,
) -> Result<(), ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(user) = env_lookup("LYRA_USER_ID") {
        let trimmed = user.trim();
        config.account.user_id = (!trimmed.is_empty()).then(|| trimmed.to_string());
    }
    if let Some(admin) = env_lookup("LYRA_ADMIN") {
        config.account.admin = parse_bool("LYRA_ADMIN", &admin)?;
    }
    if let Some(ms) = env_lookup("LYRA_MIN_OVERLAY_MS") {
        config.theme.min_overlay_ms = parse_millis("LYRA_MIN_OVERLAY_MS", &ms)?;
    }
    if let Some(ms) = env_lookup("LYRA_TOAST_TTL_MS") {
        // A zero TTL would clear toasts before anything could render them.
        config.toast.ttl_ms = parse_millis("LYRA_TOAST_TTL_MS", &ms)?.max(1);
    }
    if let Some(path) = env_lookup("LYRA_SETTINGS_PATH") {
        config.storage.settings_path = Some(path);
    }
    if let Some(path) = env_lookup("LYRA_THEME_CACHE_PATH") {
        config.storage.theme_cache_path = Some(path);
    }
    Ok(())
}

fn parse_bool(name: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(ConfigError::Invalid(format!(
            "invalid {name} value `{other}`: expected true/false"
        ))),
    }
}

fn parse_millis(name: &str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse::<u64>().map_err(|_| {
        ConfigError::Invalid(format!(
            "invalid {name} value `{raw}`: expected non-negative integer milliseconds"
        ))
    })
}
