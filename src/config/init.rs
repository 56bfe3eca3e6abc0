//! `lyra init`: config paths and template installation.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::ConfigError;

use super::defaults::{APP_DIR, CONFIG_FILE_NAME, DEFAULT_LYRA_CONFIG_TEMPLATE};
use super::GlobalConfigInitResult;

/// Per-user config path (`<config root>/lyra/lyra.toml`).
pub fn default_global_config_path() -> Option<PathBuf> {
    config_root_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE_NAME))
}

/// Install the default template at the global config path.
///
/// An existing file is left alone unless `force` is set, in which case it is
/// copied to `lyra.toml.<unix-millis>.bak` first.
pub fn initialize_default_global_config(
    force: bool,
) -> Result<GlobalConfigInitResult, ConfigError> {
    let path = default_global_config_path().ok_or_else(|| {
        ConfigError::Invalid("no config directory available on this platform".to_string())
    })?;
    initialize_default_global_config_at_path(&path, force)
}

pub(super) fn initialize_default_global_config_at_path(
    path: &Path,
    force: bool,
) -> Result<GlobalConfigInitResult, ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let path_buf = path.to_path_buf();

    if !path.exists() {
        return match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(mut file) => {
                file.write_all(DEFAULT_LYRA_CONFIG_TEMPLATE.as_bytes())?;
                Ok(GlobalConfigInitResult::Created { path: path_buf })
            }
            // Lost a race with another `lyra init`; treat as pre-existing.
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                Ok(GlobalConfigInitResult::AlreadyInitialized { path: path_buf })
            }
            Err(e) => Err(e.into()),
        };
    }
    if !force {
        return Ok(GlobalConfigInitResult::AlreadyInitialized { path: path_buf });
    }

    let backup_path = backup_path_for(path);
    std::fs::copy(path, &backup_path)?;
    std::fs::write(path, DEFAULT_LYRA_CONFIG_TEMPLATE)?;
    tracing::info!(backup = %backup_path.display(), "replaced existing config");
    Ok(GlobalConfigInitResult::Overwritten {
        path: path_buf,
        backup_path,
    })
}

fn backup_path_for(path: &Path) -> PathBuf {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| CONFIG_FILE_NAME.into());
    name.push(format!(".{millis}.bak"));
    path.with_file_name(name)
}

/// `$XDG_CONFIG_HOME` when set, else `~/.config`, else the platform config dir.
pub fn config_root_dir() -> Option<PathBuf> {
    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .or_else(dirs::config_dir)
}
