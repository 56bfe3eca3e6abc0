//! Local TOML-backed settings table.
//!
//! Layout:
//!
//! ```toml
//! [users.<user_id>]
//! city_theme = "tokyo"
//! ```
//!
//! Upserts rewrite only the target user's table and keep every other row.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

use super::{SettingsStore, UserSettings};

#[derive(Debug, Default, Serialize, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    users: BTreeMap<String, SettingsRow>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct SettingsRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    city_theme: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_file(&self) -> Result<SettingsFile, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => Ok(toml::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(SettingsFile::default()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}

#[async_trait]
impl SettingsStore for FileSettingsStore {
    async fn fetch(&self, user_id: &str) -> Result<Option<UserSettings>, StoreError> {
        let file = self.read_file().await?;
        Ok(file.users.get(user_id).map(|row| UserSettings {
            user_id: user_id.to_string(),
            city_theme: row.city_theme.clone(),
        }))
    }

    async fn upsert(&self, settings: &UserSettings) -> Result<(), StoreError> {
        if settings.user_id.trim().is_empty() {
            return Err(StoreError::Rejected(
                "user_settings.user_id cannot be empty".to_string(),
            ));
        }
        let mut file = self.read_file().await?;
        file.users.insert(
            settings.user_id.clone(),
            SettingsRow {
                city_theme: settings.city_theme.clone(),
            },
        );
        let text = toml::to_string(&file)?;
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        // Write-then-rename so a crash never leaves a half-written table.
        let tmp = self.path.with_extension("toml.tmp");
        tokio::fs::write(&tmp, text).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        tracing::debug!(path = %self.path.display(), user = %settings.user_id, "settings upserted");
        Ok(())
    }
}
