//! User settings persistence.
//!
//! The hosted backend owns the `user_settings` record; this crate only needs
//! upsert-by-user and fetch. `SettingsStore` is the seam, with an in-memory
//! implementation for tests and a local TOML file for the CLI.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

mod file;
mod memory;

pub use file::FileSettingsStore;
pub use memory::MemorySettingsStore;

/// One user's settings row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_theme: Option<String>,
}

impl UserSettings {
    pub fn with_theme(user_id: impl Into<String>, city_theme: &str) -> Self {
        Self {
            user_id: user_id.into(),
            city_theme: Some(city_theme.to_string()),
        }
    }
}

/// Backend contract for the settings record.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Fetch the row for `user_id`, `None` when it does not exist yet.
    async fn fetch(&self, user_id: &str) -> Result<Option<UserSettings>, StoreError>;
    /// Insert or replace the row keyed by `settings.user_id`.
    async fn upsert(&self, settings: &UserSettings) -> Result<(), StoreError>;
}
