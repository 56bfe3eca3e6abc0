use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::StoreError;

use super::{SettingsStore, UserSettings};

#[derive(Debug, Default)]
struct MemoryState {
    rows: BTreeMap<String, UserSettings>,
    /// Queued failures consumed by the next upserts, oldest first.
    failures: VecDeque<String>,
    upserts: usize,
}

/// In-memory settings table with optional latency and scripted failures.
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
    state: Arc<Mutex<MemoryState>>,
    latency: Option<Duration>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every call by `latency` to mimic a network round-trip.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            state: Arc::default(),
            latency: Some(latency),
        }
    }

    /// Seed a row without counting it as an upsert.
    pub fn insert(&self, settings: UserSettings) {
        self.lock().rows.insert(settings.user_id.clone(), settings);
    }

    /// Make the next upsert fail with `message`.
    pub fn fail_next_upsert(&self, message: impl Into<String>) {
        self.lock().failures.push_back(message.into());
    }

    pub fn upsert_count(&self) -> usize {
        self.lock().upserts
    }

    pub fn row(&self, user_id: &str) -> Option<UserSettings> {
        self.lock().rows.get(user_id).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn fetch(&self, user_id: &str) -> Result<Option<UserSettings>, StoreError> {
        self.simulate_latency().await;
        Ok(self.row(user_id))
    }

    async fn upsert(&self, settings: &UserSettings) -> Result<(), StoreError> {
        self.simulate_latency().await;
        let mut state = self.lock();
        state.upserts += 1;
        if let Some(message) = state.failures.pop_front() {
            return Err(StoreError::Rejected(message));
        }
        state
            .rows
            .insert(settings.user_id.clone(), settings.clone());
        Ok(())
    }
}
