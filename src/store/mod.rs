//! Storage abstraction layer for curated collections and preferences.
//!
//! The backend is a plain string key-value contract. [`PersistentStore`]
//! sits on top of it and turns every load or save failure into a log line:
//! a broken store degrades to empty or non-durable state, never to an error
//! the user sees.

pub mod memory;
pub mod sqlite;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::error::StoreError;
use crate::types::{Generation, Idea, Theme};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub const HISTORY_KEY: &str = "coinspark.history";
pub const PINNED_KEY: &str = "coinspark.pinnedIdeas";
pub const THEME_KEY: &str = "coinspark.theme";

/// Formal contract for a persistent string key-value backend.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `None` if the key was never written.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Typed, failure-tolerant access to the backend.
#[derive(Clone)]
pub struct PersistentStore {
    backend: Arc<dyn KeyValueStore>,
}

impl PersistentStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Load a JSON array stored under `key`. Absent, unreadable or
    /// wrongly shaped values all yield an empty collection.
    #[instrument(skip(self))]
    pub async fn load_collection<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let raw = match self.backend.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No stored value for {}", key);
                return Vec::new();
            }
            Err(e) => {
                warn!("Failed to read {} from store: {}", key, e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(items) => {
                debug!("Loaded {} entries from {}", items.len(), key);
                items
            }
            Err(e) => {
                warn!("Discarding corrupt value under {}: {}", key, e);
                Vec::new()
            }
        }
    }

    /// Serialize `items` under `key`. Failures are logged and dropped.
    #[instrument(skip(self, items), fields(count = items.len()))]
    pub async fn save_collection<T: Serialize>(&self, key: &str, items: &[T]) {
        let raw = match serde_json::to_string(items) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to serialize {}: {}", key, e);
                return;
            }
        };

        if let Err(e) = self.backend.set(key, &raw).await {
            warn!("Failed to save {}: {}; changes will not survive a restart", key, e);
        }
    }

    pub async fn load_history(&self) -> Vec<Generation> {
        self.load_collection(HISTORY_KEY).await
    }

    pub async fn load_pinned(&self) -> Vec<Idea> {
        self.load_collection(PINNED_KEY).await
    }

    /// Stored theme preference, or the default theme.
    pub async fn load_theme(&self) -> Theme {
        match self.backend.get(THEME_KEY).await {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|e| {
                warn!("Ignoring stored theme: {}", e);
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                warn!("Failed to read theme preference: {}", e);
                Theme::default()
            }
        }
    }

    pub async fn save_theme(&self, theme: Theme) {
        if let Err(e) = self.backend.set(THEME_KEY, theme.as_str()).await {
            warn!("Failed to save theme preference: {}", e);
        }
    }
}
