//! Recently visited entities, persisted in a key-value store.
//!
//! Each storage key holds a JSON array of [`ActivityItem`]s, newest first.
//! Changes are announced to subscribers with the storage key that changed.

use chrono::Utc;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::constants::RECENT_ACTIVITY_MAX_ITEMS;
use crate::observers::{ObserverList, Subscription};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage key is missing")]
    MissingKey,
}

/// String key-value persistence.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Process-local store, mostly for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.lock().ok().and_then(|entries| entries.get(key).cloned()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
        Ok(())
    }
}

/// All keys kept in one JSON object on disk.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Store under the platform data directory
    pub fn in_data_dir() -> anyhow::Result<Self> {
        let dir = dirs::data_local_dir().ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Ok(Self::new(dir.join("omnisearch").join("storage.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<HashMap<String, String>, StoreError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn write_all(&self, entries: &HashMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(entries)?)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.lock();
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock();
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock();
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

/// One visited entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityItem {
    #[serde(default)]
    pub scope_key: String,
    pub kind: String,
    pub entity_id: String,
    #[serde(default)]
    pub route: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Epoch milliseconds of the last visit
    #[serde(default)]
    pub updated_at: i64,
}

impl ActivityItem {
    pub fn new(
        scope_key: impl Into<String>,
        kind: impl Into<String>,
        entity_id: impl Into<String>,
        route: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            scope_key: scope_key.into(),
            kind: kind.into(),
            entity_id: entity_id.into(),
            route: route.into(),
            title: title.into(),
            subtitle: None,
            updated_at: 0,
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    fn same_entity(&self, other: &ActivityItem) -> bool {
        self.scope_key == other.scope_key && self.kind == other.kind && self.entity_id == other.entity_id
    }
}

/// Most-recent-first activity lists with change notification.
#[derive(Clone)]
pub struct RecentActivity {
    store: Arc<dyn KeyValueStore>,
    max_items: usize,
    listeners: ObserverList<str>,
}

impl RecentActivity {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            max_items: RECENT_ACTIVITY_MAX_ITEMS,
            listeners: ObserverList::new(),
        }
    }

    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items.max(1);
        self
    }

    pub fn max_items(&self) -> usize {
        self.max_items
    }

    /// Record a visit.
    ///
    /// An earlier entry for the same scope, kind and entity is replaced and the
    /// new one goes to the front. Without a storage key nothing is recorded.
    pub fn add_item(&self, storage_key: &str, item: ActivityItem) -> Result<(), StoreError> {
        if storage_key.is_empty() {
            warn!("Recent activity: storage key is missing, item not recorded");
            return Err(StoreError::MissingKey);
        }

        let mut items = self.list(storage_key)?;
        let entry = ActivityItem {
            updated_at: Utc::now().timestamp_millis(),
            ..item
        };
        items.retain(|existing| !existing.same_entity(&entry));
        items.insert(0, entry);
        items.truncate(self.max_items);

        self.store.set(storage_key, &serde_json::to_string(&items)?)?;
        debug!("Recent activity '{}': {} item(s)", storage_key, items.len());
        self.listeners.notify(storage_key);
        Ok(())
    }

    /// Stored items, newest first. Unreadable data counts as empty.
    pub fn list(&self, storage_key: &str) -> Result<Vec<ActivityItem>, StoreError> {
        let Some(raw) = self.store.get(storage_key)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(items) => Ok(items),
            Err(e) => {
                warn!("Recent activity '{}' is malformed, starting over: {}", storage_key, e);
                Ok(Vec::new())
            }
        }
    }

    pub fn clear(&self, storage_key: &str) -> Result<(), StoreError> {
        self.store.remove(storage_key)?;
        self.listeners.notify(storage_key);
        Ok(())
    }

    /// Listen for changes; the listener receives the storage key that changed
    #[must_use = "dropping the subscription detaches the listener"]
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.listeners.subscribe(listener)
    }
}
