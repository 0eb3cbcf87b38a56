use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use serde::{de::DeserializeOwned, Serialize};

use crate::CoreError;

/// Storage key holding the serialized expense list.
pub const EXPENSES_KEY: &str = "budget-expenses";
/// Storage key holding the serialized settings object.
pub const SETTINGS_KEY: &str = "budget-settings";

/// Abstraction over raw key-value backends holding serialized text blobs.
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored text for `key`, or `None` when nothing is stored.
    fn read(&self, key: &str) -> Result<Option<String>, CoreError>;
    /// Replaces whatever is stored under `key`.
    fn write(&self, key: &str, value: &str) -> Result<(), CoreError>;
}

/// Fail-soft JSON layer over a [`KeyValueStore`].
///
/// Reads fall back to the caller's default and writes log their failures;
/// neither ever surfaces an error to the caller.
#[derive(Debug, Clone)]
pub struct StorageAdapter<S> {
    backend: S,
}

impl<S: KeyValueStore> StorageAdapter<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Loads and deserializes `key`, returning `default` when the entry is
    /// missing, unreadable, or not valid JSON for `T`.
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let raw = match self.backend.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(key, "no stored value, using default");
                return default;
            }
            Err(err) => {
                tracing::warn!(key, error = %err, "failed to read stored value, using default");
                return default;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key, error = %err, "stored value is corrupt, using default");
                default
            }
        }
    }

    /// Serializes and writes `value` under `key`. Failures are logged only;
    /// the in-memory state stays authoritative for the session.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        if let Err(err) = self.try_save(key, value) {
            tracing::error!(key, error = %err, "failed to persist value");
        }
    }

    fn try_save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CoreError> {
        let json = serde_json::to_string(value)?;
        self.backend.write(key, &json)
    }
}

/// Process-local backend. Clones share the same map, so a test can keep a
/// handle while a store owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    entries: HashMap<String, String>,
    writes: Vec<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds raw text under `key` without recording a write.
    pub fn insert_raw(&self, key: &str, value: &str) {
        if let Ok(mut state) = self.inner.lock() {
            state.entries.insert(key.to_string(), value.to_string());
        }
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner
            .lock()
            .ok()
            .and_then(|state| state.entries.get(key).cloned())
    }

    /// Keys in the order they were written.
    pub fn write_log(&self) -> Vec<String> {
        self.inner
            .lock()
            .map(|state| state.writes.clone())
            .unwrap_or_default()
    }

    pub fn write_count(&self, key: &str) -> usize {
        self.write_log().iter().filter(|written| *written == key).count()
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, CoreError> {
        let state = self
            .inner
            .lock()
            .map_err(|_| CoreError::Storage("memory store lock poisoned".into()))?;
        Ok(state.entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let mut state = self
            .inner
            .lock()
            .map_err(|_| CoreError::Storage("memory store lock poisoned".into()))?;
        state.entries.insert(key.to_string(), value.to_string());
        state.writes.push(key.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spendlog_domain::{Currency, Settings};

    #[test]
    fn load_returns_default_when_missing() {
        let adapter = StorageAdapter::new(MemoryStore::new());
        let loaded: Vec<String> = adapter.load("absent", vec!["fallback".to_string()]);
        assert_eq!(loaded, vec!["fallback".to_string()]);
    }

    #[test]
    fn corrupted_settings_blob_yields_default_unchanged() {
        let backend = MemoryStore::new();
        backend.insert_raw(SETTINGS_KEY, "{\"currency\": \"USD\", \"categ");
        let adapter = StorageAdapter::new(backend);

        let loaded = adapter.load(SETTINGS_KEY, Settings::default());
        assert_eq!(loaded, Settings::default());
    }

    #[test]
    fn save_then_load_round_trips_settings() {
        let backend = MemoryStore::new();
        let adapter = StorageAdapter::new(backend.clone());
        let mut settings = Settings::default();
        settings.currency = Currency::EUR;

        adapter.save(SETTINGS_KEY, &settings);

        assert_eq!(backend.write_count(SETTINGS_KEY), 1);
        assert_eq!(adapter.load(SETTINGS_KEY, Settings::default()), settings);
    }
}
