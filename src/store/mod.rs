use async_trait::async_trait;
use log::error;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::StoreError;

/// Durable string-to-string mapping shared by the repositories.
///
/// No transactions: every call is its own last-writer-wins operation.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Reads `key`, treating a backend failure the same as a missing value.
pub async fn read_or_absent(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.get(key).await {
        Ok(value) => value,
        Err(e) => {
            error!("Failed to read {} from store: {}", key, e);
            None
        }
    }
}

/// Process-local store, used for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::LockPoisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::LockPoisoned)?;
        entries.remove(key);
        Ok(())
    }
}

/// Wraps a `MemoryStore` and fails the next `get` after `fail_next_get`.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    fail_get: std::sync::atomic::AtomicBool,
}

#[cfg(test)]
impl FlakyStore {
    pub fn fail_next_get(&self) {
        self.fail_get.store(true, std::sync::atomic::Ordering::SeqCst);
    }
}

#[cfg(test)]
#[async_trait]
impl KeyValueStore for FlakyStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.fail_get.swap(false, std::sync::atomic::Ordering::SeqCst) {
            return Err(StoreError::LockPoisoned);
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.inner.remove(key).await
    }
}
