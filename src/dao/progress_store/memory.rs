use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use dashmap::DashMap;
use futures::future::BoxFuture;

use super::KeyValueStore;
use crate::dao::storage::{StorageError, StorageResult};

/// Process-local key-value store, used for ephemeral sessions and tests.
#[derive(Clone, Default)]
pub struct MemoryKeyValueStore {
    slots: Arc<DashMap<String, String>>,
    disabled: Arc<AtomicBool>,
}

impl MemoryKeyValueStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a disabled storage area: every subsequent call fails.
    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.store(disabled, Ordering::SeqCst);
    }

    /// Read a slot synchronously, bypassing the disabled flag.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.slots.get(key).map(|entry| entry.value().clone())
    }

    fn check_enabled(&self) -> StorageResult<()> {
        if self.disabled.load(Ordering::SeqCst) {
            Err(StorageError::Disabled)
        } else {
            Ok(())
        }
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> BoxFuture<'static, StorageResult<Option<String>>> {
        let result = self.check_enabled().map(|()| self.peek(key));
        Box::pin(async move { result })
    }

    fn set(&self, key: &str, value: String) -> BoxFuture<'static, StorageResult<()>> {
        let result = self.check_enabled().map(|()| {
            self.slots.insert(key.to_string(), value);
        });
        Box::pin(async move { result })
    }

    fn remove(&self, key: &str) -> BoxFuture<'static, StorageResult<()>> {
        let result = self.check_enabled().map(|()| {
            self.slots.remove(key);
        });
        Box::pin(async move { result })
    }
}
