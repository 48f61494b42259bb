use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::Value;

use super::errors::StoreError;
use super::KeyValueStore;

#[derive(Default)]
struct Inner {
    values: Mutex<HashMap<String, Value>>,
    fail_writes: AtomicBool,
    writes: Mutex<u64>,
}

/// In-process store. Clones share the same map, so a test can hand one
/// handle to a store and keep another to inspect what was written.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `save` fail with [`StoreError::Unavailable`].
    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful writes since creation.
    pub fn write_count(&self) -> u64 {
        self.inner.writes.lock().map(|w| *w).unwrap_or(0)
    }

    /// Seed a raw value, bypassing the failure switch.
    pub fn insert_raw(&self, namespace: &str, data: Value) {
        if let Ok(mut values) = self.inner.values.lock() {
            values.insert(namespace.to_string(), data);
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, namespace: &str) -> Result<Option<Value>, StoreError> {
        let values = self
            .inner
            .values
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))?;
        Ok(values.get(namespace).cloned())
    }

    fn save(&self, namespace: &str, data: &Value) -> Result<(), StoreError> {
        if self.inner.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(format!(
                "writes disabled for {}",
                namespace
            )));
        }
        let mut values = self
            .inner
            .values
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))?;
        values.insert(namespace.to_string(), data.clone());
        if let Ok(mut writes) = self.inner.writes.lock() {
            *writes += 1;
        }
        Ok(())
    }
}
