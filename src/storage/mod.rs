//! # Storage Module - Namespaced Key-Value Persistence
//!
//! The stats and settings stores persist their whole state as one JSON
//! document per namespace. This module defines that contract
//! ([`KeyValueStore`]) and the backends that fulfil it.
//!
//! ## Backends
//!
//! - [`SledStore`] - embedded sled database (default)
//! - [`JsonFileStore`] - one lock-protected `<namespace>.json` file per namespace
//! - [`MemoryStore`] - in-process map, used by tests and throwaway sessions
//!
//! ## Layout
//!
//! ```text
//! data/
//! ├── freedle.db/              ← sled backend
//! └── json/
//!     ├── freedle-stats.json   ← json backend
//!     └── freedle-settings.json
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use freedle::storage::{KeyValueStore, SledStore};
//!
//! fn main() -> anyhow::Result<()> {
//!     let store = SledStore::open("./data/freedle.db")?;
//!     store.save("freedle-settings", &serde_json::json!({ "wordLength": 6 }))?;
//!     let doc = store.load("freedle-settings")?;
//!     println!("{:?}", doc);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Backends report failures as [`StoreError`]. The game stores never let
//! those escape: a failed load falls back to defaults and a failed save is
//! logged while the in-memory state stands.

use std::path::Path;
use std::sync::Arc;

use log::debug;
use serde_json::Value;

use crate::config::{StorageBackend, StorageConfig};

pub mod errors;
pub mod json_file;
pub mod memory;
pub mod sled_store;

pub use errors::StoreError;
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use sled_store::{SledStore, SledStoreBuilder};

/// Namespace holding the aggregate statistics document.
pub const STATS_NAMESPACE: &str = "freedle-stats";
/// Namespace holding the user settings document.
pub const SETTINGS_NAMESPACE: &str = "freedle-settings";

/// Durable key-value store keyed by namespace.
///
/// `load` returns `Ok(None)` when the namespace was never written. `save`
/// replaces the entire value stored under the namespace.
pub trait KeyValueStore: Send + Sync {
    fn load(&self, namespace: &str) -> Result<Option<Value>, StoreError>;
    fn save(&self, namespace: &str, data: &Value) -> Result<(), StoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn load(&self, namespace: &str) -> Result<Option<Value>, StoreError> {
        (**self).load(namespace)
    }

    fn save(&self, namespace: &str, data: &Value) -> Result<(), StoreError> {
        (**self).save(namespace, data)
    }
}

/// Shared handle passed to both game stores.
pub type SharedStore = Arc<dyn KeyValueStore>;

/// Open the backend selected by the storage configuration.
pub fn open_store(config: &StorageConfig) -> Result<SharedStore, StoreError> {
    let data_dir = Path::new(&config.data_dir);
    let backend = config.backend_kind();
    let store: SharedStore = match backend {
        StorageBackend::Sled => Arc::new(SledStore::open(data_dir.join("freedle.db"))?),
        StorageBackend::Json => Arc::new(JsonFileStore::open(data_dir.join("json"))?),
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
    };
    debug!(
        "storage: opened {:?} backend under {}",
        backend, config.data_dir
    );
    Ok(store)
}
