use std::path::{Path, PathBuf};

use serde_json::Value;

use super::errors::StoreError;
use super::KeyValueStore;

const TREE_NAMESPACES: &str = "freedle_namespaces";

/// Helper builder so tests can easily create throwaway stores with custom paths.
pub struct SledStoreBuilder {
    path: PathBuf,
    temporary: bool,
}

impl SledStoreBuilder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            temporary: false,
        }
    }

    /// Remove the database files when the last handle is dropped.
    pub fn temporary(mut self) -> Self {
        self.temporary = true;
        self
    }

    pub fn open(self) -> Result<SledStore, StoreError> {
        SledStore::open_with_options(self.path, self.temporary)
    }
}

/// Sled-backed persistence: one tree, namespace bytes as keys, JSON documents as values.
pub struct SledStore {
    _db: sled::Db,
    namespaces: sled::Tree,
}

impl SledStore {
    /// Open (or create) the store rooted at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        Self::open_with_options(path, false)
    }

    fn open_with_options<P: AsRef<Path>>(path: P, temporary: bool) -> Result<Self, StoreError> {
        let path_ref = path.as_ref();
        std::fs::create_dir_all(path_ref)?;
        let db = sled::Config::new()
            .path(path_ref)
            .temporary(temporary)
            .open()?;
        let namespaces = db.open_tree(TREE_NAMESPACES)?;
        Ok(Self {
            _db: db,
            namespaces,
        })
    }

    fn namespace_key(namespace: &str) -> Result<Vec<u8>, StoreError> {
        if namespace.is_empty() {
            return Err(StoreError::InvalidNamespace("empty namespace".to_string()));
        }
        Ok(format!("ns:{}", namespace).into_bytes())
    }

    /// List all namespaces currently stored.
    pub fn list_namespaces(&self) -> Result<Vec<String>, StoreError> {
        let mut names = Vec::new();
        for entry in self.namespaces.scan_prefix(b"ns:") {
            let (key, _) = entry?;
            let text = String::from_utf8_lossy(&key);
            if let Some(name) = text.strip_prefix("ns:") {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }
}

impl KeyValueStore for SledStore {
    fn load(&self, namespace: &str) -> Result<Option<Value>, StoreError> {
        let key = Self::namespace_key(namespace)?;
        let Some(bytes) = self.namespaces.get(&key)? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    fn save(&self, namespace: &str, data: &Value) -> Result<(), StoreError> {
        let key = Self::namespace_key(namespace)?;
        let bytes = serde_json::to_vec(data)?;
        self.namespaces.insert(key, bytes)?;
        self.namespaces.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn store_round_trip_namespace() {
        let dir = TempDir::new().expect("tempdir");
        let store = SledStoreBuilder::new(dir.path().join("scratch.db"))
            .temporary()
            .open()
            .expect("store");
        assert!(store.load("freedle-stats").expect("load").is_none());

        let doc = json!({ "gamesPlayed": 3, "gamesWon": 2 });
        store.save("freedle-stats", &doc).expect("save");
        let fetched = store.load("freedle-stats").expect("load");
        assert_eq!(fetched, Some(doc));
        assert_eq!(store.list_namespaces().expect("list"), vec!["freedle-stats"]);
    }

    #[test]
    fn values_survive_reopen() {
        let dir = TempDir::new().expect("tempdir");
        {
            let store = SledStore::open(dir.path()).expect("store");
            store
                .save("freedle-settings", &json!({ "wordLength": 6 }))
                .expect("save");
        }
        let store = SledStore::open(dir.path()).expect("reopen store");
        let fetched = store.load("freedle-settings").expect("load").expect("present");
        assert_eq!(fetched["wordLength"], 6);
    }

    #[test]
    fn corrupt_bytes_surface_as_json_error() {
        let dir = TempDir::new().expect("tempdir");
        let store = SledStore::open(dir.path()).expect("store");
        store
            .namespaces
            .insert(b"ns:freedle-stats", &b"{not json"[..])
            .expect("raw insert");
        assert!(matches!(
            store.load("freedle-stats"),
            Err(StoreError::Json(_))
        ));
    }

    #[test]
    fn empty_namespace_is_rejected() {
        let dir = TempDir::new().expect("tempdir");
        let store = SledStore::open(dir.path()).expect("store");
        assert!(matches!(
            store.save("", &json!({})),
            Err(StoreError::InvalidNamespace(_))
        ));
    }
}
