use std::fs;
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde_json::Value;

use super::errors::StoreError;
use super::KeyValueStore;

/// One pretty-printed `<namespace>.json` file per namespace.
///
/// Reads take a shared lock and writes an exclusive lock, so two processes
/// pointed at the same directory never observe a half-written document.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn namespace_path(&self, namespace: &str) -> Result<PathBuf, StoreError> {
        let valid = !namespace.is_empty()
            && namespace
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidNamespace(namespace.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", namespace)))
    }
}

fn write_truncated(file: &mut fs::File, bytes: &[u8]) -> std::io::Result<()> {
    file.set_len(0)?;
    file.write_all(bytes)?;
    file.flush()?;
    file.sync_all()
}

impl KeyValueStore for JsonFileStore {
    fn load(&self, namespace: &str) -> Result<Option<Value>, StoreError> {
        let path = self.namespace_path(namespace)?;
        let mut file = match fs::OpenOptions::new().read(true).open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        file.lock_shared()?;
        let mut contents = String::new();
        let read = file.read_to_string(&mut contents);
        let _ = file.unlock();
        read?;

        // Interrupted writes have been seen to leave leading NULs behind.
        let cleaned = contents.trim_start_matches('\0');
        if cleaned.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(cleaned)?))
    }

    fn save(&self, namespace: &str, data: &Value) -> Result<(), StoreError> {
        let path = self.namespace_path(namespace)?;
        let contents = serde_json::to_string_pretty(data)?;
        let mut file = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&path)?;
        file.lock_exclusive()?;
        let result = write_truncated(&mut file, contents.as_bytes());
        let _ = file.unlock();
        result?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_as_absent() {
        let dir = TempDir::new().expect("tempdir");
        let store = JsonFileStore::open(dir.path()).expect("store");
        assert!(store.load("freedle-stats").expect("load").is_none());
    }

    #[test]
    fn save_overwrites_whole_document() {
        let dir = TempDir::new().expect("tempdir");
        let store = JsonFileStore::open(dir.path()).expect("store");
        store
            .save("freedle-settings", &json!({ "wordLength": 6, "hardMode": true }))
            .expect("first save");
        store
            .save("freedle-settings", &json!({ "wordLength": 4 }))
            .expect("second save");

        let loaded = store.load("freedle-settings").expect("load").expect("present");
        assert_eq!(loaded, json!({ "wordLength": 4 }));
        assert!(dir.path().join("freedle-settings.json").exists());
    }

    #[test]
    fn open_creates_nested_directory() {
        let dir = TempDir::new().expect("tempdir");
        let nested = dir.path().join("data").join("json");
        let store = JsonFileStore::open(&nested).expect("store");
        assert_eq!(store.dir(), nested.as_path());
        assert!(store.dir().is_dir());

        store
            .save("freedle-stats", &json!({ "gamesPlayed": 1 }))
            .expect("save");
        assert!(store.dir().join("freedle-stats.json").is_file());
    }

    #[test]
    fn leading_nuls_are_ignored() {
        let dir = TempDir::new().expect("tempdir");
        let store = JsonFileStore::open(dir.path()).expect("store");
        fs::write(
            dir.path().join("freedle-stats.json"),
            b"\0\0{\"gamesPlayed\": 7}",
        )
        .expect("raw write");
        let loaded = store.load("freedle-stats").expect("load").expect("present");
        assert_eq!(loaded["gamesPlayed"], 7);
    }

    #[test]
    fn path_separators_in_namespace_are_rejected() {
        let dir = TempDir::new().expect("tempdir");
        let store = JsonFileStore::open(dir.path()).expect("store");
        assert!(matches!(
            store.load("../escape"),
            Err(StoreError::InvalidNamespace(_))
        ));
    }
}
