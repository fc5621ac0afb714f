//! Magazyn snapshotów: klucz → dokument JSON.
//!
//! Klucze to segmenty `[A-Za-z0-9_-]` rozdzielone `/`, np. `roster/current`, `roster/1430`,
//! `members`, `achievers/s3`. `FileStore` mapuje klucz `a/b` na `<root>/a/b.json`.

use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;

use crate::error::StoreError;
use crate::roster::{Roster, RosterEntry};

/// Etykieta „najświeższego” snapshotu – zawsze nadpisywana.
pub const CURRENT: &str = "current";

const ROSTER_NS: &str = "roster";

/// Surowy interfejs get/put na bajtach. Brak klucza → `Ok(None)`.
///
/// Kodowanie (UTF-8, JSON) sprawdza dopiero `load_json` – złe bajty to `Malformed`, nie `Read`.
pub trait SnapshotStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;
    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;
}

pub fn validate_key(key: &str) -> Result<(), StoreError> {
    let ok = !key.is_empty()
        && key.split('/').all(|seg| {
            !seg.is_empty()
                && seg
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        });
    if ok {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

pub fn roster_key(label: &str) -> String {
    format!("{ROSTER_NS}/{label}")
}

/* =========================
   Typowane odczyty/zapisy
   ========================= */

/// Odczyt dokumentu JSON. Brak → `Ok(None)`, śmieci → `StoreError::Malformed`.
pub fn load_json<T: DeserializeOwned>(
    store: &dyn SnapshotStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_slice(&raw)
        .map(Some)
        .map_err(|source| StoreError::Malformed {
            key: key.to_string(),
            source,
        })
}

pub fn save_json<T: Serialize + ?Sized>(
    store: &dyn SnapshotStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let raw = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.put(key, &raw)
}

/// Zapisuje ranking pod etykietą (nadpisuje bez pytania).
pub fn save_roster(
    store: &dyn SnapshotStore,
    entries: &[RosterEntry],
    label: &str,
) -> Result<(), StoreError> {
    let key = roster_key(label);
    save_json(store, &key, entries)?;
    tracing::debug!(label, entries = entries.len(), "roster snapshot saved");
    Ok(())
}

/// Wczytuje ranking spod etykiety. Brak snapshotu = pusty ranking.
pub fn load_roster(store: &dyn SnapshotStore, label: &str) -> Result<Roster, StoreError> {
    let key = roster_key(label);
    match load_json::<Roster>(store, &key)? {
        Some(roster) => Ok(roster),
        None => {
            tracing::debug!(label, "no roster snapshot, treating as empty");
            Ok(Vec::new())
        }
    }
}

/* =========================
   FileStore
   ========================= */

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        let mut path = self.root.clone();
        for seg in key.split('/') {
            path.push(seg);
        }
        path.set_extension("json");
        Ok(path)
    }
}

impl SnapshotStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let write_err = |source: std::io::Error| StoreError::Write {
            key: key.to_string(),
            source,
        };

        let dir = path.parent().unwrap_or(self.root.as_path());
        fs::create_dir_all(dir).map_err(write_err)?;

        // tmp w tym samym katalogu + rename → czytelnik nigdy nie widzi połowy pliku
        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(value).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(&path).map_err(|e| write_err(e.error))?;
        Ok(())
    }
}

/* =========================
   MemoryStore (testy, dry-run)
   ========================= */

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(self, key: &str, value: impl AsRef<[u8]>) -> Self {
        self.entries().insert(key.to_string(), value.as_ref().to_vec());
        self
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries().keys().cloned().collect();
        keys.sort();
        keys
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SnapshotStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        validate_key(key)?;
        Ok(self.entries().get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        validate_key(key)?;
        self.entries().insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_validated() {
        assert!(validate_key("roster/current").is_ok());
        assert!(validate_key("achievers/season_3").is_ok());
        assert!(validate_key("members").is_ok());

        for bad in ["", "/", "roster/", "../etc", "roster/../x", "a b", "roster\\x", "ró"] {
            assert!(
                matches!(validate_key(bad), Err(StoreError::InvalidKey(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn file_store_maps_keys_to_json_files() {
        let store = FileStore::new("/data");
        assert_eq!(
            store.path_for("roster/1430").unwrap(),
            PathBuf::from("/data/roster/1430.json")
        );
    }

    #[test]
    fn missing_roster_is_empty() {
        let store = MemoryStore::new();
        assert!(load_roster(&store, "nonexistent").unwrap().is_empty());
    }

    #[test]
    fn malformed_roster_is_an_error() {
        let store = MemoryStore::new().with_entry("roster/current", "{ not json");
        let err = load_roster(&store, CURRENT).unwrap_err();
        assert!(err.is_malformed());
        assert_eq!(err.key(), "roster/current");

        // poprawny JSON, zły kształt
        let store = MemoryStore::new().with_entry("roster/current", r#"{"nick":"Ace"}"#);
        assert!(load_roster(&store, CURRENT).unwrap_err().is_malformed());

        // bajty spoza UTF-8 w nicku
        let store = MemoryStore::new()
            .with_entry("roster/current", b"[{\"nick\":\"\xff\",\"points\":1}]");
        assert!(load_roster(&store, CURRENT).unwrap_err().is_malformed());
    }

    #[test]
    fn save_overwrites_label() {
        let store = MemoryStore::new();
        save_roster(&store, &[RosterEntry::new("Ace", 1)], "1200").unwrap();
        save_roster(&store, &[RosterEntry::new("Bob", 2)], "1200").unwrap();
        assert_eq!(
            load_roster(&store, "1200").unwrap(),
            vec![RosterEntry::new("Bob", 2)]
        );
        assert_eq!(store.keys(), vec!["roster/1200".to_string()]);
    }

    #[test]
    fn invalid_label_is_rejected_before_io() {
        let store = MemoryStore::new();
        let err = save_roster(&store, &[], "../../etc/passwd").unwrap_err();
        assert!(matches!(err, StoreError::InvalidKey(_)));
    }
}
