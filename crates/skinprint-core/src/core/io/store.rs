use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Well-known keys under which user state is persisted.
pub mod keys {
    pub const CHECKINS: &str = "checkins";
    pub const SURVEY_DATA: &str = "survey_data";
    pub const USER_ROUTINE: &str = "user_routine";
    pub const USER_PREFERENCES: &str = "user_preferences";
    pub const ONBOARDING_COMPLETE: &str = "onboarding_complete";
    pub const SCANNED_PRODUCT: &str = "scanned_product";
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: io::Error,
    },
    #[error("Store JSON error for '{path}': {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    #[error("Store entry '{key}' in '{path}' is unreadable: {source}")]
    Entry {
        path: String,
        key: String,
        source: serde_json::Error,
    },
}

/// A JSON key-value document on disk holding all persisted user state.
///
/// Reads and writes go to an in-memory map; nothing touches the disk until [`Store::save`].
/// The store is single-user and single-process and does no locking.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
    entries: BTreeMap<String, Value>,
}

impl Store {
    /// Opens the store at `path`. A missing file yields an empty store.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let entries = match File::open(path) {
            Ok(file) => Self::read_from(BufReader::new(file), path)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No store at {:?}, starting empty", path);
                BTreeMap::new()
            }
            Err(e) => {
                return Err(StoreError::Io {
                    path: path.to_string_lossy().to_string(),
                    source: e,
                });
            }
        };
        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    fn read_from(
        mut reader: impl Read,
        path: &Path,
    ) -> Result<BTreeMap<String, Value>, StoreError> {
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .map_err(|e| StoreError::Io {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| StoreError::Json {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Reads and decodes the value under `key`.
    ///
    /// A value that no longer decodes as `T` is treated as absent and logged, so stale
    /// records never block the caller.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.try_get(key) {
            Ok(decoded) => decoded,
            Err(e) => {
                warn!("Ignoring unreadable store entry: {}", e);
                None
            }
        }
    }

    /// Like [`Store::get`], but an entry that is present and fails to decode is an error.
    pub fn try_get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let Some(value) = self.entries.get(key) else {
            return Ok(None);
        };
        serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|e| StoreError::Entry {
                path: self.path.to_string_lossy().to_string(),
                key: key.to_string(),
                source: e,
            })
    }

    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), StoreError> {
        let value = serde_json::to_value(value).map_err(|e| StoreError::Json {
            path: self.path.to_string_lossy().to_string(),
            source: e,
        })?;
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    /// Returns `true` if the key was present.
    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Writes the store to a sibling temp file and renames it over the target.
    pub fn save(&self) -> Result<(), StoreError> {
        let io_err = |source: io::Error| StoreError::Io {
            path: self.path.to_string_lossy().to_string(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let mut tmp_path = self.path.clone().into_os_string();
        tmp_path.push(".tmp");
        let tmp_path = PathBuf::from(tmp_path);

        {
            let file = File::create(&tmp_path).map_err(io_err)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &self.entries).map_err(|e| {
                StoreError::Json {
                    path: self.path.to_string_lossy().to_string(),
                    source: e,
                }
            })?;
            writer.write_all(b"\n").map_err(io_err)?;
            writer.flush().map_err(io_err)?;
        }

        fs::rename(&tmp_path, &self.path).map_err(io_err)?;
        debug!("Saved store to {:?}", self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::preferences::UserPreferences;
    use tempfile::tempdir;

    #[test]
    fn open_missing_file_yields_empty_store() {
        let dir = tempdir().unwrap();
        let store = Store::open(&dir.path().join("store.json")).unwrap();
        assert!(!store.contains(keys::USER_PREFERENCES));
        assert_eq!(store.get::<bool>(keys::ONBOARDING_COMPLETE), None);
    }

    #[test]
    fn values_survive_save_and_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let mut prefs = UserPreferences::new();
        prefs.add_liked("ceramides");
        prefs.add_sensitivity("retinol");

        let mut store = Store::open(&path).unwrap();
        store.set(keys::USER_PREFERENCES, &prefs).unwrap();
        store.set(keys::ONBOARDING_COMPLETE, &true).unwrap();
        store.save().unwrap();

        let reopened = Store::open(&path).unwrap();
        assert_eq!(reopened.get::<UserPreferences>(keys::USER_PREFERENCES), Some(prefs));
        assert_eq!(reopened.get::<bool>(keys::ONBOARDING_COMPLETE), Some(true));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn remove_reports_presence() {
        let dir = tempdir().unwrap();
        let mut store = Store::open(&dir.path().join("store.json")).unwrap();
        store.set(keys::SCANNED_PRODUCT, &"product-2").unwrap();
        assert!(store.remove(keys::SCANNED_PRODUCT));
        assert!(!store.remove(keys::SCANNED_PRODUCT));
    }

    #[test]
    fn undecodable_entry_reads_as_absent() {
        let dir = tempdir().unwrap();
        let mut store = Store::open(&dir.path().join("store.json")).unwrap();
        store.set(keys::CHECKINS, &"not a list").unwrap();
        assert_eq!(store.get::<Vec<u8>>(keys::CHECKINS), None);
    }

    #[test]
    fn try_get_reports_undecodable_entry_by_key() {
        let dir = tempdir().unwrap();
        let mut store = Store::open(&dir.path().join("store.json")).unwrap();
        store.set(keys::CHECKINS, &"not a list").unwrap();
        match store.try_get::<Vec<u8>>(keys::CHECKINS) {
            Err(StoreError::Entry { key, .. }) => assert_eq!(key, keys::CHECKINS),
            other => panic!("expected an entry error, got {:?}", other),
        }
        assert_eq!(store.try_get::<bool>(keys::ONBOARDING_COMPLETE).unwrap(), None);
    }

    #[test]
    fn corrupt_file_is_a_json_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Store::open(&path), Err(StoreError::Json { .. })));
    }
}
