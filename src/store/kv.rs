//! src/store/kv.rs
//! ============================================================================
//! # KvStore: Persisted Key-Value Settings
//!
//! One key per logical setting (root directory list, pin flag, auto-launch
//! flag, dock visibility flag), persisted as a single JSON object under the
//! app data dir. Every mutation is written through immediately; there is no
//! batching. Loading is lenient: an unreadable or unparsable file yields an
//! empty store rather than an error, so a corrupt settings file never blocks
//! startup.

use serde_json;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::AppError;

/// Key for the serialized root directory list.
pub const KEY_DIRECTORIES: &str = "directories";
/// Key for the overlay pin flag.
pub const KEY_PINNED: &str = "pinned";
/// Key for the launch-at-login flag.
pub const KEY_AUTO_LAUNCH: &str = "auto_launch";
/// Key for the dock/taskbar icon visibility flag.
pub const KEY_DOCK_VISIBLE: &str = "dock_visible";

/// Write-through persisted string map.
#[derive(Debug)]
pub struct KvStore {
    path: PathBuf,
    map: BTreeMap<String, String>,
}

impl KvStore {
    /// Opens the store at `path`, loading any existing content.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path: PathBuf = path.into();
        let map: BTreeMap<String, String> = match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(map) => map,
                Err(e) => {
                    warn!("Settings file {:?} is unparsable, starting empty: {}", path, e);
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };
        Self { path, map }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }

    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key).map(|v| v == "true").unwrap_or(false)
    }

    /// Sets `key` and writes the whole store through to disk.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<(), AppError> {
        self.map.insert(key.to_string(), value.into());
        self.flush()
    }

    pub fn set_bool(&mut self, key: &str, value: bool) -> Result<(), AppError> {
        self.set(key, if value { "true" } else { "false" })
    }

    pub fn remove(&mut self, key: &str) -> Result<(), AppError> {
        self.map.remove(key);
        self.flush()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text: String = serde_json::to_string_pretty(&self.map)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

// ------------------------------------------------------------------------- //
// Tests
// ------------------------------------------------------------------------- //

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn set_get_roundtrip_across_reload() {
        let dir: TempDir = TempDir::new().unwrap();
        let path: PathBuf = dir.path().join("state.json");

        let mut store: KvStore = KvStore::open(&path);
        store.set(KEY_DIRECTORIES, "/a,/b").unwrap();
        store.set_bool(KEY_PINNED, true).unwrap();

        let reloaded: KvStore = KvStore::open(&path);
        assert_eq!(reloaded.get(KEY_DIRECTORIES), Some("/a,/b"));
        assert!(reloaded.get_bool(KEY_PINNED));
        assert!(!reloaded.get_bool(KEY_DOCK_VISIBLE));
    }

    #[test]
    fn unparsable_file_starts_empty() {
        let dir: TempDir = TempDir::new().unwrap();
        let path: PathBuf = dir.path().join("state.json");
        fs::write(&path, "{ not json").unwrap();

        let store: KvStore = KvStore::open(&path);
        assert_eq!(store.get(KEY_DIRECTORIES), None);
    }

    #[test]
    fn remove_persists() {
        let dir: TempDir = TempDir::new().unwrap();
        let path: PathBuf = dir.path().join("state.json");

        let mut store: KvStore = KvStore::open(&path);
        store.set(KEY_AUTO_LAUNCH, "true").unwrap();
        store.remove(KEY_AUTO_LAUNCH).unwrap();

        let reloaded: KvStore = KvStore::open(&path);
        assert_eq!(reloaded.get(KEY_AUTO_LAUNCH), None);
    }
}
