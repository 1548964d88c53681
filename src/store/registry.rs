//! src/store/registry.rs
//! ============================================================================
//! # DirectoryRegistry: Registered Root Directories and Selection
//!
//! Owns the ordered set of user-registered root directories and the current
//! selection. The list is persisted write-through as a single delimited
//! string in the settings store on every mutation; decoding is lenient and
//! drops malformed segments individually.
//!
//! Selection may also point at a *transient* entry (an ad-hoc path drilled
//! into that is not itself a registered root); transient entries are never
//! persisted.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::error::AppError;
use crate::store::kv::{KEY_DIRECTORIES, KvStore};

/// A root (or ad-hoc) directory tracked by the registry.
///
/// Identity is the opaque `id`; deduplication within the registry is by
/// `path`. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub id: Uuid,
    pub name: String,
    pub path: PathBuf,
}

impl DirectoryEntry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path: PathBuf = path.into();
        let name: String = path
            .file_name()
            .map(|n: &OsStr| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self {
            id: Uuid::new_v4(),
            name,
            path,
        }
    }
}

/// Registered roots plus the current selection, persisted via [`KvStore`].
#[derive(Debug)]
pub struct DirectoryRegistry {
    store: KvStore,
    roots: Vec<DirectoryEntry>,
    selected: Option<DirectoryEntry>,
}

impl DirectoryRegistry {
    /// Builds the registry from the persisted root list; the first root (if
    /// any) becomes the selection, mirroring startup behavior.
    pub fn new(store: KvStore) -> Self {
        let roots: Vec<DirectoryEntry> =
            decode_roots(store.get(KEY_DIRECTORIES).unwrap_or_default());
        let selected: Option<DirectoryEntry> = roots.first().cloned();
        Self {
            store,
            roots,
            selected,
        }
    }

    pub fn roots(&self) -> &[DirectoryEntry] {
        &self.roots
    }

    pub fn selected(&self) -> Option<&DirectoryEntry> {
        self.selected.as_ref()
    }

    /// Registers `path` as a new root and selects it.
    ///
    /// If `path` is already registered this is a no-op: nothing is added or
    /// persisted and the *current* selection is returned unchanged.
    pub fn add_root(&mut self, path: impl AsRef<Path>) -> Result<Option<DirectoryEntry>, AppError> {
        let path: &Path = path.as_ref();
        if self.roots.iter().any(|r| r.path == path) {
            return Ok(self.selected.clone());
        }
        let entry: DirectoryEntry = DirectoryEntry::new(path);
        self.roots.push(entry);
        self.persist()?;
        Ok(self.select(path))
    }

    /// Removes a root by identity. If the removed root was selected, the
    /// selection falls back to the (new) first root, or to no selection.
    pub fn remove_root(&mut self, id: Uuid) -> Result<(), AppError> {
        let Some(idx) = self.roots.iter().position(|r| r.id == id) else {
            return Ok(());
        };
        let removed: DirectoryEntry = self.roots.remove(idx);
        self.persist()?;
        if self.selected.as_ref().map(|s| s.id) == Some(removed.id) {
            let next: Option<PathBuf> = self.roots.first().map(|r| r.path.clone());
            self.selected = next.and_then(|p| self.select(p));
        }
        Ok(())
    }

    /// Clears the list and the selection.
    pub fn remove_all(&mut self) -> Result<(), AppError> {
        self.roots.clear();
        self.selected = None;
        self.persist()
    }

    /// Selects an existing root matching `path`, or constructs and selects a
    /// transient entry without persisting it (ad-hoc browsing).
    pub fn select(&mut self, path: impl AsRef<Path>) -> Option<DirectoryEntry> {
        let path: &Path = path.as_ref();
        let entry: DirectoryEntry = match self.roots.iter().find(|r| r.path == path) {
            Some(existing) => existing.clone(),
            None => DirectoryEntry::new(path),
        };
        self.selected = Some(entry);
        self.selected.clone()
    }

    /// Read access to the underlying settings store (pin flag etc.).
    pub fn store(&self) -> &KvStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut KvStore {
        &mut self.store
    }

    fn persist(&mut self) -> Result<(), AppError> {
        let encoded: String = encode_roots(&self.roots);
        self.store.set(KEY_DIRECTORIES, encoded)
    }
}

/// Serializes the root list as a comma-delimited string of absolute paths.
pub fn encode_roots(roots: &[DirectoryEntry]) -> String {
    roots
        .iter()
        .map(|r| r.path.to_string_lossy().into_owned())
        .collect::<Vec<String>>()
        .join(",")
}

/// Decodes the delimited root list. Lenient: empty or relative segments are
/// dropped individually rather than failing the whole load.
pub fn decode_roots(encoded: &str) -> Vec<DirectoryEntry> {
    encoded
        .split(',')
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .filter(|p| p.is_absolute())
        .map(DirectoryEntry::new)
        .collect()
}

// ------------------------------------------------------------------------- //
// Tests
// ------------------------------------------------------------------------- //
