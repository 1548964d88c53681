//! src/cache/entry_cache.rs
//! ============================================================================
//! # EntryCache — Futures-aware metadata cache for ad-hoc paths
//!
//! Wraps [`moka::future::Cache`] to store and asynchronously populate
//! [`FileEntry`] records for paths that arrive outside a normal enumeration
//! (dropped file references, drilled-into ad-hoc directories). Keys are
//! canonical absolute path strings. `Cache::get_with` takes a *future*, not
//! a closure, so `get_or_load` wraps the zero-arg loader closure in one
//! `async move` block before handing it over.

use moka::future::Cache;
use std::{sync::Arc, time::Duration};

use crate::{error::AppError, fs::file_entry::FileEntry};

/// String key = canonical, absolute path.
pub type EntryKey = String;

/// Thread-safe async cache for [`FileEntry`].
#[derive(Clone)]
pub struct EntryCache {
    inner: Arc<Cache<EntryKey, FileEntry>>,
}

impl EntryCache {
    /// Create a cache with `max_entries` and a global TTL.
    pub fn new(max_entries: u64, ttl: Duration) -> Self {
        let inner: Cache<String, FileEntry> = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .build();
        Self {
            inner: Arc::new(inner),
        }
    }

    /// Retrieve a [`FileEntry`] or compute it if absent.
    ///
    /// *`loader`* takes no parameters (it captures the key via move) and
    /// returns `Future<Output = Result<FileEntry, AppError>>`. A failed load
    /// caches a default stub so repeated lookups of a broken path stay cheap.
    pub async fn get_or_load<F, Fut>(&self, key: EntryKey, loader: F) -> Result<FileEntry, AppError>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: std::future::Future<Output = Result<FileEntry, AppError>> + Send + 'static,
    {
        let tmp_key: String = key.clone();
        let future_value = async move {
            match loader().await {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::error!("FileEntry loader failed for '{}': {}", tmp_key, e);
                    FileEntry::default()
                }
            }
        };

        let entry: FileEntry = self.inner.get_with(key, future_value).await;

        if entry.path.as_os_str().is_empty() && entry.name.is_empty() {
            Err(AppError::Cache("loader failed; default cached".into()))
        } else {
            Ok(entry)
        }
    }

    /// Insert or replace a value.
    pub async fn insert(&self, key: EntryKey, entry: FileEntry) {
        self.inner.insert(key, entry).await;
    }

    /// Remove a single entry.
    pub async fn invalidate(&self, key: EntryKey) {
        self.inner.invalidate(&key).await;
    }

    /// Flush the entire cache.
    pub async fn clear(&self) {
        self.inner.invalidate_all();
    }

    /// Non-blocking check (no load).
    pub async fn get_if_present(&self, key: &EntryKey) -> Option<FileEntry> {
        self.inner.get(key).await
    }
}

impl Default for EntryCache {
    fn default() -> Self {
        Self::new(5000, Duration::from_secs(600))
    }
}

// ------------------------------------------------------------------------- //
// Tests
// ------------------------------------------------------------------------- //
