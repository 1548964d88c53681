//! src/fs/lister.rs
//! ============================================================================
//! # Directory Lister: Asynchronous, Non-Recursive Enumeration
//!
//! Lists the immediate children of a directory as [`FileEntry`] records.
//! Partial results are acceptable: entries whose metadata cannot be resolved
//! are omitted, an absent or unreadable directory yields an empty listing,
//! and the call itself never fails.

use crate::fs::file_entry::FileEntry;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::warn;

/// Enumerates the immediate children of `directory`.
///
/// `None` (no selection) returns an empty listing rather than an error.
/// Hidden entries are included; callers filter them via `is_hidden`.
pub async fn list_dir(directory: Option<&Path>) -> Vec<FileEntry> {
    let Some(path) = directory else {
        return Vec::new();
    };

    let mut read_dir: fs::ReadDir = match fs::read_dir(path).await {
        Ok(rd) => rd,
        Err(e) => {
            warn!("Failed to list {:?}: {}", path, e);
            return Vec::new();
        }
    };

    let mut entries: Vec<FileEntry> = Vec::new();
    loop {
        let entry = match read_dir.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(e) => {
                warn!("Listing of {:?} stopped early: {}", path, e);
                break;
            }
        };

        let entry_path: PathBuf = entry.path();
        match FileEntry::from_path(&entry_path).await {
            Ok(info) => entries.push(info),
            Err(e) => {
                // Skip the single entry, keep the rest of the listing.
                warn!("Failed to resolve metadata for {:?}: {}", entry_path, e);
            }
        }
    }

    entries
}

// ------------------------------------------------------------------------- //
// Tests
// ------------------------------------------------------------------------- //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::file_entry::FileKind;
    use tempfile::TempDir;

    #[tokio::test]
    async fn lists_immediate_children_only() {
        let dir: TempDir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("x.png"), b"img").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub/nested.txt"), b"deep").unwrap();

        let mut entries: Vec<FileEntry> = list_dir(Some(dir.path())).await;
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["sub", "x.png"]);
        assert_eq!(entries[0].kind, FileKind::Folder);
        assert_eq!(entries[1].kind, FileKind::Image);
    }

    #[tokio::test]
    async fn absent_directory_is_empty() {
        assert!(list_dir(None).await.is_empty());
        assert!(list_dir(Some(Path::new("/no/such/dir"))).await.is_empty());
    }

    #[tokio::test]
    async fn hidden_entries_are_included_and_flagged() {
        let dir: TempDir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(".hidden"), b"").unwrap();
        std::fs::write(dir.path().join("shown"), b"").unwrap();

        let entries: Vec<FileEntry> = list_dir(Some(dir.path())).await;
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().any(|e| e.is_hidden));
        assert!(entries.iter().any(|e| !e.is_hidden));
    }
}
