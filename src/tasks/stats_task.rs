//! src/tasks/stats_task.rs
//! ============================================================================
//! # Stats Task: Background Folder Statistics
//!
//! Computes the recursive byte size and direct item count of the directories
//! in a listing without blocking the event loop. Traversal runs on blocking
//! threads, admission-gated through the bounded-concurrency executor, and
//! results come back to the event loop as `Action::EntryUpdated`.

use crate::controller::actions::Action;
use crate::error::AppError;
use crate::fs::file_entry::FileEntry;
use crate::tasks::executor::run_limited;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::{info, warn};
use walkdir::WalkDir;

/// Spawns background statistics for every directory in `entries`.
///
/// Size is recursive (all files below the directory), item count covers
/// direct children only. Updated records are sent to the event loop as they
/// become available; a failed batch is logged and dropped, the listing keeps
/// its placeholder zeros.
pub fn spawn_folder_stats(
    parent: PathBuf,
    entries: Vec<FileEntry>,
    max_concurrency: usize,
    action_tx: mpsc::UnboundedSender<Action>,
) {
    let dirs: Vec<FileEntry> = entries.into_iter().filter(|e| e.is_dir).collect();
    if dirs.is_empty() {
        return;
    }
    info!(
        "Spawning folder statistics for {} directories under {}",
        dirs.len(),
        parent.display()
    );

    tokio::spawn(async move {
        let tasks: Vec<_> = dirs
            .into_iter()
            .map(|info: FileEntry| move || measure(info))
            .collect();

        match run_limited(tasks, max_concurrency).await {
            Ok(updated) => {
                for info in updated {
                    let action: Action = Action::EntryUpdated {
                        parent: parent.clone(),
                        info,
                    };
                    if let Err(e) = action_tx.send(action) {
                        warn!("Failed to send folder statistics update: {}", e);
                        break;
                    }
                }
            }
            Err(e) => {
                warn!(
                    "Folder statistics failed for {}: {}",
                    parent.display(),
                    e
                );
            }
        }
    });
}

/// Measures one directory on a blocking thread.
async fn measure(mut info: FileEntry) -> Result<FileEntry, AppError> {
    let path: PathBuf = info.path.clone();

    let (total_size, items_count) = tokio::task::spawn_blocking(move || {
        let mut total_size: u64 = 0;
        // Recursive size for files, direct children only for the count.
        for entry in WalkDir::new(&path)
            .min_depth(1)
            .into_iter()
            .filter_map(Result::ok)
        {
            if let Ok(metadata) = entry.metadata() {
                if metadata.is_file() {
                    total_size += metadata.len();
                }
            }
        }

        let mut items_count: usize = 0;
        if let Ok(entries) = std::fs::read_dir(&path) {
            items_count = entries.filter_map(Result::ok).count();
        }

        (total_size, items_count)
    })
    .await
    .map_err(|e| AppError::Task(e.to_string()))?;

    info.size = total_size;
    info.items_count = items_count;
    Ok(info)
}

// ------------------------------------------------------------------------- //
// Tests
// ------------------------------------------------------------------------- //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::lister::list_dir;
    use tempfile::TempDir;

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn reports_recursive_size_and_direct_count() {
        let dir: TempDir = TempDir::new().unwrap();
        let sub: PathBuf = dir.path().join("sub");
        std::fs::create_dir(&sub).unwrap();
        std::fs::write(sub.join("a.bin"), vec![0u8; 10]).unwrap();
        std::fs::create_dir(sub.join("nested")).unwrap();
        std::fs::write(sub.join("nested/b.bin"), vec![0u8; 5]).unwrap();

        let entries: Vec<FileEntry> = list_dir(Some(dir.path())).await;
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        spawn_folder_stats(dir.path().to_path_buf(), entries, 2, tx);

        let action: Action = rx.recv().await.expect("no stats update arrived");
        match action {
            Action::EntryUpdated { info, .. } => {
                assert_eq!(info.path, sub);
                assert_eq!(info.size, 15); // recursive
                assert_eq!(info.items_count, 2); // a.bin + nested, not b.bin
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[tokio::test]
    async fn no_directories_means_no_spawn() {
        let dir: TempDir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("only.txt"), b"x").unwrap();

        let entries: Vec<FileEntry> = list_dir(Some(dir.path())).await;
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        spawn_folder_stats(dir.path().to_path_buf(), entries, 2, tx);

        // Sender dropped without any update.
        assert!(rx.recv().await.is_none());
    }
}
