//! src/model/browse.rs
//! ============================================================================
//! # BrowseState: Current Listing and Its Visible Projection
//!
//! Holds the full enumeration of the current navigation level (`entries`)
//! and the narrowed/ordered projection shown to the user (`visible`). The
//! projection is recomputed from the full listing whenever the listing or
//! any filter field changes.

use crate::fs::file_entry::FileEntry;
use crate::fs::pipeline::FilterState;

#[derive(Debug, Default)]
pub struct BrowseState {
    /// Full, unfiltered enumeration of the current level.
    pub entries: Vec<FileEntry>,
    /// Filtered/sorted projection for display.
    pub visible: Vec<FileEntry>,
    /// Active filter/sort configuration.
    pub filter: FilterState,
    /// Whether hidden entries participate in the projection.
    pub show_hidden: bool,
}

impl BrowseState {
    pub fn new(show_hidden: bool) -> Self {
        Self {
            show_hidden,
            ..Self::default()
        }
    }

    /// Replaces the listing and recomputes the projection.
    pub fn set_entries(&mut self, entries: Vec<FileEntry>) {
        self.entries = entries;
        self.refresh();
    }

    /// Recomputes `visible` from the full listing and the current filters.
    pub fn refresh(&mut self) {
        let pool: Vec<FileEntry> = if self.show_hidden {
            self.entries.clone()
        } else {
            self.entries.iter().filter(|e| !e.is_hidden).cloned().collect()
        };
        self.visible = self.filter.apply(&pool);
    }

    /// Merges an updated record (e.g. folder statistics from a background
    /// task) back into the listing by path, then recomputes the projection.
    pub fn update_entry(&mut self, updated: FileEntry) {
        if let Some(slot) = self.entries.iter_mut().find(|e| e.path == updated.path) {
            *slot = updated;
            self.refresh();
        }
    }
}

// ------------------------------------------------------------------------- //
// Tests
// ------------------------------------------------------------------------- //
