//! src/controller/actions.rs
//! ============================================================================
//! # Actions: Centralized Application Commands
//!
//! Defines the `Action` enum, which represents every signal the core reacts
//! to: registry mutations, breadcrumb navigation, filter changes, overlay
//! visibility/pin signals from the hotkey and focus collaborators, animation
//! completions, and background task results. External presentation glue only
//! ever talks to the core by sending these over the controller's channel.

use crate::fs::file_entry::FileEntry;
use crate::fs::pipeline::{DateFilter, SortField, TypeFilter};
use std::path::PathBuf;
use uuid::Uuid;

/// Which animation just ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationKind {
    Show,
    Hide,
}

/// Represents a high-level action that the application can perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Register a new root directory and select it.
    AddRoot(PathBuf),
    /// Remove a registered root by identity.
    RemoveRoot(Uuid),
    /// Clear the registry and the selection.
    RemoveAllRoots,
    /// Select a root (or an ad-hoc path) as the browsing base.
    SelectRoot(PathBuf),
    /// Drill into a subdirectory of the current level.
    DrillDown(PathBuf),
    /// Jump back to breadcrumb level `index`.
    NavigateTo(usize),
    /// Re-enumerate the current level.
    Refresh,
    /// Narrow the listing by type class.
    SetTypeFilter(TypeFilter),
    /// Narrow the listing by creation-date bucket.
    SetDateFilter(DateFilter),
    /// Reorder the listing.
    SetSortField(SortField),
    /// Free-text name search.
    SetSearchQuery(String),
    /// Toggle whether hidden files are projected.
    ToggleShowHidden,
    /// Hotkey signal: flip the desired overlay visibility.
    ToggleVisibility,
    /// Hotkey signal: flip the pin flag (does not change visibility).
    TogglePin,
    /// The overlay surface lost input focus.
    FocusLost,
    /// An in-flight show/hide animation finished.
    AnimationDone(AnimationKind),
    /// External collaborator delivered dropped file references.
    FilesDropped(Vec<PathBuf>),
    /// A background task produced an updated record for the listing.
    EntryUpdated { parent: PathBuf, info: FileEntry },
    /// Quit the application.
    Quit,
}
