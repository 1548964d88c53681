//! lib.rs — Main Library Entry for the QuickFolder Core
//! ----------------------------------------------------
//! Quick-access file browser surfaced from a persistent background process:
//! registered root directories, breadcrumb navigation, filter/sort/search of
//! the current listing, a bounded-concurrency task executor, and the floating
//! overlay panel state machine.
//! Only re-export what you want public in the library crate root.

/// --- Error handling (unified error type for app) ---
pub mod error;

/// --- Cache (ad-hoc path metadata cache, async) ---
pub mod cache {
    pub mod entry_cache;
}

/// --- Configuration: panel geometry, executor width, defaults ---
pub mod config {
    pub mod config;
}

/// --- Controller/event loop (serial action dispatch) ---
pub mod controller {
    pub mod actions;
    pub mod event_loop;
}

/// --- State/data models (navigation trail, current listing) ---
pub mod model {
    pub mod browse;
    pub mod nav;
}

/// --- Floating overlay panel: geometry seam and phase machine ---
pub mod overlay {
    pub mod geometry;
    pub mod panel;
}

/// --- Filesystem abstraction ---
pub mod fs {
    pub mod file_entry;
    pub mod lister;
    pub mod pipeline;
}

/// --- Persistence: key-value settings store and directory registry ---
pub mod store {
    pub mod kv;
    pub mod registry;
}

/// --- Background/async tasks ---
pub mod tasks {
    pub mod executor;
    pub mod stats_task;
}

pub mod logging;
pub use logging::Logger;

/// --- Crate-level re-exports for the most important types ---
pub use error::AppError;
pub use fs::file_entry::{FileEntry, FileKind};
pub use model::nav::NavigationStack;
pub use overlay::panel::{OverlayPanel, PanelPhase};
pub use store::registry::{DirectoryEntry, DirectoryRegistry};
