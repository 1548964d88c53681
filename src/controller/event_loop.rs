//! src/controller/event_loop.rs
//! ============================================================================
//! # Controller: Serial Action Dispatch
//!
//! The Controller owns every piece of mutable core state (registry,
//! navigation trail, current listing, overlay panel) and mutates it from a
//! single async loop, one action at a time. All collaborators — hotkey
//! monitor, focus observer, drag-and-drop glue, background tasks — talk to
//! it exclusively by sending [`Action`]s over its channel, so no state here
//! needs locking.

use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::cache::entry_cache::EntryCache;
use crate::config::config::Config;
use crate::controller::actions::{Action, AnimationKind};
use crate::error::AppError;
use crate::fs::file_entry::FileEntry;
use crate::fs::lister::list_dir;
use crate::model::browse::BrowseState;
use crate::model::nav::NavigationStack;
use crate::overlay::geometry::{ScreenProbe, Size};
use crate::overlay::panel::OverlayPanel;
use crate::store::kv::KEY_PINNED;
use crate::store::registry::{DirectoryEntry, DirectoryRegistry};
use crate::tasks::stats_task::spawn_folder_stats;

pub struct Controller {
    pub config: Arc<Config>,
    pub registry: DirectoryRegistry,
    pub nav: NavigationStack,
    pub browse: BrowseState,
    pub panel: OverlayPanel,
    pub cache: EntryCache,
    /// Process-wide "the overlay should be on screen" flag flipped by the
    /// hotkey; the panel FSM is reconciled against it rather than toggled
    /// directly, which keeps rapid presses from racing in-flight animations.
    desired_visible: bool,
    probe: Box<dyn ScreenProbe>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl Controller {
    pub fn new(config: Arc<Config>, registry: DirectoryRegistry, probe: Box<dyn ScreenProbe>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel::<Action>();

        let panel_height: f64 = probe
            .work_area()
            .map(|area| area.size.height * config.panel_height_ratio)
            .unwrap_or(800.0);
        let pinned: bool = registry.store().get_bool(KEY_PINNED);
        let panel: OverlayPanel = OverlayPanel::new(
            Size::new(config.panel_width, panel_height),
            config.animation,
            pinned,
        );

        let mut nav: NavigationStack = NavigationStack::new();
        if let Some(selected) = registry.selected().cloned() {
            nav.reset(selected);
        }

        let browse: BrowseState = BrowseState::new(config.show_hidden);
        let cache: EntryCache = EntryCache::new(config.cache_entries, config.cache_ttl);

        Self {
            config,
            registry,
            nav,
            browse,
            panel,
            cache,
            desired_visible: false,
            probe,
            action_tx,
            action_rx,
        }
    }

    /// Handle for collaborators that need to send actions in.
    pub fn sender(&self) -> mpsc::UnboundedSender<Action> {
        self.action_tx.clone()
    }

    /// Runs the event loop until `Action::Quit` or channel closure.
    pub async fn run(&mut self) {
        self.refresh_listing().await;
        info!("Controller event loop started");

        while let Some(action) = self.action_rx.recv().await {
            if matches!(action, Action::Quit) {
                info!("Quit action received");
                break;
            }
            self.handle(action).await;
        }

        info!("Controller event loop ended");
    }

    /// Dispatches one action. Errors degrade to log lines; the loop never
    /// dies on a bad action.
    pub async fn handle(&mut self, action: Action) {
        match action {
            Action::AddRoot(path) => {
                match self.registry.add_root(&path) {
                    Ok(_) => self.sync_nav().await,
                    Err(e) => warn!("Failed to add root {:?}: {}", path, e),
                }
            }
            Action::RemoveRoot(id) => match self.registry.remove_root(id) {
                Ok(()) => self.sync_nav().await,
                Err(e) => warn!("Failed to remove root {}: {}", id, e),
            },
            Action::RemoveAllRoots => match self.registry.remove_all() {
                Ok(()) => {
                    self.nav.clear();
                    self.browse.set_entries(Vec::new());
                }
                Err(e) => warn!("Failed to clear roots: {}", e),
            },
            Action::SelectRoot(path) => {
                self.registry.select(&path);
                self.sync_nav().await;
            }
            Action::DrillDown(path) => {
                // Breadcrumb drill-down; the level need not be a registered
                // root, selection becomes transient.
                let entry: Option<DirectoryEntry> = self.registry.select(&path);
                if let Some(entry) = entry {
                    self.nav.push(entry);
                    self.refresh_listing().await;
                }
            }
            Action::NavigateTo(index) => {
                if let Some(entry) = self.nav.truncate_to(index).cloned() {
                    self.registry.select(&entry.path);
                    self.refresh_listing().await;
                }
            }
            Action::Refresh => self.refresh_listing().await,
            Action::SetTypeFilter(filter) => {
                self.browse.filter.type_filter = filter;
                self.browse.refresh();
            }
            Action::SetDateFilter(filter) => {
                self.browse.filter.date_filter = filter;
                self.browse.refresh();
            }
            Action::SetSortField(field) => {
                self.browse.filter.sort = field;
                self.browse.refresh();
            }
            Action::SetSearchQuery(query) => {
                self.browse.filter.query = query;
                self.browse.refresh();
            }
            Action::ToggleShowHidden => {
                self.browse.show_hidden = !self.browse.show_hidden;
                self.browse.refresh();
            }
            Action::ToggleVisibility => {
                self.desired_visible = !self.panel.is_on_screen();
                self.reconcile_visibility();
            }
            Action::TogglePin => {
                let pinned: bool = self.panel.toggle_pinned();
                if let Err(e) = self.registry.store_mut().set_bool(KEY_PINNED, pinned) {
                    warn!("Failed to persist pin flag: {}", e);
                }
            }
            Action::FocusLost => {
                if let Some(plan) = self.panel.focus_lost() {
                    self.desired_visible = false;
                    self.schedule_completion(AnimationKind::Hide, plan.duration);
                }
            }
            Action::AnimationDone(AnimationKind::Show) => self.panel.finish_show(),
            Action::AnimationDone(AnimationKind::Hide) => self.panel.finish_hide(),
            Action::FilesDropped(paths) => self.ingest_dropped(paths).await,
            Action::EntryUpdated { parent, info } => {
                let current: Option<PathBuf> = self.nav.current().map(|e| e.path.clone());
                if current.as_deref() == Some(parent.as_path()) {
                    self.browse.update_entry(info);
                }
            }
            Action::Quit => {} // handled by run()
        }
    }

    /// Resets the trail onto the registry selection and re-enumerates.
    async fn sync_nav(&mut self) {
        match self.registry.selected().cloned() {
            Some(selected) => self.nav.reset(selected),
            None => self.nav.clear(),
        }
        self.refresh_listing().await;
    }

    /// Re-enumerates the current navigation level and kicks off background
    /// folder statistics for its directories.
    async fn refresh_listing(&mut self) {
        let current: Option<PathBuf> = self.nav.current().map(|e| e.path.clone());
        let entries: Vec<FileEntry> = list_dir(current.as_deref()).await;
        self.browse.set_entries(entries);

        if let Some(dir) = current {
            spawn_folder_stats(
                dir,
                self.browse.entries.clone(),
                self.config.max_concurrency,
                self.action_tx.clone(),
            );
        }
    }

    /// Drives the panel FSM toward the desired visibility; phase guards
    /// drop redundant requests.
    fn reconcile_visibility(&mut self) {
        if self.desired_visible {
            if let Some(plan) = self.panel.begin_show(self.probe.as_ref()) {
                self.schedule_completion(AnimationKind::Show, plan.duration);
            }
        } else if let Some(plan) = self.panel.begin_hide() {
            self.schedule_completion(AnimationKind::Hide, plan.duration);
        }
    }

    /// Posts the animation-completion event back onto the channel after the
    /// fixed duration; the FSM ignores it if stale.
    fn schedule_completion(&self, kind: AnimationKind, duration: std::time::Duration) {
        let tx: mpsc::UnboundedSender<Action> = self.action_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let _ = tx.send(Action::AnimationDone(kind));
        });
    }

    /// Dropped directories register as roots; dropped files are classified
    /// through the metadata cache and reported.
    async fn ingest_dropped(&mut self, paths: Vec<PathBuf>) {
        let mut registered: bool = false;
        for path in paths {
            let key: String = path.to_string_lossy().into_owned();
            let load_path: PathBuf = path.clone();
            let loaded: Result<FileEntry, AppError> = self
                .cache
                .get_or_load(key, move || async move {
                    FileEntry::from_path(&load_path).await.map_err(AppError::from)
                })
                .await;

            match loaded {
                Ok(entry) if entry.is_dir => match self.registry.add_root(&entry.path) {
                    Ok(_) => registered = true,
                    Err(e) => warn!("Failed to register dropped folder {:?}: {}", entry.path, e),
                },
                Ok(entry) => {
                    info!("Dropped file {} classified as {}", entry.name, entry.kind);
                }
                Err(e) => warn!("Ignoring dropped path {:?}: {}", path, e),
            }
        }
        if registered {
            self.sync_nav().await;
        }
    }
}

// ------------------------------------------------------------------------- //
// Tests
// ------------------------------------------------------------------------- //
