//! src/main.rs
//! ============================================================================
//! # QuickFolder Background Process Entry Point
//!
//! Persistent background process hosting the quick-access file browser core.
//! Platform glue (hotkey monitor, focus observer, drag-and-drop, the actual
//! floating window) attaches through the controller's action channel; this
//! binary wires up logging, configuration, the persisted registry, and the
//! event loop, then runs until interrupted.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};

use quickfolder::{
    Logger,
    config::config::Config,
    controller::{actions::Action, event_loop::Controller},
    overlay::geometry::NullProbe,
    store::{kv::KvStore, registry::DirectoryRegistry},
};

#[tokio::main]
async fn main() -> Result<()> {
    Logger::init_tracing();
    info!("Starting QuickFolder core");

    let config: Arc<Config> = Arc::new(Config::load().await.unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {}", e);
        Config::default()
    }));

    let state_path: PathBuf = Config::data_dir()
        .context("Failed to resolve data directory")?
        .join("state.json");
    let registry: DirectoryRegistry = DirectoryRegistry::new(KvStore::open(state_path));
    info!(
        "Loaded {} registered root(s), pinned={}",
        registry.roots().len(),
        registry.store().get_bool(quickfolder::store::kv::KEY_PINNED)
    );

    // The real pointer/screen probe is supplied by the platform layer; the
    // core runs headless without one and show requests degrade to no-ops.
    let mut controller: Controller = Controller::new(config, registry, Box::new(NullProbe));

    // Ctrl+C turns into a Quit action so the loop drains in order.
    let quit_tx = controller.sender();
    tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                info!("Received Ctrl+C signal");
                let _ = quit_tx.send(Action::Quit);
            }
            Err(e) => {
                error!("Failed to listen for Ctrl+C: {}", e);
            }
        }
    });

    controller.run().await;
    info!("Application exited cleanly");
    Ok(())
}
