//! src/config/config.rs
//! ============================================================================
//! # Config: Application Configuration Loader and Saver
//!
//! Manages all user-editable configuration settings for the quick-access
//! panel. Loads and saves settings as TOML from the proper cross-platform
//! config path using the [`directories`](https://docs.rs/directories) crate.
//!
//! ## Features
//! - XDG-compliant config discovery and writing (Linux, macOS, Windows)
//! - Robust defaulting if no config file exists
//! - Async load/save for smooth integration with Tokio

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration struct for the application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Fixed width of the overlay panel, in points.
    pub panel_width: f64,
    /// Panel height as a fraction of the active screen's work-area height.
    pub panel_height_ratio: f64,
    /// Show/hide animation length.
    #[serde(with = "humantime_serde")]
    pub animation: Duration,
    /// Whether hidden files appear in listings by default.
    pub show_hidden: bool,
    /// Admission width for background folder statistics.
    pub max_concurrency: usize,
    pub cache_entries: u64,
    #[serde(with = "humantime_serde")]
    pub cache_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            panel_width: 450.0,
            panel_height_ratio: 0.8,
            animation: Duration::from_millis(100),
            show_hidden: false,
            max_concurrency: 4,
            cache_entries: 5000,
            cache_ttl: Duration::from_secs(600),
        }
    }
}

impl Config {
    /// Loads config from TOML file at the XDG-compliant app config dir, or returns defaults.
    ///
    /// The config is expected at `$XDG_CONFIG_HOME/QuickFolder/config.toml`
    /// (Linux), or equivalent on Windows/macOS.
    pub async fn load() -> anyhow::Result<Self> {
        let path: PathBuf = Self::config_path()?;
        if path.exists() {
            let text: String = tokio::fs::read_to_string(&path).await?;
            let cfg: Config = toml::from_str(&text)?;
            Ok(cfg)
        } else {
            Ok(Config::default())
        }
    }

    /// Saves config to TOML file at the XDG-compliant app config dir.
    pub async fn save(&self) -> anyhow::Result<()> {
        let path: PathBuf = Self::config_path()?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let toml_str: String = toml::to_string_pretty(self)?;
        tokio::fs::write(&path, toml_str).await?;
        Ok(())
    }

    /// Returns the canonical config file path using `directories::ProjectDirs`.
    pub fn config_path() -> anyhow::Result<PathBuf> {
        let proj_dirs: ProjectDirs = Self::project_dirs()?;
        Ok(proj_dirs.config_dir().join("config.toml"))
    }

    /// Returns the data directory used for persisted state (settings store).
    pub fn data_dir() -> anyhow::Result<PathBuf> {
        let proj_dirs: ProjectDirs = Self::project_dirs()?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    fn project_dirs() -> anyhow::Result<ProjectDirs> {
        ProjectDirs::from("org", "example", "QuickFolder")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory."))
    }
}
