use std::{fs, path::Path};

use tracing_appender::rolling::{RollingFileAppender, daily};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, prelude::*};

pub struct Logger;

impl Logger {
    /// Call **once** near the start of `main`.
    pub fn init_tracing() {
        // create logs/ if missing
        let log_dir: &Path = Path::new("logs");
        fs::create_dir_all(log_dir).expect("cannot create logs dir");

        // daily rolling file appender → logs/quickfolder-YYYY-MM-DD.log
        let file: RollingFileAppender = daily("logs", "quickfolder");

        let file_layer = fmt::layer()
            .compact()
            .with_writer(file)
            .with_ansi(false)
            .with_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()));

        // optional stderr layer for live debugging
        let stderr_layer = fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()));

        tracing_subscriber::registry()
            .with(file_layer)
            .with(stderr_layer)
            .init();
    }
}
