use std::fs;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;
use crate::constants::{DEFAULT_LOG_FILTER, LOG_FILE_NAME};

/// Initializes console logging, plus a daily JSON log file when `json_dir` is set.
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let console_layer = fmt::layer().with_writer(std::io::stderr);

    let file_layer = config.json_dir.as_ref().and_then(|dir| {
        if let Err(e) = fs::create_dir_all(dir) {
            eprintln!("could not create log directory {}: {}", dir.display(), e);
            return None;
        }
        let file_appender = tracing_appender::rolling::daily(dir, LOG_FILE_NAME);
        let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);
        // Keep the guard alive so buffered lines are flushed on exit
        std::mem::forget(guard);
        Some(fmt::layer().json().with_writer(non_blocking_writer))
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .try_init();
}
