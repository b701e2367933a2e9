//! CLI command implementations

pub mod config;
pub mod logs;
pub mod shell;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use minibank_core::{EntryPoint, LogEvent, LoggingService, MinibankContext};

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger(data_dir: &Path) -> Option<LoggingService> {
    LoggingService::new(data_dir, EntryPoint::Shell, env!("CARGO_PKG_VERSION")).ok()
}

/// Log an event, ignoring any errors (logging should never break the shell)
pub fn log_event(logger: &Option<LoggingService>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

/// Resolve the data directory: flag, then MINIBANK_DIR, then ~/.minibank
pub fn get_data_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Ok(dir) = std::env::var("MINIBANK_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".minibank"))
        .context("Could not find home directory; set MINIBANK_DIR or pass --data-dir")
}

/// Create the context for one shell session
pub fn get_context(data_dir: &Path) -> Result<MinibankContext> {
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {:?}", data_dir))?;

    MinibankContext::new(data_dir).context("Failed to initialize minibank context")
}
