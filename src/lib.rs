// usagepin Library - Public API

// Re-export error types
pub mod error;
pub use error::{Result, UsagePinError};

// Module declarations
pub mod commands;
pub mod core;
pub mod platform;
pub mod tray;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use core::config::Configuration;
pub use core::context::UsageContext;
pub use core::usage::UsageTarget;

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

// Initialize logging
pub fn init_logging() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
}

/// Default log file for the terminal frontend
pub fn default_log_path() -> Result<PathBuf> {
    let dir = dirs::data_local_dir()
        .ok_or_else(|| UsagePinError::config("Could not determine local data directory"))?;
    Ok(dir.join("usagepin").join("usagepin.log"))
}

/// Initialize logging into `path` so log lines do not draw over the TUI.
pub fn init_file_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}
