// Command handlers module
pub mod completions;
pub mod config;
pub mod gpus;
pub mod run;
pub mod snapshot;
pub mod tray;
pub mod version;

// Re-exports for cleaner imports
pub use gpus::execute as gpus;
pub use run::execute as run;
pub use snapshot::execute as snapshot;
pub use tray::execute as tray;
pub use version::execute as version;
