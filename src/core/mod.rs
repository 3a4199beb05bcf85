// Core business logic module

pub mod config;
pub mod context;
pub mod dispatch;
pub mod system_monitor;
pub mod usage;

// Re-export commonly used items
pub use config::Configuration;
pub use context::UsageContext;
pub use dispatch::{Dispatcher, TrayUpdate, UiMessage, UiQueue};
pub use usage::{clamp_usage, tooltip_text, usage_label, UsageTarget};
