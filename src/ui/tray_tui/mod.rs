//! Terminal frontend for the tray.
//!
//! The bottom strip stands in for the notification area: it shows the live
//! icon and its tooltip. The report pops up above it.

mod app;
mod event_handler;
mod render;
mod widgets;

pub use app::{map_click, run_tray_app, TrayApp, TrayAppConfig};
pub use event_handler::{map_key, TrayEvent};
