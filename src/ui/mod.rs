// UI layer: report controller, text formatting and the terminal frontend

pub mod formatters;
pub mod report;
pub mod tray_tui;

pub use formatters::{battery_health_text, battery_text, network_text, usage_text};
pub use report::{GpuSelector, ReportView, ReportWindow};
