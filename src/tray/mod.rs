//! Tray icon composition and handle lifecycle.

pub mod bitmap;
pub mod font;
pub mod icon;
mod renderer;

pub use bitmap::{template, Bitmap, Rgba, ICON_SIZE};
pub use icon::{HandleLedger, IconBackend, MemoryIcon, MemoryIconBackend};
pub use renderer::IconRenderer;
