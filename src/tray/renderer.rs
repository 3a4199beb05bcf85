use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::bitmap::{Bitmap, Rgba};
use super::font;
use super::icon::IconBackend;
use crate::core::dispatch::TrayUpdate;
use crate::core::usage::{tooltip_text, usage_label};
use crate::error::Result;

/// Label is drawn slightly below center, clear of the top pins
const LABEL_Y_OFFSET: i32 = 2;

/// Composes the usage label onto the template and swaps the tray icon.
///
/// Runs on the UI thread only. The new handle is created before the old one
/// is dropped, so at most two handles are ever live, and only for the length
/// of the swap.
pub struct IconRenderer<B: IconBackend> {
    backend: B,
    template: Bitmap,
    current: Option<B::Icon>,
    tooltip: String,
    in_progress: Arc<AtomicBool>,
    rendered: u64,
    failed: u64,
}

impl<B: IconBackend> IconRenderer<B> {
    pub fn new(backend: B, template: Bitmap, in_progress: Arc<AtomicBool>) -> Self {
        Self {
            backend,
            template,
            current: None,
            tooltip: String::new(),
            in_progress,
            rendered: 0,
            failed: 0,
        }
    }

    /// Template with the label drawn on a copy
    pub fn compose(&self, label: &str) -> Bitmap {
        let mut bitmap = self.template.clone();
        font::draw_text_centered(&mut bitmap, label, Rgba::BLACK, LABEL_Y_OFFSET);
        bitmap
    }

    /// One render pass. Failures keep the previous icon and are not retried;
    /// the next tick simply tries again. Always clears the in-progress flag.
    pub fn render(&mut self, update: &TrayUpdate) -> bool {
        let result = self.swap_icon(update);
        self.in_progress.store(false, Ordering::Release);

        match result {
            Ok(()) => {
                self.rendered += 1;
                true
            }
            Err(e) => {
                self.failed += 1;
                log::debug!("Tray icon update skipped: {}", e);
                false
            }
        }
    }

    fn swap_icon(&mut self, update: &TrayUpdate) -> Result<()> {
        let bitmap = self.compose(&usage_label(update.usage));
        let tooltip = tooltip_text(update.target, update.usage);

        let icon = self.backend.create_icon(&bitmap)?;
        self.backend.assign(&icon, &tooltip)?;

        // Replacing drops (and releases) the previous handle
        self.current = Some(icon);
        self.tooltip = tooltip;
        Ok(())
    }

    pub fn current(&self) -> Option<&B::Icon> {
        self.current.as_ref()
    }

    pub fn tooltip(&self) -> &str {
        &self.tooltip
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn rendered(&self) -> u64 {
        self.rendered
    }

    pub fn failed(&self) -> u64 {
        self.failed
    }
}
