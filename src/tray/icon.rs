//! Icon handle backends.
//!
//! A backend turns a composed bitmap into a platform icon and assigns it to
//! the tray. The icon type it returns owns the underlying handle and releases
//! it in `Drop`, so a handle is freed on every exit path, including a failed
//! `assign`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::bitmap::Bitmap;
use crate::error::Result;

pub trait IconBackend {
    /// Owned icon handle; dropping it releases the handle
    type Icon;

    fn create_icon(&mut self, bitmap: &Bitmap) -> Result<Self::Icon>;

    /// Show `icon` in the tray with the given tooltip
    fn assign(&mut self, icon: &Self::Icon, tooltip: &str) -> Result<()>;
}

/// Counts handle creation and release
#[derive(Debug, Default)]
pub struct HandleLedger {
    created: AtomicU64,
    destroyed: AtomicU64,
}

impl HandleLedger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Returns the id of the new handle
    pub fn record_created(&self) -> u64 {
        self.created.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn record_destroyed(&self) {
        self.destroyed.fetch_add(1, Ordering::SeqCst);
    }

    pub fn created(&self) -> u64 {
        self.created.load(Ordering::SeqCst)
    }

    pub fn destroyed(&self) -> u64 {
        self.destroyed.load(Ordering::SeqCst)
    }

    pub fn live(&self) -> u64 {
        self.created() - self.destroyed()
    }
}

/// Icon that keeps its pixels in memory; used by the terminal frontend.
#[derive(Debug)]
pub struct MemoryIcon {
    id: u64,
    bitmap: Bitmap,
    ledger: Arc<HandleLedger>,
}

impl MemoryIcon {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }
}

impl Drop for MemoryIcon {
    fn drop(&mut self) {
        self.ledger.record_destroyed();
    }
}

#[derive(Debug)]
pub struct MemoryIconBackend {
    ledger: Arc<HandleLedger>,
    assigned: Option<u64>,
}

impl MemoryIconBackend {
    pub fn new() -> Self {
        Self::with_ledger(HandleLedger::new())
    }

    pub fn with_ledger(ledger: Arc<HandleLedger>) -> Self {
        Self {
            ledger,
            assigned: None,
        }
    }

    pub fn ledger(&self) -> &Arc<HandleLedger> {
        &self.ledger
    }

    /// Id of the icon last assigned to the tray
    pub fn assigned(&self) -> Option<u64> {
        self.assigned
    }
}

impl Default for MemoryIconBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl IconBackend for MemoryIconBackend {
    type Icon = MemoryIcon;

    fn create_icon(&mut self, bitmap: &Bitmap) -> Result<MemoryIcon> {
        let id = self.ledger.record_created();
        Ok(MemoryIcon {
            id,
            bitmap: bitmap.clone(),
            ledger: Arc::clone(&self.ledger),
        })
    }

    fn assign(&mut self, icon: &MemoryIcon, _tooltip: &str) -> Result<()> {
        self.assigned = Some(icon.id);
        Ok(())
    }
}
