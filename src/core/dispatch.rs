//! Marshals results from timer tasks onto the UI thread.
//!
//! Timer tasks only ever `try_enqueue`; the UI loop owns the `UiQueue` and is
//! the only place that applies messages to UI state.

use tokio::sync::mpsc::{self, error::TryRecvError};

use crate::core::system_monitor::ReportReadings;
use crate::core::usage::UsageTarget;

/// Reading for one tray render pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrayUpdate {
    pub target: UsageTarget,
    /// Raw, unclamped reading
    pub usage: f32,
}

#[derive(Debug, Clone)]
pub enum UiMessage {
    Tray(TrayUpdate),
    Report(Box<ReportReadings>),
}

/// Sending side, cloned into every timer task
#[derive(Debug, Clone)]
pub struct Dispatcher {
    tx: mpsc::UnboundedSender<UiMessage>,
}

/// Receiving side, owned by the UI thread
#[derive(Debug)]
pub struct UiQueue {
    rx: mpsc::UnboundedReceiver<UiMessage>,
}

impl Dispatcher {
    pub fn channel() -> (Dispatcher, UiQueue) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Dispatcher { tx }, UiQueue { rx })
    }

    /// Returns `false` once the UI side is gone.
    pub fn try_enqueue(&self, message: UiMessage) -> bool {
        self.tx.send(message).is_ok()
    }
}

impl UiQueue {
    /// Everything queued so far, in arrival order
    pub fn drain(&mut self) -> Vec<UiMessage> {
        let mut messages = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(message) => messages.push(message),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        messages
    }
}
