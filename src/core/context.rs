use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::core::config::Configuration;
use crate::core::system_monitor::{share, HardwareMonitor, SharedMonitor, UsageHistory};
use crate::core::usage::UsageTarget;
use crate::error::Result;

/// Process-wide state shared by the tray poller and the report view.
///
/// Cloning is cheap; every clone points at the same monitor, settings and
/// histories.
#[derive(Clone)]
pub struct UsageContext {
    monitor: SharedMonitor,
    config: Arc<RwLock<Configuration>>,
    cpu_history: Arc<Mutex<UsageHistory>>,
    gpu_history: Arc<Mutex<UsageHistory>>,
}

impl UsageContext {
    /// Applies the persisted GPU index to the monitor (when in range).
    pub fn new(monitor: Box<dyn HardwareMonitor>, config: Configuration) -> Self {
        let history = || match config.history_capacity() {
            Some(capacity) => UsageHistory::with_capacity(capacity),
            None => UsageHistory::new(),
        };
        let cpu_history = Arc::new(Mutex::new(history()));
        let gpu_history = Arc::new(Mutex::new(history()));

        let monitor = share(monitor);
        {
            let mut monitor = monitor.lock();
            let index = config.gpu_index();
            if index < monitor.gpu_names().len() {
                monitor.select_gpu(index);
            }
        }

        Self {
            monitor,
            config: Arc::new(RwLock::new(config)),
            cpu_history,
            gpu_history,
        }
    }

    pub fn monitor(&self) -> &SharedMonitor {
        &self.monitor
    }

    pub fn config(&self) -> &Arc<RwLock<Configuration>> {
        &self.config
    }

    pub fn usage_target(&self) -> UsageTarget {
        self.config.read().usage_target()
    }

    pub fn set_usage_target(&self, target: UsageTarget) -> Result<()> {
        self.config.write().set_usage_target(target)?;
        log::info!("Usage target set to {}", target);
        Ok(())
    }

    pub fn gpu_index(&self) -> usize {
        self.config.read().gpu_index()
    }

    /// Persist the adapter index and point the monitor at it.
    pub fn set_gpu_index(&self, index: usize) -> Result<()> {
        self.config.write().set_gpu_index(index)?;
        self.monitor.lock().select_gpu(index);
        log::info!("GPU index set to {}", index);
        Ok(())
    }

    pub fn history(&self, target: UsageTarget) -> Arc<Mutex<UsageHistory>> {
        match target {
            UsageTarget::Cpu => Arc::clone(&self.cpu_history),
            UsageTarget::Gpu => Arc::clone(&self.gpu_history),
        }
    }
}
