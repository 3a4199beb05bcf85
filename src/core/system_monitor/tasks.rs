//! Tick bodies run by the tray and report timers.
//!
//! Both run on the timer runtime: they query the monitor, record history and
//! enqueue the result for the UI thread. Nothing here touches UI state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::core::context::UsageContext;
use crate::core::dispatch::{Dispatcher, TrayUpdate, UiMessage};
use crate::core::usage::UsageTarget;

use super::history::UsageSample;
use super::metrics::ReportReadings;

/// What happened to one tray tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// A render pass was queued for the UI thread
    Enqueued,
    /// The previous render had not completed; this one was dropped
    Dropped,
    /// The UI side is gone
    Closed,
}

/// Samples CPU and GPU usage for the tray icon.
pub struct TrayPoller {
    context: UsageContext,
    dispatcher: Dispatcher,
    in_progress: Arc<AtomicBool>,
}

impl TrayPoller {
    pub fn new(context: UsageContext, dispatcher: Dispatcher) -> Self {
        Self {
            context,
            dispatcher,
            in_progress: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag set while a render pass is queued or running. The renderer
    /// clears it when the pass completes.
    pub fn render_guard(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.in_progress)
    }

    pub fn tick(&self) -> TickOutcome {
        let target = self.context.usage_target();

        let (cpu_usage, cpu_sample, gpu_usage, gpu_sample) = {
            let mut monitor = self.context.monitor().lock();
            monitor.update_cpu();
            monitor.update_current_gpu();

            let cpu_usage = monitor.average_cpu_usage();
            let gpu_usage = monitor.current_gpu_usage();

            let cpu_sample = UsageSample::new(cpu_usage)
                .with_temperature(monitor.average_cpu_temperature())
                .with_power(monitor.total_cpu_package_power());
            let gpu_sample = UsageSample::new(gpu_usage)
                .with_temperature(monitor.current_gpu_temperature())
                .with_power(monitor.current_gpu_power());

            (cpu_usage, cpu_sample, gpu_usage, gpu_sample)
        };

        // Both histories grow every tick so switching targets shows a full chart
        self.context.history(UsageTarget::Cpu).lock().push(cpu_sample);
        self.context.history(UsageTarget::Gpu).lock().push(gpu_sample);

        let usage = match target {
            UsageTarget::Cpu => cpu_usage,
            UsageTarget::Gpu => gpu_usage,
        };

        if self
            .in_progress
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            log::trace!("Tray render still pending, dropping tick");
            return TickOutcome::Dropped;
        }

        if self
            .dispatcher
            .try_enqueue(UiMessage::Tray(TrayUpdate { target, usage }))
        {
            TickOutcome::Enqueued
        } else {
            self.in_progress.store(false, Ordering::Release);
            TickOutcome::Closed
        }
    }

    /// Fresh reading of the selected target, for an out-of-band render on the
    /// UI thread. Leaves the histories and the in-progress flag alone.
    pub fn read_now(&self) -> TrayUpdate {
        let target = self.context.usage_target();
        let mut monitor = self.context.monitor().lock();
        let usage = match target {
            UsageTarget::Cpu => {
                monitor.update_cpu();
                monitor.average_cpu_usage()
            }
            UsageTarget::Gpu => {
                monitor.update_current_gpu();
                monitor.current_gpu_usage()
            }
        };
        TrayUpdate { target, usage }
    }

    /// A queued update taken before a target switch shows the selected
    /// target's sample from the same tick instead.
    pub fn retarget(&self, update: TrayUpdate) -> TrayUpdate {
        let target = self.context.usage_target();
        if update.target == target {
            return update;
        }
        let usage = self
            .context
            .history(target)
            .lock()
            .latest()
            .map(|sample| sample.value as f32)
            .unwrap_or(0.0);
        TrayUpdate { target, usage }
    }
}

/// Refreshes the report view while it is open.
pub struct ReportPoller {
    context: UsageContext,
    dispatcher: Dispatcher,
}

impl ReportPoller {
    pub fn new(context: UsageContext, dispatcher: Dispatcher) -> Self {
        Self {
            context,
            dispatcher,
        }
    }

    /// Returns `false` once the UI side is gone.
    pub fn tick(&self) -> bool {
        let readings = {
            let mut monitor = self.context.monitor().lock();
            ReportReadings::read(monitor.as_mut())
        };
        self.dispatcher
            .try_enqueue(UiMessage::Report(Box::new(readings)))
    }
}
