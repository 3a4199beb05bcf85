//! Report view controller.
//!
//! Owns what the report shows and its 1 Hz refresh timer. The view is opened
//! on demand, refreshed synchronously once, then kept current by the timer
//! until it is closed (explicitly or by losing focus).

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::core::context::UsageContext;
use crate::core::dispatch::Dispatcher;
use crate::core::system_monitor::{
    PeriodicTimer, ReportPoller, ReportReadings, Scheduler, UsageHistory,
};
use crate::core::usage::UsageTarget;
use crate::error::Result;
use crate::ui::formatters::{battery_health_text, battery_text, network_text, usage_text};

pub const REPORT_REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// Adapter picker, only present with more than one GPU
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GpuSelector {
    pub names: Vec<String>,
    pub selected: usize,
}

/// Display state of the report view
#[derive(Debug, Clone, Default)]
pub struct ReportView {
    pub target: UsageTarget,
    pub cpu_name: String,
    pub gpu_name: String,
    pub cpu_usage: f32,
    pub gpu_usage: f32,
    pub cpu_text: String,
    pub gpu_text: String,
    pub memory_text: String,
    pub network_text: String,
    pub battery_text: Option<String>,
    pub battery_health_text: Option<String>,
    pub show_battery: bool,
    pub show_battery_health: bool,
    pub gpu_selector: Option<GpuSelector>,
}

impl ReportView {
    /// Radio state of the CPU/GPU toggle
    pub fn is_selected(&self, target: UsageTarget) -> bool {
        self.target == target
    }
}

pub struct ReportWindow {
    context: UsageContext,
    dispatcher: Dispatcher,
    timer: Option<PeriodicTimer>,
    view: ReportView,
}

impl ReportWindow {
    pub fn new(context: UsageContext, dispatcher: Dispatcher) -> Self {
        let view = ReportView {
            target: context.usage_target(),
            ..Default::default()
        };
        Self {
            context,
            dispatcher,
            timer: None,
            view,
        }
    }

    /// Open the view. Returns `false` (and starts nothing) if already open.
    pub fn open(&mut self, scheduler: &Scheduler) -> bool {
        if self.is_open() {
            return false;
        }

        self.view = ReportView {
            target: self.context.usage_target(),
            ..Default::default()
        };

        let readings = self.refresh_now();

        self.view.show_battery = readings.battery.is_some();
        self.view.show_battery_health =
            self.view.show_battery && readings.battery_health_percent.is_some();

        let names = self.context.monitor().lock().gpu_names();
        self.view.gpu_selector = (names.len() > 1).then(|| GpuSelector {
            selected: self.context.gpu_index().min(names.len() - 1),
            names,
        });

        let poller = ReportPoller::new(self.context.clone(), self.dispatcher.clone());
        self.timer = Some(scheduler.every("report", REPORT_REFRESH_INTERVAL, move || {
            poller.tick();
        }));

        log::info!("Report view opened");
        true
    }

    /// Close the view and stop its timer. Returns `false` if it was closed.
    pub fn close(&mut self) -> bool {
        match self.timer.take() {
            Some(mut timer) => {
                timer.stop();
                log::info!("Report view closed");
                true
            }
            None => false,
        }
    }

    /// Click-away dismissal
    pub fn on_focus_lost(&mut self) -> bool {
        self.close()
    }

    pub fn is_open(&self) -> bool {
        self.timer.is_some()
    }

    /// Read every sensor synchronously and apply the result.
    pub fn refresh_now(&mut self) -> ReportReadings {
        let readings = {
            let mut monitor = self.context.monitor().lock();
            ReportReadings::read(monitor.as_mut())
        };
        self.apply(&readings);
        readings
    }

    /// Apply readings delivered by the refresh timer (UI thread).
    pub fn apply(&mut self, readings: &ReportReadings) {
        let view = &mut self.view;

        view.cpu_name = readings.cpu_name.clone();
        view.gpu_name = readings.gpu_name.clone();
        view.cpu_usage = readings.cpu.usage_percent;
        view.gpu_usage = readings.gpu.usage_percent;
        view.cpu_text = usage_text(&readings.cpu);
        view.gpu_text = usage_text(&readings.gpu);
        view.memory_text = readings.memory_text.clone();
        view.network_text = network_text(&readings.network);

        if let Some(battery) = &readings.battery {
            view.battery_text = Some(battery_text(battery));
        }
        if let Some(health) = readings.battery_health_percent {
            view.battery_health_text = Some(battery_health_text(health));
        }
    }

    /// Switch the metric feeding the tray and the chart, and persist it.
    pub fn select_target(&mut self, target: UsageTarget) -> Result<()> {
        self.context.set_usage_target(target)?;
        self.view.target = target;
        Ok(())
    }

    pub fn toggle_target(&mut self) -> Result<UsageTarget> {
        let target = self.view.target.toggled();
        self.select_target(target)?;
        Ok(target)
    }

    /// Select an adapter, persist its index and refresh right away.
    /// Returns `false` when there is no selector or the index is out of range.
    pub fn select_gpu(&mut self, index: usize) -> Result<bool> {
        let in_range = self
            .view
            .gpu_selector
            .as_ref()
            .is_some_and(|s| index < s.names.len());
        if !in_range {
            return Ok(false);
        }

        self.context.set_gpu_index(index)?;
        if let Some(selector) = self.view.gpu_selector.as_mut() {
            selector.selected = index;
        }
        self.refresh_now();
        Ok(true)
    }

    /// Move the adapter selection by `delta`, wrapping around.
    pub fn cycle_gpu(&mut self, delta: isize) -> Result<bool> {
        let Some(selector) = &self.view.gpu_selector else {
            return Ok(false);
        };
        let len = selector.names.len() as isize;
        let next = (selector.selected as isize + delta).rem_euclid(len) as usize;
        self.select_gpu(next)
    }

    pub fn view(&self) -> &ReportView {
        &self.view
    }

    /// History feeding the chart (follows the selected target)
    pub fn chart_history(&self) -> Arc<Mutex<UsageHistory>> {
        self.context.history(self.view.target)
    }
}

impl Drop for ReportWindow {
    fn drop(&mut self) {
        self.close();
    }
}
