use std::sync::Arc;

use parking_lot::Mutex;

/// Sensor provider consumed by the tray and the report view.
///
/// Getters return the values captured by the most recent `update_*` call for
/// their group, so callers refresh a group before reading it. Power getters
/// return 0 when the sensor is unknown; optional getters return `None` when
/// the capability is missing.
pub trait HardwareMonitor: Send {
    fn update_cpu(&mut self);
    fn update_memory(&mut self);
    fn update_network(&mut self);
    fn update_battery(&mut self);
    fn update_current_gpu(&mut self);

    fn cpu_name(&self) -> String;
    fn average_cpu_usage(&self) -> f32;
    fn average_cpu_temperature(&self) -> Option<f32>;
    fn total_cpu_package_power(&self) -> f32;

    fn current_gpu_usage(&self) -> f32;
    fn current_gpu_temperature(&self) -> Option<f32>;
    fn current_gpu_power(&self) -> f32;
    fn current_gpu_name(&self) -> String;
    fn gpu_names(&self) -> Vec<String>;
    /// Retarget the `current_gpu_*` getters. Out-of-range indices are ignored.
    fn select_gpu(&mut self, index: usize);

    fn memory_information_text(&self) -> String;
    fn network_upload_bytes_per_sec(&self) -> u64;
    fn network_download_bytes_per_sec(&self) -> u64;

    fn has_battery(&self) -> bool;
    fn total_battery_percent(&self) -> Option<f32>;
    /// Positive while charging, negative while discharging
    fn total_battery_charge_rate(&self) -> Option<f32>;
    fn average_battery_health_percent(&self) -> Option<f32>;
}

/// Monitor shared between the timer tasks and the UI thread
pub type SharedMonitor = Arc<Mutex<Box<dyn HardwareMonitor>>>;

pub fn share(monitor: Box<dyn HardwareMonitor>) -> SharedMonitor {
    Arc::new(Mutex::new(monitor))
}
