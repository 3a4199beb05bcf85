use std::time::Instant;

use humansize::{format_size, BINARY};
use sysinfo::{Components, CpuRefreshKind, MemoryRefreshKind, Networks, RefreshKind, System};

use crate::platform::battery::BatteryMonitor;
use crate::platform::gpu::get_gpu_provider;
use crate::platform::rapl::RaplMeter;

use super::gpu::{GpuProvider, GpuReading};
use super::provider::HardwareMonitor;

/// Component labels that belong to the CPU package
const CPU_SENSOR_LABELS: &[&str] = &["cpu", "package", "core", "tctl", "tdie", "k10temp"];

/// `HardwareMonitor` backed by sysinfo, the battery crate and NVML.
pub struct SysinfoMonitor {
    system: System,
    components: Components,
    networks: Networks,
    gpu_provider: Option<Box<dyn GpuProvider>>,
    gpu_names: Vec<String>,
    gpu_index: usize,
    gpu: Option<GpuReading>,
    battery: BatteryMonitor,
    cpu_power: RaplMeter,
    last_network_update: Option<Instant>,
    upload_bytes_per_sec: u64,
    download_bytes_per_sec: u64,
}

impl SysinfoMonitor {
    pub fn new() -> Self {
        let refresh_kind = RefreshKind::nothing()
            .with_cpu(CpuRefreshKind::everything())
            .with_memory(MemoryRefreshKind::everything());

        let system = System::new_with_specifics(refresh_kind);
        let components = Components::new_with_refreshed_list();
        let networks = Networks::new_with_refreshed_list();

        // Missing GPU support is not an error, the GPU readings just stay at zero
        let gpu_provider = get_gpu_provider().ok();
        let gpu_names = gpu_provider
            .as_ref()
            .map(|p| p.adapter_names())
            .unwrap_or_default();

        let vendor = gpu_provider
            .as_ref()
            .map(|p| p.vendor())
            .unwrap_or_default();
        log::info!(
            "Hardware monitor ready: {} CPU(s), {} {} GPU(s)",
            system.cpus().len(),
            gpu_names.len(),
            vendor
        );

        Self {
            system,
            components,
            networks,
            gpu_provider,
            gpu_names,
            gpu_index: 0,
            gpu: None,
            battery: BatteryMonitor::new(),
            cpu_power: RaplMeter::detect(),
            last_network_update: None,
            upload_bytes_per_sec: 0,
            download_bytes_per_sec: 0,
        }
    }
}

impl Default for SysinfoMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl HardwareMonitor for SysinfoMonitor {
    fn update_cpu(&mut self) {
        self.system.refresh_cpu_usage();
        self.components.refresh(true);
        self.cpu_power.refresh();
    }

    fn update_memory(&mut self) {
        self.system.refresh_memory();
    }

    fn update_network(&mut self) {
        let now = Instant::now();
        let elapsed_secs = self
            .last_network_update
            .map(|t| now.duration_since(t).as_secs_f64())
            .unwrap_or(1.0)
            .max(f64::EPSILON);

        self.networks.refresh(true);

        // received()/transmitted() are deltas since the previous refresh
        let (rx, tx) = self
            .networks
            .values()
            .fold((0u64, 0u64), |(rx, tx), data| {
                (rx + data.received(), tx + data.transmitted())
            });

        if self.last_network_update.is_some() {
            self.download_bytes_per_sec = (rx as f64 / elapsed_secs) as u64;
            self.upload_bytes_per_sec = (tx as f64 / elapsed_secs) as u64;
        }
        self.last_network_update = Some(now);
    }

    fn update_battery(&mut self) {
        self.battery.refresh();
    }

    fn update_current_gpu(&mut self) {
        let index = self.gpu_index;
        self.gpu = self
            .gpu_provider
            .as_mut()
            .and_then(|provider| match provider.collect(index) {
                Ok(reading) => Some(reading),
                Err(e) => {
                    log::debug!("GPU {} collection failed: {}", index, e);
                    None
                }
            });
    }

    fn cpu_name(&self) -> String {
        self.system
            .cpus()
            .first()
            .map(|c| c.brand().trim().to_string())
            .unwrap_or_default()
    }

    fn average_cpu_usage(&self) -> f32 {
        self.system.global_cpu_usage()
    }

    fn average_cpu_temperature(&self) -> Option<f32> {
        let temps: Vec<f32> = self
            .components
            .iter()
            .filter(|c| {
                let label = c.label().to_lowercase();
                CPU_SENSOR_LABELS.iter().any(|l| label.contains(l))
            })
            .filter_map(|c| c.temperature())
            .filter(|t| t.is_finite() && *t > 0.0)
            .collect();

        if temps.is_empty() {
            None
        } else {
            Some(temps.iter().sum::<f32>() / temps.len() as f32)
        }
    }

    fn total_cpu_package_power(&self) -> f32 {
        // 0 (unknown) without a readable RAPL counter
        self.cpu_power.watts().unwrap_or(0.0)
    }

    fn current_gpu_usage(&self) -> f32 {
        self.gpu
            .as_ref()
            .map(|g| g.utilization_percent)
            .unwrap_or(0.0)
    }

    fn current_gpu_temperature(&self) -> Option<f32> {
        self.gpu.as_ref().and_then(|g| g.temperature_celsius)
    }

    fn current_gpu_power(&self) -> f32 {
        self.gpu.as_ref().and_then(|g| g.power_watts).unwrap_or(0.0)
    }

    fn current_gpu_name(&self) -> String {
        self.gpu_names
            .get(self.gpu_index)
            .cloned()
            .unwrap_or_default()
    }

    fn gpu_names(&self) -> Vec<String> {
        self.gpu_names.clone()
    }

    fn select_gpu(&mut self, index: usize) {
        if index < self.gpu_names.len() {
            self.gpu_index = index;
            self.gpu = None;
        }
    }

    fn memory_information_text(&self) -> String {
        let total = self.system.total_memory();
        let used = self.system.used_memory();
        let percent = if total > 0 {
            (used as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        format!(
            "{} / {} ({:.0}%)",
            format_size(used, BINARY),
            format_size(total, BINARY),
            percent
        )
    }

    fn network_upload_bytes_per_sec(&self) -> u64 {
        self.upload_bytes_per_sec
    }

    fn network_download_bytes_per_sec(&self) -> u64 {
        self.download_bytes_per_sec
    }

    fn has_battery(&self) -> bool {
        self.battery.has_battery()
    }

    fn total_battery_percent(&self) -> Option<f32> {
        self.battery.status().map(|s| s.percent)
    }

    fn total_battery_charge_rate(&self) -> Option<f32> {
        self.battery.status().map(|s| s.charge_rate_watts)
    }

    fn average_battery_health_percent(&self) -> Option<f32> {
        self.battery.status().and_then(|s| s.health_percent)
    }
}
