use serde::{Deserialize, Serialize};

use super::provider::HardwareMonitor;

/// Usage, temperature and power of one processor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageReading {
    pub usage_percent: f32,
    pub temperature_celsius: Option<f32>,
    /// 0 when the sensor is unknown
    pub power_watts: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkReading {
    pub upload_bytes_per_sec: u64,
    pub download_bytes_per_sec: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatteryReading {
    pub percent: Option<f32>,
    pub charge_rate_watts: Option<f32>,
}

/// Everything the report view shows, read in one batch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportReadings {
    pub timestamp: i64, // Unix timestamp
    pub cpu_name: String,
    pub gpu_name: String,
    pub cpu: UsageReading,
    pub gpu: UsageReading,
    pub memory_text: String,
    pub network: NetworkReading,
    /// `None` when no battery is present
    pub battery: Option<BatteryReading>,
    pub battery_health_percent: Option<f32>,
}

impl ReportReadings {
    /// Refresh every sensor group, then read them.
    pub fn read(monitor: &mut dyn HardwareMonitor) -> Self {
        monitor.update_cpu();
        monitor.update_memory();
        monitor.update_network();
        monitor.update_battery();
        monitor.update_current_gpu();

        let battery = monitor.has_battery().then(|| BatteryReading {
            percent: monitor.total_battery_percent(),
            charge_rate_watts: monitor.total_battery_charge_rate(),
        });

        Self {
            timestamp: chrono::Utc::now().timestamp(),
            cpu_name: monitor.cpu_name(),
            gpu_name: monitor.current_gpu_name(),
            cpu: UsageReading {
                usage_percent: monitor.average_cpu_usage(),
                temperature_celsius: monitor.average_cpu_temperature(),
                power_watts: monitor.total_cpu_package_power(),
            },
            gpu: UsageReading {
                usage_percent: monitor.current_gpu_usage(),
                temperature_celsius: monitor.current_gpu_temperature(),
                power_watts: monitor.current_gpu_power(),
            },
            memory_text: monitor.memory_information_text(),
            network: NetworkReading {
                upload_bytes_per_sec: monitor.network_upload_bytes_per_sec(),
                download_bytes_per_sec: monitor.network_download_bytes_per_sec(),
            },
            battery,
            battery_health_percent: monitor.average_battery_health_percent(),
        }
    }
}
