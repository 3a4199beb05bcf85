#[cfg(feature = "nvml")]
use nvml_wrapper::{enum_wrappers::device::TemperatureSensor, Device, Nvml};

use crate::core::system_monitor::{GpuProvider, GpuReading, GpuVendor};
use crate::error::{Result, UsagePinError};

/// NVIDIA GPU provider using NVML
pub struct NvidiaGpuProvider {
    #[cfg(feature = "nvml")]
    nvml: Nvml,
    names: Vec<String>,
}

impl NvidiaGpuProvider {
    /// Initialize NVML and enumerate every adapter.
    pub fn new() -> Result<Self> {
        #[cfg(feature = "nvml")]
        {
            let nvml = Nvml::init().map_err(|e| {
                UsagePinError::gpu_not_available(format!("Failed to init NVML: {}", e))
            })?;

            let count = nvml.device_count().map_err(|e| {
                UsagePinError::gpu_not_available(format!("Failed to count GPUs: {}", e))
            })?;
            if count == 0 {
                return Err(UsagePinError::gpu_not_available("NVML reports no GPUs"));
            }

            let names = (0..count)
                .map(|i| {
                    nvml.device_by_index(i)
                        .and_then(|d| d.name())
                        .unwrap_or_else(|_| format!("NVIDIA GPU {}", i))
                })
                .collect();

            Ok(Self { nvml, names })
        }
        #[cfg(not(feature = "nvml"))]
        {
            Err(UsagePinError::gpu_not_available(
                "NVIDIA GPU support not enabled",
            ))
        }
    }

    #[cfg(feature = "nvml")]
    fn get_device(&self, index: usize) -> Result<Device<'_>> {
        self.nvml.device_by_index(index as u32).map_err(|e| {
            UsagePinError::metric_collection(format!("Failed to get GPU {}: {}", index, e))
        })
    }
}

impl GpuProvider for NvidiaGpuProvider {
    fn vendor(&self) -> GpuVendor {
        GpuVendor::Nvidia
    }

    fn adapter_names(&self) -> Vec<String> {
        self.names.clone()
    }

    fn collect(&mut self, index: usize) -> Result<GpuReading> {
        #[cfg(feature = "nvml")]
        {
            let device = self.get_device(index)?;

            let utilization = device.utilization_rates().map_err(|e| {
                UsagePinError::metric_collection(format!("Failed to read utilization: {}", e))
            })?;

            Ok(GpuReading {
                name: self.names.get(index).cloned().unwrap_or_default(),
                utilization_percent: utilization.gpu as f32,
                temperature_celsius: device
                    .temperature(TemperatureSensor::Gpu)
                    .ok()
                    .map(|t| t as f32),
                power_watts: device.power_usage().ok().map(|mw| mw as f32 / 1000.0), // milliwatts -> watts
            })
        }
        #[cfg(not(feature = "nvml"))]
        {
            let _ = index;
            Err(UsagePinError::gpu_not_available(
                "NVIDIA GPU support not enabled",
            ))
        }
    }
}
