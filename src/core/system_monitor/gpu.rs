use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub enum GpuVendor {
    Nvidia,
    #[default]
    Unknown,
}

impl std::fmt::Display for GpuVendor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GpuVendor::Nvidia => write!(f, "NVIDIA"),
            GpuVendor::Unknown => write!(f, "Unknown"),
        }
    }
}

/// One sample of a single adapter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GpuReading {
    pub name: String,
    pub utilization_percent: f32,
    pub temperature_celsius: Option<f32>,
    pub power_watts: Option<f32>,
}

/// Trait for GPU metrics providers
///
/// This trait abstracts GPU monitoring across different vendors.
/// Implementations are provided in the platform layer.
pub trait GpuProvider: Send {
    /// Get the vendor of the GPUs behind this provider
    fn vendor(&self) -> GpuVendor;

    /// Names of every adapter, in index order
    fn adapter_names(&self) -> Vec<String>;

    /// Sample the adapter at `index`
    fn collect(&mut self, index: usize) -> Result<GpuReading>;
}
