//! GPU-specific platform code.
//!
//! Provides GPU metrics collection for the supported vendors.
//! NVIDIA is supported through NVML (feature `nvml`, on by default).

mod nvidia;

pub use nvidia::NvidiaGpuProvider;

use crate::core::system_monitor::GpuProvider;
use crate::error::{Result, UsagePinError};

/// Attempt to get an available GPU provider
///
/// Returns error if no supported GPU is available.
pub fn get_gpu_provider() -> Result<Box<dyn GpuProvider>> {
    match NvidiaGpuProvider::new() {
        Ok(provider) => Ok(Box::new(provider)),
        Err(e) => {
            log::info!("NVIDIA provider unavailable: {}", e);
            Err(UsagePinError::gpu_not_available("No supported GPU found"))
        }
    }
}
