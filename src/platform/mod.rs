// Platform-specific code module

pub mod battery;
pub mod gpu;
pub mod rapl;

#[cfg(windows)]
pub mod windows;

pub use battery::{BatteryMonitor, BatteryStatus};
pub use gpu::get_gpu_provider;
pub use rapl::RaplMeter;
