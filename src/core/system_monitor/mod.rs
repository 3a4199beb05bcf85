//! System monitoring core functionality.
//!
//! This module provides the sensor provider contract, its sysinfo-backed
//! implementation, the usage histories and the timers that poll them.

mod collector;
mod gpu;
mod history;
mod metrics;
mod provider;
pub mod runtime;
pub mod tasks;

pub use collector::SysinfoMonitor;
pub use gpu::{GpuProvider, GpuReading, GpuVendor};
pub use history::{UsageHistory, UsageSample, DEFAULT_HISTORY_SIZE};
pub use metrics::{BatteryReading, NetworkReading, ReportReadings, UsageReading};
pub use provider::{share, HardwareMonitor, SharedMonitor};
pub use runtime::{PeriodicTimer, Scheduler};
pub use tasks::{ReportPoller, TickOutcome, TrayPoller};
