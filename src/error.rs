use std::io;
use thiserror::Error;

/// Custom error type for usagepin
#[derive(Error, Debug)]
pub enum UsagePinError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("GPU not available: {0}")]
    GpuNotAvailable(String),

    #[error("Metric collection failed: {0}")]
    MetricCollection(String),

    #[error("Icon error: {0}")]
    Icon(String),

    #[error("Scheduler error: {0}")]
    Scheduler(String),

    #[error("Platform error: {0}")]
    Platform(String),
}

/// Result type alias for usagepin
pub type Result<T> = std::result::Result<T, UsagePinError>;

impl UsagePinError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        UsagePinError::Config(msg.into())
    }

    pub fn gpu_not_available<S: Into<String>>(msg: S) -> Self {
        UsagePinError::GpuNotAvailable(msg.into())
    }

    pub fn metric_collection<S: Into<String>>(msg: S) -> Self {
        UsagePinError::MetricCollection(msg.into())
    }

    /// Create an icon error (bitmap or handle creation failed)
    pub fn icon<S: Into<String>>(msg: S) -> Self {
        UsagePinError::Icon(msg.into())
    }

    pub fn scheduler<S: Into<String>>(msg: S) -> Self {
        UsagePinError::Scheduler(msg.into())
    }

    pub fn platform<S: Into<String>>(msg: S) -> Self {
        UsagePinError::Platform(msg.into())
    }
}
