use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::usage::UsageTarget;
use crate::error::{Result, UsagePinError};

/// Metric feeding the tray icon ("CPU" or "GPU")
pub const LAST_USAGE_TARGET: &str = "LastUsageTarget";
/// Selected adapter when more than one GPU is present
pub const GPU_INDEX: &str = "GpuIndex";
/// Number of samples kept per usage history
pub const HISTORY_CAPACITY: &str = "HistoryCapacity";
/// Tray refresh period in milliseconds
pub const TRAY_INTERVAL_MS: &str = "TrayIntervalMs";

pub const DEFAULT_TRAY_INTERVAL_MS: u64 = 250;

/// Persisted key/value settings.
///
/// Every `set_value` writes the whole document back to disk before returning.
/// A missing, empty or unreadable file loads as an empty store.
#[derive(Debug, Default, Clone)]
pub struct Configuration {
    path: Option<PathBuf>,
    values: Map<String, Value>,
}

impl Configuration {
    /// Load from the per-user config directory
    pub fn load() -> Result<Self> {
        Self::load_from(Self::default_path()?)
    }

    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let values = if !path.exists() {
            Map::new()
        } else {
            let data = fs::read(&path)?;
            if data.is_empty() {
                Map::new()
            } else {
                serde_json::from_slice(&data).unwrap_or_else(|e| {
                    // Corrupted or from an incompatible version
                    log::warn!("Ignoring unreadable config {:?}: {}", path, e);
                    Map::new()
                })
            }
        };

        Ok(Self {
            path: Some(path),
            values,
        })
    }

    /// A store that never touches the disk
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get_value<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.values
            .get(key)
            .cloned()
            .and_then(|value| serde_json::from_value(value).ok())
    }

    pub fn set_value<T: Serialize>(&mut self, key: &str, value: T) -> Result<()> {
        self.values
            .insert(key.to_string(), serde_json::to_value(value)?);
        self.save()
    }

    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let data = serde_json::to_vec_pretty(&self.values)?;
        fs::write(path, data)?;

        log::debug!("Configuration saved to {:?}", path);
        Ok(())
    }

    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| UsagePinError::config("Could not determine config directory"))?;

        Ok(config_dir.join("usagepin").join("config.json"))
    }

    // Typed accessors

    pub fn usage_target(&self) -> UsageTarget {
        self.get_value::<String>(LAST_USAGE_TARGET)
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    pub fn set_usage_target(&mut self, target: UsageTarget) -> Result<()> {
        self.set_value(LAST_USAGE_TARGET, target.as_str())
    }

    pub fn gpu_index(&self) -> usize {
        self.get_value::<usize>(GPU_INDEX).unwrap_or(0)
    }

    pub fn set_gpu_index(&mut self, index: usize) -> Result<()> {
        self.set_value(GPU_INDEX, index)
    }

    pub fn history_capacity(&self) -> Option<usize> {
        self.get_value::<usize>(HISTORY_CAPACITY).filter(|&c| c > 0)
    }

    pub fn tray_interval_ms(&self) -> u64 {
        self.get_value::<u64>(TRAY_INTERVAL_MS)
            .filter(|&ms| ms > 0)
            .unwrap_or(DEFAULT_TRAY_INTERVAL_MS)
    }
}
