//! Usage targets and the tray label/tooltip text derived from a reading.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UsagePinError;
use crate::utils::format_n0;

/// Upper bound of a usage reading; some sensors overshoot it.
pub const MAX_USAGE: f32 = 100.0;

/// Label drawn instead of "100", which does not fit the icon.
pub const SATURATED_LABEL: &str = "M";

/// Which metric feeds the tray icon and the report chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UsageTarget {
    #[default]
    Cpu,
    Gpu,
}

impl UsageTarget {
    /// Persisted spelling ("CPU" / "GPU")
    pub fn as_str(&self) -> &'static str {
        match self {
            UsageTarget::Cpu => "CPU",
            UsageTarget::Gpu => "GPU",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            UsageTarget::Cpu => UsageTarget::Gpu,
            UsageTarget::Gpu => UsageTarget::Cpu,
        }
    }

    pub fn all() -> [UsageTarget; 2] {
        [UsageTarget::Cpu, UsageTarget::Gpu]
    }
}

impl fmt::Display for UsageTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UsageTarget {
    type Err = UsagePinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CPU" => Ok(UsageTarget::Cpu),
            "GPU" => Ok(UsageTarget::Gpu),
            other => Err(UsagePinError::config(format!(
                "Unknown usage target '{}' (expected CPU or GPU)",
                other
            ))),
        }
    }
}

/// Clamp a raw reading into `[0, 100]`. NaN reads as 0.
pub fn clamp_usage(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, MAX_USAGE)
    }
}

/// Text drawn on the tray icon for a raw reading.
pub fn usage_label(value: f32) -> String {
    let clamped = clamp_usage(value);
    if clamped >= MAX_USAGE {
        return SATURATED_LABEL.to_string();
    }
    format_n0(clamped as f64)
}

/// Tooltip shown when hovering the tray icon, e.g. `CPU Usage: 42%`.
pub fn tooltip_text(target: UsageTarget, value: f32) -> String {
    format!("{} Usage: {}%", target, format_n0(value as f64))
}
