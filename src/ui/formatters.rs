//! Text shown in the report view.

use crate::core::system_monitor::{BatteryReading, NetworkReading, UsageReading};
use crate::utils::{format_n0, format_n1};

/// `42%`, `42% / 61°C`, `42% / 61°C / 35 W`
pub fn usage_text(reading: &UsageReading) -> String {
    let mut text = format!("{}%", format_n0(reading.usage_percent as f64));

    if let Some(temp) = reading.temperature_celsius {
        text.push_str(&format!(" / {}°C", format_n0(temp as f64)));
    }
    if reading.power_watts != 0.0 {
        text.push_str(&format!(" / {} W", format_n0(reading.power_watts as f64)));
    }

    text
}

/// `81%`, `81% / +12.5 W`, `81% / -7.0 W`
pub fn battery_text(reading: &BatteryReading) -> String {
    let mut text = format!("{}%", format_n0(reading.percent.unwrap_or(0.0) as f64));

    if let Some(rate) = reading.charge_rate_watts {
        let sign = if rate > 0.0 { "+" } else { "" };
        text.push_str(&format!(" / {}{} W", sign, format_n1(rate as f64)));
    }

    text
}

pub fn battery_health_text(health_percent: f32) -> String {
    format!("{}%", format_n0(health_percent as f64))
}

/// `U: 12 KB/s D: 1,024 KB/s`
pub fn network_text(reading: &NetworkReading) -> String {
    let upload = reading.upload_bytes_per_sec as f64 / 1024.0;
    let download = reading.download_bytes_per_sec as f64 / 1024.0;
    format!(
        "U: {} KB/s D: {} KB/s",
        format_n0(upload),
        format_n0(download)
    )
}
