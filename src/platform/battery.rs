//! Aggregate battery statistics via the `battery` crate.

use battery::units::energy::watt_hour;
use battery::units::power::watt;
use battery::{Manager, State};

/// Totals across every battery in the system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryStatus {
    pub percent: f32,
    /// Positive while charging, negative while discharging
    pub charge_rate_watts: f32,
    /// `None` when no battery reports a design capacity
    pub health_percent: Option<f32>,
}

/// Samples the batteries on demand. A manager is created per refresh so the
/// monitor itself stays `Send`.
#[derive(Debug, Default)]
pub struct BatteryMonitor {
    status: Option<BatteryStatus>,
}

impl BatteryMonitor {
    pub fn new() -> Self {
        let mut monitor = Self::default();
        monitor.refresh();
        monitor
    }

    pub fn refresh(&mut self) {
        self.status = read_status();
    }

    pub fn status(&self) -> Option<BatteryStatus> {
        self.status
    }

    pub fn has_battery(&self) -> bool {
        self.status.is_some()
    }
}

fn read_status() -> Option<BatteryStatus> {
    let manager = Manager::new().ok()?;
    let batteries: Vec<_> = manager.batteries().ok()?.filter_map(|b| b.ok()).collect();
    if batteries.is_empty() {
        return None;
    }

    let mut energy = 0.0f32;
    let mut energy_full = 0.0f32;
    let mut rate = 0.0f32;
    let mut health = Vec::new();

    for battery in &batteries {
        energy += battery.energy().get::<watt_hour>();
        energy_full += battery.energy_full().get::<watt_hour>();

        let watts = battery.energy_rate().get::<watt>().abs();
        rate += match battery.state() {
            State::Charging => watts,
            State::Discharging => -watts,
            _ => 0.0,
        };

        let design = battery.energy_full_design().get::<watt_hour>();
        if design > 0.0 {
            health.push(battery.energy_full().get::<watt_hour>() / design * 100.0);
        }
    }

    let percent = if energy_full > 0.0 {
        (energy / energy_full * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };

    let health_percent =
        (!health.is_empty()).then(|| health.iter().sum::<f32>() / health.len() as f32);

    Some(BatteryStatus {
        percent,
        charge_rate_watts: rate,
        health_percent,
    })
}
