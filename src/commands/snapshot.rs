//! One-shot report readings, printed instead of shown in the report view.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;

use crate::core::config::Configuration;
use crate::core::context::UsageContext;
use crate::core::system_monitor::{ReportReadings, SysinfoMonitor};
use crate::ui::formatters::{battery_health_text, battery_text, network_text, usage_text};

const SAMPLE_GAP: Duration = Duration::from_millis(500);

pub fn execute(matches: &ArgMatches) -> Result<()> {
    let json_output = matches.get_flag("json");

    let config = Configuration::load().context("Failed to load configuration")?;
    let context = UsageContext::new(Box::new(SysinfoMonitor::new()), config);

    let readings = {
        let mut monitor = context.monitor().lock();
        // CPU usage and network rates are deltas between two refreshes
        ReportReadings::read(monitor.as_mut());
        std::thread::sleep(SAMPLE_GAP.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL));
        ReportReadings::read(monitor.as_mut())
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&readings)?);
        return Ok(());
    }

    print_readings(&readings, context.usage_target().as_str());
    Ok(())
}

fn print_readings(readings: &ReportReadings, tray_target: &str) {
    let row = |label: &str, value: &str| {
        println!("  {:<10} {}", label.dimmed(), value);
    };

    println!("{}", "usagepin report".bold().cyan());
    println!();
    row("CPU", &readings.cpu_name);
    row("", &usage_text(&readings.cpu));
    row("GPU", &readings.gpu_name);
    row("", &usage_text(&readings.gpu));
    row("Memory", &readings.memory_text);
    row("Network", &network_text(&readings.network));

    if let Some(battery) = &readings.battery {
        row("Battery", &battery_text(battery));
        if let Some(health) = readings.battery_health_percent {
            row("Health", &battery_health_text(health));
        }
    }

    println!();
    println!("{}", format!("Tray shows: {}", tray_target).dimmed());
}
