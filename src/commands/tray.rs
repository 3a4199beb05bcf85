//! Native notification area command handler.

use anyhow::Result;
use clap::ArgMatches;

/// Execute the Windows notification area frontend
#[cfg(windows)]
pub fn execute(matches: &ArgMatches) -> Result<()> {
    use anyhow::Context;
    use std::time::Duration;

    use crate::core::config::Configuration;
    use crate::platform::windows::run_native_tray;

    let config = Configuration::load().context("Failed to load configuration")?;
    let interval = matches
        .get_one::<u64>("interval")
        .copied()
        .filter(|&ms| ms > 0)
        .unwrap_or_else(|| config.tray_interval_ms());

    println!("Usage icon added to the notification area.");
    println!("Left click switches CPU/GPU, right click exits.");
    println!("The report view is only in the terminal frontend ('usagepin run').");

    run_native_tray(config, Duration::from_millis(interval))
        .context("Failed to run notification area icon")
}

#[cfg(not(windows))]
pub fn execute(_matches: &ArgMatches) -> Result<()> {
    anyhow::bail!(
        "The notification area icon is only available on Windows.\n\
         Use 'usagepin run' for the terminal tray."
    )
}
