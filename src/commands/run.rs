//! Terminal tray command handler.

use anyhow::{Context, Result};
use clap::ArgMatches;

use crate::core::config::Configuration;
use crate::ui::tray_tui::run_tray_app;

/// Execute the terminal frontend. `matches` is `None` when no subcommand was
/// given.
pub fn execute(matches: Option<&ArgMatches>) -> Result<()> {
    let interval = matches.and_then(|m| m.get_one::<u64>("interval").copied());

    let config = Configuration::load().context("Failed to load configuration")?;
    log::info!(
        "Starting tray (target: {}, interval: {} ms)",
        config.usage_target(),
        interval.unwrap_or_else(|| config.tray_interval_ms())
    );

    run_tray_app(config, interval).context("Failed to run tray")
}
