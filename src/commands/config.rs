use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;

use crate::core::config::Configuration;
use crate::core::usage::UsageTarget;
use crate::platform::get_gpu_provider;

pub fn handle_get(matches: &ArgMatches) -> Result<()> {
    let config = Configuration::load().context("Failed to load configuration")?;

    match matches.subcommand() {
        Some(("target", _)) => {
            println!("{} {}", "Usage target:".bold(), config.usage_target());
        }
        Some(("gpu", _)) => {
            println!("{} {}", "GPU index:".bold(), config.gpu_index());
        }
        Some(("path", _)) => match config.path() {
            Some(path) => println!("{} {}", "Config file:".bold(), path.display()),
            None => println!("{}", "No config file in use".yellow()),
        },
        _ => println!("Use 'usagepin get --help' for more information."),
    }
    Ok(())
}

pub fn handle_set(matches: &ArgMatches) -> Result<()> {
    let mut config = Configuration::load().context("Failed to load configuration")?;

    match matches.subcommand() {
        Some(("target", sub_matches)) => {
            let value = sub_matches
                .get_one::<String>("target")
                .context("Target argument is required")?;
            let target: UsageTarget = value.parse()?;
            set_target(&mut config, target)
        }
        Some(("gpu", sub_matches)) => {
            let index = *sub_matches
                .get_one::<usize>("index")
                .context("Index argument is required")?;
            set_gpu(&mut config, index)
        }
        _ => {
            println!("Use 'usagepin set --help' for more information.");
            Ok(())
        }
    }
}

fn set_target(config: &mut Configuration, target: UsageTarget) -> Result<()> {
    config
        .set_usage_target(target)
        .context("Failed to save configuration")?;
    println!(
        "{}",
        format!("✓ The tray now shows {} usage", target).green()
    );
    Ok(())
}

fn set_gpu(config: &mut Configuration, index: usize) -> Result<()> {
    // Only validate when adapters can be enumerated; the tray ignores
    // out-of-range indices anyway.
    if let Ok(provider) = get_gpu_provider() {
        let count = provider.adapter_names().len();
        if index >= count {
            anyhow::bail!(
                "GPU index {} is out of range ({} adapter{} found)",
                index,
                count,
                if count == 1 { "" } else { "s" }
            );
        }
    } else {
        println!(
            "{}",
            "⚠️  Warning: no GPU adapters found, the index is saved unchecked".yellow()
        );
    }

    config
        .set_gpu_index(index)
        .context("Failed to save configuration")?;
    println!("{}", format!("✓ GPU index set to {}", index).green());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_target_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Configuration::load_from(&path).unwrap();
        set_target(&mut config, UsageTarget::Gpu).unwrap();

        let reloaded = Configuration::load_from(&path).unwrap();
        assert_eq!(reloaded.usage_target(), UsageTarget::Gpu);
    }
}
