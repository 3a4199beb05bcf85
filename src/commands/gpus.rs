use anyhow::Result;
use colored::Colorize;

use crate::core::config::Configuration;
use crate::platform::get_gpu_provider;

/// List GPU adapters and mark the one the tray reads
pub fn execute() -> Result<()> {
    let config = Configuration::load()?;

    let (vendor, names) = match get_gpu_provider() {
        Ok(provider) => (provider.vendor(), provider.adapter_names()),
        Err(e) => {
            println!("{}", format!("No GPU adapters found: {}", e).yellow());
            return Ok(());
        }
    };

    if names.is_empty() {
        println!("{}", "No GPU adapters found".yellow());
        return Ok(());
    }

    let selected = config.gpu_index().min(names.len() - 1);
    println!("{}", format!("{} GPU adapters:", vendor).bold());
    for (index, name) in names.iter().enumerate() {
        if index == selected {
            println!("  {} {} {}", "*".green().bold(), index, name.green());
        } else {
            println!("    {} {}", index, name);
        }
    }

    if names.len() > 1 {
        println!();
        println!("{}", "Select one with: usagepin set gpu <index>".dimmed());
    }

    Ok(())
}
