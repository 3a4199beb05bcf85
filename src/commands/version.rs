use anyhow::Result;
use colored::Colorize;

pub fn execute() -> Result<()> {
    println!("usagepin version {}", env!("CARGO_PKG_VERSION"));
    if cfg!(feature = "nvml") {
        println!("{}", "NVIDIA support: enabled".dimmed());
    } else {
        println!("{}", "NVIDIA support: disabled".dimmed());
    }
    Ok(())
}
