use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use colored::*;

use usagepin::commands;

const TRAY_LONG_ABOUT: &str = "Show the usage icon in the Windows notification area.\n\n\
Left click switches the icon between CPU and GPU usage, right click exits.\n\
The report view is not available here; use 'usagepin run' for it.";

fn build_cli() -> Command {
    Command::new("usagepin")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Live CPU/GPU usage pinned to the tray, with a pop-up hardware report")
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .short('v')
                .short_alias('V')
                .long("version")
                .help("Print version information")
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("run")
                .about("Run the tray in the terminal (default)")
                .arg(
                    Arg::new("interval")
                        .short('i')
                        .long("interval")
                        .value_name("MS")
                        .help("Tray refresh interval in milliseconds")
                        .value_parser(clap::value_parser!(u64)),
                ),
        )
        .subcommand(
            Command::new("tray")
                .about("Show the usage icon in the Windows notification area")
                .long_about(TRAY_LONG_ABOUT)
                .arg(
                    Arg::new("interval")
                        .short('i')
                        .long("interval")
                        .value_name("MS")
                        .help("Tray refresh interval in milliseconds")
                        .value_parser(clap::value_parser!(u64)),
                ),
        )
        .subcommand(
            Command::new("snapshot")
                .about("Print the report readings once")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("get")
                .about("Get configuration values (use 'usagepin get --help' for subcommands)")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(Command::new("target").about("Metric shown in the tray"))
                .subcommand(Command::new("gpu").about("Selected GPU adapter index"))
                .subcommand(Command::new("path").about("Location of the config file")),
        )
        .subcommand(
            Command::new("set")
                .about("Set configuration values (use 'usagepin set --help' for subcommands)")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(
                    Command::new("target")
                        .about("Metric shown in the tray")
                        .arg(
                            Arg::new("target")
                                .help("cpu or gpu")
                                .required(true)
                                .value_parser(["cpu", "gpu", "CPU", "GPU"])
                                .index(1),
                        ),
                )
                .subcommand(
                    Command::new("gpu")
                        .about("Select the GPU adapter by index (see 'usagepin gpus')")
                        .arg(
                            Arg::new("index")
                                .help("Adapter index")
                                .required(true)
                                .value_parser(clap::value_parser!(usize))
                                .index(1),
                        ),
                ),
        )
        .subcommand(Command::new("gpus").about("List GPU adapters"))
        .subcommand(Command::new("version").about("Shows version information"))
        .subcommand(
            Command::new("completions")
                .about("Generate shell completions")
                .arg(
                    Arg::new("shell")
                        .help("bash, zsh, fish, powershell or elvish")
                        .required(true)
                        .index(1),
                ),
        )
}

fn main() -> Result<()> {
    let matches = build_cli().get_matches();

    if matches.get_flag("version") {
        return commands::version();
    }

    // The terminal frontend owns the screen, so its logs go to a file
    let tui = matches!(matches.subcommand(), None | Some(("run", _)));
    if tui {
        let path = usagepin::default_log_path()?;
        if let Err(e) = usagepin::init_file_logging(&path) {
            eprintln!(
                "{}",
                format!("Warning: could not open log file {:?}: {}", path, e).yellow()
            );
        }
    } else {
        usagepin::init_logging();
    }

    match matches.subcommand() {
        Some(("run", sub_matches)) => commands::run(Some(sub_matches)),
        Some(("tray", sub_matches)) => commands::tray(sub_matches),
        Some(("snapshot", sub_matches)) => commands::snapshot(sub_matches),
        Some(("get", sub_matches)) => commands::config::handle_get(sub_matches),
        Some(("set", sub_matches)) => commands::config::handle_set(sub_matches),
        Some(("gpus", _)) => commands::gpus(),
        Some(("version", _)) => commands::version(),
        Some(("completions", sub_matches)) => {
            let mut cli = build_cli();
            commands::completions::execute(sub_matches, &mut cli)
        }
        _ => commands::run(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_set_gpu_parses_index() {
        let matches = build_cli()
            .try_get_matches_from(["usagepin", "set", "gpu", "2"])
            .unwrap();
        let (_, set) = matches.subcommand().unwrap();
        let (_, gpu) = set.subcommand().unwrap();
        assert_eq!(gpu.get_one::<usize>("index"), Some(&2));
    }

    #[test]
    fn test_tray_help_describes_clicks() {
        let cli = build_cli();
        let tray = cli.find_subcommand("tray").unwrap();
        let help = tray.get_long_about().unwrap().to_string();
        assert!(help.contains("Left click switches"));
        assert!(help.contains("usagepin run"));
    }

    #[test]
    fn test_set_target_rejects_unknown() {
        assert!(build_cli()
            .try_get_matches_from(["usagepin", "set", "target", "npu"])
            .is_err());
    }
}
