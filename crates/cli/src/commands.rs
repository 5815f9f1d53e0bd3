//! Clap command tree definition.

use clap::{value_parser, Arg, ArgAction, Command};

use ael_capture::DEFAULT_LOG_PATH;

/// Build the complete CLI command tree.
pub fn build_cli() -> Command {
    Command::new("ael")
        .about("Capture and inspect Ambient Environment Logs")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("json")
                .long("json")
                .help("JSON output mode (one object per line)")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("More log output on stderr (repeat for more)")
                .action(ArgAction::Count)
                .global(true),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only log errors")
                .action(ArgAction::SetTrue)
                .conflicts_with("verbose")
                .global(true),
        )
        .subcommand(build_capture())
        .subcommand(build_view())
}

fn build_capture() -> Command {
    Command::new("capture")
        .about("Record snapshots into an AEL log")
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Log file to write")
                .default_value(DEFAULT_LOG_PATH),
        )
        .arg(
            Arg::new("count")
                .short('n')
                .long("count")
                .help("Number of snapshots")
                .value_parser(value_parser!(u64))
                .default_value("10"),
        )
        .arg(
            Arg::new("interval-ms")
                .long("interval-ms")
                .help("Milliseconds between snapshots")
                .value_parser(value_parser!(u64))
                .default_value("2000"),
        )
        .arg(
            Arg::new("sync")
                .long("sync")
                .help("When to flush blocks to stable storage")
                .value_parser(["always", "on-close"])
                .default_value("on-close"),
        )
        .arg(
            Arg::new("resume")
                .long("resume")
                .help("Append to an existing log instead of replacing it")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-sensors")
                .long("no-sensors")
                .help("Record with every sensor unavailable")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .help("Seed for the simulated sensors")
                .value_parser(value_parser!(u64))
                .conflicts_with("no-sensors"),
        )
}

fn build_view() -> Command {
    Command::new("view")
        .about("Print the header and every snapshot of an AEL log")
        .arg(
            Arg::new("path")
                .help("Log file to read")
                .default_value(DEFAULT_LOG_PATH),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_tree_is_valid() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_capture_defaults() {
        let matches = build_cli()
            .try_get_matches_from(["ael", "capture"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "capture");
        assert_eq!(
            sub.get_one::<String>("output").map(String::as_str),
            Some("environment_log.ael")
        );
        assert_eq!(sub.get_one::<u64>("count"), Some(&10));
        assert_eq!(sub.get_one::<u64>("interval-ms"), Some(&2000));
        assert!(!sub.get_flag("resume"));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let matches = build_cli()
            .try_get_matches_from(["ael", "view", "log.ael", "--json", "-vv"])
            .unwrap();
        assert!(matches.get_flag("json"));
        assert_eq!(matches.get_count("verbose"), 2);
    }

    #[test]
    fn test_rejects_unknown_sync_mode() {
        let result =
            build_cli().try_get_matches_from(["ael", "capture", "--sync", "sometimes"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_seed_conflicts_with_no_sensors() {
        let result = build_cli().try_get_matches_from([
            "ael",
            "capture",
            "--no-sensors",
            "--seed",
            "4",
        ]);
        assert!(result.is_err());
    }
}
