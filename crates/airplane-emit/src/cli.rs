use clap::{Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("airplane-emit")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Write Airplane task outputs to stdout")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_name("FILE")
                .help("TOML file with emitter settings (chunk_size, flush_on_emit)"),
        )
        .subcommand(cmd_set())
        .subcommand(cmd_append())
        .subcommand(cmd_named())
}

fn cmd_set() -> Command {
    Command::new("set")
        .about("Set the output, or the part of it at --path")
        .arg(arg_path())
        .arg(arg_value())
}

fn cmd_append() -> Command {
    Command::new("append")
        .about("Append to the output, or to the array at --path")
        .arg(arg_path())
        .arg(arg_value())
}

fn cmd_named() -> Command {
    Command::new("named")
        .about("Write a legacy named output")
        .arg(
            Arg::new("name")
                .long("name")
                .short('n')
                .default_value("")
                .help("Output name; letters, digits and underscores"),
        )
        .arg(arg_value())
}

fn arg_path() -> Arg {
    Arg::new("path")
        .long("path")
        .short('p')
        .action(ArgAction::Append)
        .value_name("SEGMENT")
        .allow_hyphen_values(true)
        .help("Path segment, repeatable: a JSON string, an integer index (128-bit range), or a bare key")
}

fn arg_value() -> Arg {
    Arg::new("value")
        .long("value")
        .short('v')
        .value_name("JSON")
        .help("Value as JSON; read from stdin when omitted")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_consistent() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_repeated_paths_keep_order() {
        let matches = build_cli()
            .try_get_matches_from(["airplane-emit", "set", "-p", "a", "-p", "0", "-v", "1"])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        let paths: Vec<&String> = sub.get_many::<String>("path").unwrap().collect();
        assert_eq!(paths, vec!["a", "0"]);
    }

    #[test]
    fn test_subcommand_required() {
        assert!(build_cli().try_get_matches_from(["airplane-emit"]).is_err());
    }
}
