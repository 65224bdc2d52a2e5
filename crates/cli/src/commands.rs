//! Clap command tree.

use clap::{Arg, ArgAction, Command};

/// Build the `quiver` command.
pub fn build_cli() -> Command {
    Command::new("quiver")
        .about("Quiver vector store")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(serve_command())
        .subcommand(smoke_command())
}

fn serve_command() -> Command {
    Command::new("serve")
        .about("Run the server")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("FILE")
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("bind")
                .long("bind")
                .value_name("ADDR")
                .help("Listen address [default: 127.0.0.1:8000]"),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .value_name("DIR")
                .help("Write-ahead log directory; omit to run in memory"),
        )
        .arg(
            Arg::new("durability")
                .long("durability")
                .value_name("MODE")
                .value_parser(["none", "strict", "batched"])
                .help("WAL fsync policy"),
        )
        .arg(
            Arg::new("lock-timeout-ms")
                .long("lock-timeout-ms")
                .value_name("MS")
                .value_parser(clap::value_parser!(u64))
                .help("Bound on every lock acquisition"),
        )
        .arg(
            Arg::new("max-frame-bytes")
                .long("max-frame-bytes")
                .value_name("BYTES")
                .value_parser(clap::value_parser!(usize))
                .help("Largest accepted request frame"),
        )
        .arg(
            Arg::new("lenient-delete")
                .long("lenient-delete")
                .action(ArgAction::SetTrue)
                .help("Ignore absent ids in record deletes instead of failing"),
        )
}

fn smoke_command() -> Command {
    Command::new("smoke")
        .about("Check a running server: heartbeat, then recreate a collection")
        .arg(
            Arg::new("host")
                .long("host")
                .value_name("HOST")
                .default_value("localhost"),
        )
        .arg(
            Arg::new("port")
                .long("port")
                .short('p')
                .value_name("PORT")
                .value_parser(clap::value_parser!(u16))
                .default_value("8000"),
        )
        .arg(Arg::new("tenant").long("tenant").value_name("TENANT"))
        .arg(
            Arg::new("collection")
                .long("collection")
                .value_name("NAME")
                .default_value("quiver_smoke"),
        )
        .arg(
            Arg::new("dimension")
                .long("dimension")
                .value_name("N")
                .value_parser(clap::value_parser!(usize))
                .default_value("3"),
        )
}
