//! ArgMatches → CliAction conversion.
//!
//! `serve` flags are layered over the config file (or defaults), so a flag
//! always wins over the file.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use clap::ArgMatches;
use quiver_client::ClientConfig;
use quiver_durability::DurabilityMode;
use quiver_server::ServerConfig;

/// What the invocation asks for.
#[derive(Debug)]
pub enum CliAction {
    /// Run the server.
    Serve(ServerConfig),
    /// Exercise a running server.
    Smoke {
        client: ClientConfig,
        collection: String,
        dimension: usize,
    },
}

pub fn matches_to_action(matches: &ArgMatches) -> anyhow::Result<CliAction> {
    match matches.subcommand() {
        Some(("serve", sub)) => Ok(CliAction::Serve(serve_config(sub)?)),
        Some(("smoke", sub)) => {
            let mut client = ClientConfig::new()
                .host(required(sub, "host")?)
                .port(*sub.get_one::<u16>("port").unwrap_or(&quiver_client::DEFAULT_PORT));
            if let Some(tenant) = sub.get_one::<String>("tenant") {
                client = client.tenant(tenant.clone());
            }
            Ok(CliAction::Smoke {
                client,
                collection: required(sub, "collection")?,
                dimension: *sub.get_one::<usize>("dimension").unwrap_or(&3),
            })
        }
        Some((other, _)) => Err(anyhow!("unknown command: {}", other)),
        None => Err(anyhow!("no command given")),
    }
}

fn serve_config(matches: &ArgMatches) -> anyhow::Result<ServerConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => ServerConfig::load(Path::new(path))
            .with_context(|| format!("loading {}", path))?,
        None => ServerConfig::default(),
    };

    if let Some(bind) = matches.get_one::<String>("bind") {
        config.bind = bind.clone();
    }
    if let Some(dir) = matches.get_one::<String>("data-dir") {
        config.data_dir = Some(PathBuf::from(dir));
    }
    if let Some(mode) = matches.get_one::<String>("durability") {
        config.durability = DurabilityMode::parse(mode)
            .ok_or_else(|| anyhow!("unknown durability mode: {}", mode))?;
    }
    if let Some(ms) = matches.get_one::<u64>("lock-timeout-ms") {
        config.lock_timeout_ms = *ms;
    }
    if let Some(bytes) = matches.get_one::<usize>("max-frame-bytes") {
        config.max_frame_bytes = *bytes;
    }
    if matches.get_flag("lenient-delete") {
        config.strict_record_delete = false;
    }

    config.validate()?;
    Ok(config)
}

fn required(matches: &ArgMatches, name: &str) -> anyhow::Result<String> {
    matches
        .get_one::<String>(name)
        .cloned()
        .ok_or_else(|| anyhow!("missing --{}", name))
}
