//! System command handlers: heartbeat, version, info.

use quiver_core::clock::heartbeat_nanos;
use quiver_engine::Database;

use crate::output::ServerInfo;
use crate::{Output, Result};

/// Server version reported by `Command::Version`
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Handle Heartbeat: never fails
pub fn heartbeat() -> Result<Output> {
    Ok(Output::Timestamp(heartbeat_nanos()))
}

/// Handle Version
pub fn version() -> Result<Output> {
    Ok(Output::Version(VERSION.to_string()))
}

/// Handle Info
pub fn info(db: &Database) -> Result<Output> {
    Ok(Output::Info(ServerInfo {
        version: VERSION.to_string(),
        collections: db.registry().len()? as u64,
        uptime_secs: db.uptime().as_secs(),
        durable: db.is_durable(),
    }))
}
