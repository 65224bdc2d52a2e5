//! Output enum: typed results of executed commands

use quiver_core::{CollectionInfo, Record, VectorMatch};
use serde::{Deserialize, Serialize};

/// Result of a successful command
///
/// Serializes as `{"kind": "<variant>", "value": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Output {
    /// Heartbeat timestamp (nanoseconds since epoch, never decreasing)
    Timestamp(u64),
    /// Version string
    Version(String),
    /// Server summary
    Info(ServerInfo),
    /// One collection summary
    Collection(CollectionInfo),
    /// Collection summaries
    Collections(Vec<CollectionInfo>),
    /// Boolean answer
    Bool(bool),
    /// Record ids (with generated ids filled in)
    Ids(Vec<String>),
    /// One ranked list per query vector
    QueryResults(Vec<Vec<VectorMatch>>),
    /// Stored records
    Records(Vec<Record>),
    /// A count
    Count(u64),
    /// No value
    Unit,
}

/// Server summary returned by `Command::Info`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    /// Server version
    pub version: String,
    /// Live collections
    pub collections: u64,
    /// Seconds since the database was opened
    pub uptime_secs: u64,
    /// Whether mutations are logged to disk
    pub durable: bool,
}
