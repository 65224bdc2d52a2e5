//! When WAL appends reach the disk

use serde::{Deserialize, Serialize};

/// Fsync policy for the write-ahead log
///
/// In TOML a mode is either a bare string (`"none"`, `"strict"`) or a
/// `[durability.batched]` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurabilityMode {
    /// No log at all; a data directory is ignored
    None,

    /// Every append is fsynced before the mutation becomes visible
    Strict,

    /// Appends are fsynced once `batch_size` are pending or `interval_ms`
    /// has passed since the last fsync. Appends check the window as they
    /// run; an idle log relies on `Wal::sync_if_due` being polled, which the
    /// server does every `interval_ms`.
    Batched {
        /// Longest gap between fsyncs
        interval_ms: u64,
        /// Most appends between fsyncs
        batch_size: usize,
    },
}

impl DurabilityMode {
    /// Batched with a 100 ms / 1000 append window
    pub fn batched_default() -> Self {
        DurabilityMode::Batched {
            interval_ms: 100,
            batch_size: 1000,
        }
    }

    /// Check if a log file is written in this mode
    pub fn requires_wal(&self) -> bool {
        !matches!(self, DurabilityMode::None)
    }

    /// Short label for logs
    pub fn description(&self) -> &'static str {
        match self {
            DurabilityMode::None => "in-memory only",
            DurabilityMode::Strict => "fsync per append",
            DurabilityMode::Batched { .. } => "batched fsync",
        }
    }

    /// Parse a command-line mode name; `batched` takes the default window
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Some(DurabilityMode::None),
            "strict" => Some(DurabilityMode::Strict),
            "batched" => Some(DurabilityMode::batched_default()),
            _ => None,
        }
    }
}

impl Default for DurabilityMode {
    fn default() -> Self {
        DurabilityMode::batched_default()
    }
}
