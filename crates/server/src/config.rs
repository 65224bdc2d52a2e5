//! Server configuration
//!
//! # Example Configuration
//!
//! ```toml
//! bind = "0.0.0.0:8000"
//! data_dir = "/var/lib/quiver"
//! durability = "strict"
//! lock_timeout_ms = 5000
//! max_frame_bytes = 16777216
//! strict_record_delete = true
//!
//! # or, for batched fsync:
//! # [durability.batched]
//! # interval_ms = 100
//! # batch_size = 1000
//! ```
//!
//! Every key is optional. Command-line flags override file values.

use quiver_durability::DurabilityMode;
use quiver_engine::DatabaseOptions;
use quiver_executor::ExecutorOptions;
use quiver_wire::DEFAULT_MAX_FRAME_BYTES;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ServerError;

/// Default listen address
pub const DEFAULT_BIND: &str = "127.0.0.1:8000";

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    pub bind: String,
    /// WAL directory; unset keeps everything in memory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// WAL fsync policy
    pub durability: DurabilityMode,
    /// Bound on every lock acquisition, in milliseconds
    pub lock_timeout_ms: u64,
    /// Largest accepted request frame
    pub max_frame_bytes: usize,
    /// Fail record deletes naming absent ids
    pub strict_record_delete: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: DEFAULT_BIND.to_string(),
            data_dir: None,
            durability: DurabilityMode::default(),
            lock_timeout_ms: 5000,
            max_frame_bytes: DEFAULT_MAX_FRAME_BYTES,
            strict_record_delete: true,
        }
    }
}

impl ServerConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ServerError> {
        let config: ServerConfig =
            toml::from_str(content).map_err(|e| ServerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ServerError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ServerError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Render as TOML
    pub fn to_toml_string(&self) -> Result<String, ServerError> {
        toml::to_string_pretty(self).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Reject values the server cannot run with
    pub fn validate(&self) -> Result<(), ServerError> {
        if self.bind.trim().is_empty() {
            return Err(ServerError::Config("bind address is empty".into()));
        }
        if self.lock_timeout_ms == 0 {
            return Err(ServerError::Config("lock_timeout_ms must be positive".into()));
        }
        if self.max_frame_bytes == 0 {
            return Err(ServerError::Config("max_frame_bytes must be positive".into()));
        }
        Ok(())
    }

    /// Lock timeout as a duration
    pub fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.lock_timeout_ms)
    }

    /// Options for opening the database
    pub fn database_options(&self) -> DatabaseOptions {
        let mut options = DatabaseOptions::new()
            .durability(self.durability)
            .lock_timeout(self.lock_timeout());
        if let Some(dir) = &self.data_dir {
            options = options.data_dir(dir.clone());
        }
        options
    }

    /// Options for the executor
    pub fn executor_options(&self) -> ExecutorOptions {
        ExecutorOptions {
            strict_record_delete: self.strict_record_delete,
        }
    }
}
