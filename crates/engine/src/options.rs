//! Database open options
//!
//! Builder in the style of `std::fs::OpenOptions`:
//!
//! ```ignore
//! let db = Database::open(
//!     DatabaseOptions::new()
//!         .data_dir("/var/lib/quiver")
//!         .durability(DurabilityMode::Strict),
//! )?;
//! ```

use crate::backend::IndexBackendFactory;
use quiver_durability::DurabilityMode;
use std::path::PathBuf;
use std::time::Duration;

/// Default bound on every lock acquisition
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(5);

/// Options for [`crate::Database::open`]
#[derive(Debug, Clone)]
pub struct DatabaseOptions {
    /// Directory holding the WAL; `None` keeps everything in memory
    pub data_dir: Option<PathBuf>,
    /// When WAL appends are fsynced
    pub durability: DurabilityMode,
    /// Bound on every registry and collection lock acquisition
    pub lock_timeout: Duration,
    /// Index backend for new collections
    pub backend: IndexBackendFactory,
}

impl Default for DatabaseOptions {
    fn default() -> Self {
        DatabaseOptions {
            data_dir: None,
            durability: DurabilityMode::default(),
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
            backend: IndexBackendFactory::default(),
        }
    }
}

impl DatabaseOptions {
    /// In-memory defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Persist to `dir`
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Choose the durability mode
    pub fn durability(mut self, mode: DurabilityMode) -> Self {
        self.durability = mode;
        self
    }

    /// Bound lock waits
    pub fn lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    /// Choose the index backend
    pub fn backend(mut self, backend: IndexBackendFactory) -> Self {
        self.backend = backend;
        self
    }

    /// Check if these options produce a WAL-backed database
    pub fn is_durable(&self) -> bool {
        self.data_dir.is_some() && self.durability.requires_wal()
    }
}
