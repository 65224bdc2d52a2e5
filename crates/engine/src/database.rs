//! Database: registry plus optional write-ahead log
//!
//! Opening a durable database replays the WAL in order through the registry,
//! rebuilding every collection with its frozen dimension, record order and
//! creation order. The log is the only on-disk state.

use crate::options::DatabaseOptions;
use crate::registry::Registry;
use quiver_core::{Error, Result};
use quiver_durability::{DurabilityMode, Wal, WAL_FILE_NAME};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// An open Quiver database
pub struct Database {
    registry: Registry,
    wal: Option<Arc<Wal>>,
    options: DatabaseOptions,
    opened_at: Instant,
}

impl Database {
    /// Open a database, replaying its WAL when durable
    ///
    /// # Errors
    /// - `Internal` if the data directory cannot be created, the WAL cannot
    ///   be opened, or a recovered entry does not apply
    pub fn open(options: DatabaseOptions) -> Result<Self> {
        if !options.is_durable() {
            if options.data_dir.is_some() {
                warn!("Durability mode is none; data directory is ignored");
            }
            return Ok(Self::in_memory(options));
        }

        let dir = options
            .data_dir
            .clone()
            .ok_or_else(|| Error::Internal("durable database without data directory".into()))?;
        std::fs::create_dir_all(&dir).map_err(|e| {
            Error::Internal(format!(
                "cannot create data directory {}: {}",
                dir.display(),
                e
            ))
        })?;

        let (wal, replay) = Wal::open(dir.join(WAL_FILE_NAME), options.durability)?;
        let wal = Arc::new(wal);
        let registry = Registry::new(options.lock_timeout, options.backend, Some(wal.clone()));

        let replayed = replay.entries.len();
        for entry in replay.entries {
            registry.apply(entry)?;
        }

        info!(
            data_dir = %dir.display(),
            entries = replayed,
            truncated_bytes = replay.truncated_bytes,
            collections = registry.len()?,
            "Recovered database"
        );

        Ok(Database {
            registry,
            wal: Some(wal),
            options,
            opened_at: Instant::now(),
        })
    }

    /// In-memory database with default options
    pub fn ephemeral() -> Self {
        Self::in_memory(DatabaseOptions::new())
    }

    fn in_memory(options: DatabaseOptions) -> Self {
        Database {
            registry: Registry::new(options.lock_timeout, options.backend, None),
            wal: None,
            options,
            opened_at: Instant::now(),
        }
    }

    /// Collection registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Options the database was opened with
    pub fn options(&self) -> &DatabaseOptions {
        &self.options
    }

    /// Check if mutations are logged
    pub fn is_durable(&self) -> bool {
        self.wal.is_some()
    }

    /// Time since open
    pub fn uptime(&self) -> Duration {
        self.opened_at.elapsed()
    }

    /// Fsync every logged mutation
    pub fn flush(&self) -> Result<()> {
        if let Some(wal) = &self.wal {
            wal.sync()?;
        }
        Ok(())
    }

    /// Batching window of the log, if appends are fsynced in batches
    pub fn sync_interval(&self) -> Option<Duration> {
        match self.wal.as_ref()?.mode() {
            DurabilityMode::Batched { interval_ms, .. } => Some(Duration::from_millis(interval_ms)),
            _ => None,
        }
    }

    /// Fsync pending appends once the batching window has passed
    pub fn sync_if_due(&self) -> Result<bool> {
        match &self.wal {
            Some(wal) => Ok(wal.sync_if_due()?),
            None => Ok(false),
        }
    }
}
