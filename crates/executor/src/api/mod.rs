//! High-level typed wrapper for the Executor.
//!
//! The [`Quiver`] struct provides a convenient Rust API that wraps the
//! [`Executor`] and [`Command`]/[`Output`] enums with typed method calls.
//!
//! # Example
//!
//! ```ignore
//! use quiver_executor::Quiver;
//! use quiver_core::{CollectionOptions, Record};
//!
//! let db = Quiver::ephemeral();
//! db.create_collection("docs", CollectionOptions::new().dimension(3))?;
//! db.upsert("docs", vec![Record::new("a", vec![1.0, 0.0, 0.0])])?;
//! let hits = db.query("docs", vec![vec![1.0, 0.0, 0.0]], 1, None)?;
//! ```

mod collection;
mod record;

use std::sync::Arc;

use quiver_engine::{Database, DatabaseOptions};

use crate::output::ServerInfo;
use crate::{Command, Error, Executor, ExecutorOptions, Output, Result};

/// High-level typed wrapper for database operations.
///
/// Each method:
///
/// 1. Creates the appropriate [`Command`]
/// 2. Executes it via the [`Executor`]
/// 3. Extracts and returns the typed result
///
/// The remote `Session` in the client crate exposes the same methods, so
/// code can move between embedded and remote use unchanged.
#[derive(Clone)]
pub struct Quiver {
    executor: Executor,
}

impl Quiver {
    /// Wrap an open database.
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            executor: Executor::new(db),
        }
    }

    /// Wrap an open database with explicit executor options.
    pub fn with_options(db: Arc<Database>, options: ExecutorOptions) -> Self {
        Self {
            executor: Executor::with_options(db, options),
        }
    }

    /// Open a database and wrap it.
    pub fn open(options: DatabaseOptions) -> Result<Self> {
        Ok(Self::new(Arc::new(Database::open(options)?)))
    }

    /// In-memory database.
    pub fn ephemeral() -> Self {
        Self::new(Arc::new(Database::ephemeral()))
    }

    /// Get the underlying executor.
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    // =========================================================================
    // System Operations
    // =========================================================================

    /// Liveness check.
    ///
    /// Returns nanoseconds since the Unix epoch, never decreasing within
    /// one process.
    pub fn heartbeat(&self) -> Result<u64> {
        match self.executor.execute(Command::Heartbeat)? {
            Output::Timestamp(ts) => Ok(ts),
            _ => Err(unexpected("Heartbeat")),
        }
    }

    /// Server version.
    pub fn version(&self) -> Result<String> {
        match self.executor.execute(Command::Version)? {
            Output::Version(v) => Ok(v),
            _ => Err(unexpected("Version")),
        }
    }

    /// Server summary.
    pub fn info(&self) -> Result<ServerInfo> {
        match self.executor.execute(Command::Info)? {
            Output::Info(info) => Ok(info),
            _ => Err(unexpected("Info")),
        }
    }

    /// Fsync the write-ahead log.
    pub fn flush(&self) -> Result<()> {
        self.executor.database().flush()
    }
}

pub(crate) fn unexpected(op: &str) -> Error {
    Error::Internal(format!("Unexpected output for {}", op))
}
