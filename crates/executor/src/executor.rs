//! Executor: dispatches commands to handlers
//!
//! The executor is stateless apart from its options. It is `Clone`, `Send`
//! and `Sync`, so one instance can serve every connection.

use std::sync::Arc;

use quiver_core::CancellationToken;
use quiver_engine::Database;
use tracing::{debug, error};

use crate::handlers::{collection, record, system};
use crate::{Command, Output, Result};

/// Executor behavior switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutorOptions {
    /// Fail `DeleteRecords` with `NotFound` when any id is absent
    pub strict_record_delete: bool,
}

impl Default for ExecutorOptions {
    fn default() -> Self {
        ExecutorOptions {
            strict_record_delete: true,
        }
    }
}

/// Command executor over one database
#[derive(Clone)]
pub struct Executor {
    db: Arc<Database>,
    options: ExecutorOptions,
}

impl Executor {
    /// Executor with default options
    pub fn new(db: Arc<Database>) -> Self {
        Self::with_options(db, ExecutorOptions::default())
    }

    /// Executor with explicit options
    pub fn with_options(db: Arc<Database>, options: ExecutorOptions) -> Self {
        Executor { db, options }
    }

    /// Underlying database
    pub fn database(&self) -> &Arc<Database> {
        &self.db
    }

    /// Options in effect
    pub fn options(&self) -> ExecutorOptions {
        self.options
    }

    /// Execute a command that cannot be cancelled
    pub fn execute(&self, cmd: Command) -> Result<Output> {
        self.execute_with(cmd, &CancellationToken::new())
    }

    /// Execute a command, aborting long reads when `cancel` fires
    pub fn execute_with(&self, cmd: Command, cancel: &CancellationToken) -> Result<Output> {
        let op = cmd.name();
        let result = self.dispatch(cmd, cancel);

        match &result {
            Ok(_) => debug!(op, "Command succeeded"),
            Err(e) if e.is_serious() => error!(op, error = %e, "Command failed"),
            Err(e) => debug!(op, error = %e, "Command rejected"),
        }
        result
    }

    fn dispatch(&self, cmd: Command, cancel: &CancellationToken) -> Result<Output> {
        let db = self.db.as_ref();
        match cmd {
            Command::Heartbeat => system::heartbeat(),
            Command::Version => system::version(),
            Command::Info => system::info(db),

            Command::CreateCollection {
                name,
                options,
                get_or_create,
            } => collection::create(db, &name, options, get_or_create),
            Command::GetCollection { name } => collection::get(db, &name),
            Command::DeleteCollection { name } => collection::delete(db, &name),
            Command::DeleteCollectionIfExists { name } => collection::delete_if_exists(db, &name),
            Command::ListCollections => collection::list(db),
            Command::CollectionExists { name } => collection::exists(db, &name),

            Command::Upsert {
                collection,
                ids,
                vectors,
                metadatas,
                documents,
            } => record::upsert(db, &collection, ids, vectors, metadatas, documents),
            Command::Query {
                collection,
                query_vectors,
                k,
                filter,
            } => record::query(db, &collection, &query_vectors, k, filter.as_ref(), cancel),
            Command::GetRecords { collection, ids } => record::get(db, &collection, &ids),
            Command::DeleteRecords { collection, ids } => {
                record::delete(db, &collection, &ids, self.options.strict_record_delete)
            }
            Command::Count { collection } => record::count(db, &collection),
        }
    }
}
