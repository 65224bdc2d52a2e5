//! Typed operations on [`Session`].
//!
//! Same names and return types as the embedded `Quiver` wrapper, async.

use quiver_core::{CollectionInfo, CollectionOptions, Error, MetadataFilter, Record, VectorMatch};
use quiver_executor::{Command, Output, ServerInfo};

use crate::session::Session;
use quiver_core::Result;

fn unexpected(op: &str) -> Error {
    Error::Internal(format!("Unexpected output for {}", op))
}

impl Session {
    // =========================================================================
    // System Operations
    // =========================================================================

    /// Liveness check; returns the server's nanosecond timestamp.
    pub async fn heartbeat(&mut self) -> Result<u64> {
        match self.execute(Command::Heartbeat).await? {
            Output::Timestamp(ts) => Ok(ts),
            _ => Err(unexpected("Heartbeat")),
        }
    }

    /// Server version.
    pub async fn version(&mut self) -> Result<String> {
        match self.execute(Command::Version).await? {
            Output::Version(v) => Ok(v),
            _ => Err(unexpected("Version")),
        }
    }

    /// Server summary.
    pub async fn info(&mut self) -> Result<ServerInfo> {
        match self.execute(Command::Info).await? {
            Output::Info(info) => Ok(info),
            _ => Err(unexpected("Info")),
        }
    }

    // =========================================================================
    // Collection Operations
    // =========================================================================

    /// Create a collection.
    ///
    /// # Errors
    /// - `AlreadyExists` if the name is taken
    /// - `InvalidArgument` for a malformed name or zero dimension
    pub async fn create_collection(
        &mut self,
        name: &str,
        options: CollectionOptions,
    ) -> Result<CollectionInfo> {
        self.create(name, options, false).await
    }

    /// Create a collection, or return the existing one.
    pub async fn get_or_create_collection(
        &mut self,
        name: &str,
        options: CollectionOptions,
    ) -> Result<CollectionInfo> {
        self.create(name, options, true).await
    }

    async fn create(
        &mut self,
        name: &str,
        options: CollectionOptions,
        get_or_create: bool,
    ) -> Result<CollectionInfo> {
        let command = Command::CreateCollection {
            name: name.to_string(),
            options,
            get_or_create,
        };
        match self.execute(command).await? {
            Output::Collection(info) => Ok(info),
            _ => Err(unexpected("CreateCollection")),
        }
    }

    /// Look up a collection.
    pub async fn get_collection(&mut self, name: &str) -> Result<CollectionInfo> {
        let command = Command::GetCollection {
            name: name.to_string(),
        };
        match self.execute(command).await? {
            Output::Collection(info) => Ok(info),
            _ => Err(unexpected("GetCollection")),
        }
    }

    /// Delete a collection; `NotFound` if absent.
    pub async fn delete_collection(&mut self, name: &str) -> Result<()> {
        let command = Command::DeleteCollection {
            name: name.to_string(),
        };
        match self.execute(command).await? {
            Output::Unit => Ok(()),
            _ => Err(unexpected("DeleteCollection")),
        }
    }

    /// Delete a collection if present; returns whether it was.
    pub async fn delete_collection_if_exists(&mut self, name: &str) -> Result<bool> {
        let command = Command::DeleteCollectionIfExists {
            name: name.to_string(),
        };
        match self.execute(command).await? {
            Output::Bool(existed) => Ok(existed),
            _ => Err(unexpected("DeleteCollectionIfExists")),
        }
    }

    /// Summaries of every collection, in creation order.
    pub async fn list_collections(&mut self) -> Result<Vec<CollectionInfo>> {
        match self.execute(Command::ListCollections).await? {
            Output::Collections(infos) => Ok(infos),
            _ => Err(unexpected("ListCollections")),
        }
    }

    /// Names of every collection, in creation order.
    pub async fn list_collection_names(&mut self) -> Result<Vec<String>> {
        Ok(self
            .list_collections()
            .await?
            .into_iter()
            .map(|info| info.name)
            .collect())
    }

    /// Check if a collection exists.
    pub async fn collection_exists(&mut self, name: &str) -> Result<bool> {
        let command = Command::CollectionExists {
            name: name.to_string(),
        };
        match self.execute(command).await? {
            Output::Bool(exists) => Ok(exists),
            _ => Err(unexpected("CollectionExists")),
        }
    }

    // =========================================================================
    // Record Operations
    // =========================================================================

    /// Insert or replace records, all-or-nothing; returns ids in input order.
    pub async fn upsert(&mut self, collection: &str, records: Vec<Record>) -> Result<Vec<String>> {
        match self
            .execute(Command::upsert_records(collection, records))
            .await?
        {
            Output::Ids(ids) => Ok(ids),
            _ => Err(unexpected("Upsert")),
        }
    }

    /// Nearest-neighbor query, one ranked list per query vector.
    pub async fn query(
        &mut self,
        collection: &str,
        query_vectors: Vec<Vec<f32>>,
        k: usize,
        filter: Option<MetadataFilter>,
    ) -> Result<Vec<Vec<VectorMatch>>> {
        let command = Command::Query {
            collection: collection.to_string(),
            query_vectors,
            k,
            filter,
        };
        match self.execute(command).await? {
            Output::QueryResults(results) => Ok(results),
            _ => Err(unexpected("Query")),
        }
    }

    /// Fetch records by id; absent ids are skipped.
    pub async fn get_records(&mut self, collection: &str, ids: &[&str]) -> Result<Vec<Record>> {
        let command = Command::GetRecords {
            collection: collection.to_string(),
            ids: ids.iter().map(|id| id.to_string()).collect(),
        };
        match self.execute(command).await? {
            Output::Records(records) => Ok(records),
            _ => Err(unexpected("GetRecords")),
        }
    }

    /// Delete records by id; returns how many were removed.
    pub async fn delete_records(&mut self, collection: &str, ids: &[&str]) -> Result<u64> {
        let command = Command::DeleteRecords {
            collection: collection.to_string(),
            ids: ids.iter().map(|id| id.to_string()).collect(),
        };
        match self.execute(command).await? {
            Output::Count(removed) => Ok(removed),
            _ => Err(unexpected("DeleteRecords")),
        }
    }

    /// Number of records in a collection.
    pub async fn count(&mut self, collection: &str) -> Result<u64> {
        let command = Command::Count {
            collection: collection.to_string(),
        };
        match self.execute(command).await? {
            Output::Count(n) => Ok(n),
            _ => Err(unexpected("Count")),
        }
    }
}
