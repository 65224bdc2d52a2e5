//! Command enum: every operation the executor understands
//!
//! Commands are plain data. They serialize as `{"op": "<name>", ...fields}`
//! so the same enum is the request body on the wire.

use quiver_core::{CollectionOptions, Metadata, MetadataFilter, Record};
use serde::{Deserialize, Serialize};

/// An executable operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    // ==================== System ====================
    /// Liveness check; returns a monotonic nanosecond timestamp
    Heartbeat,

    /// Server version string
    Version,

    /// Collection count, uptime and durability
    Info,

    // ==================== Collections ====================
    /// Create a collection
    CreateCollection {
        /// Collection name
        name: String,
        /// Dimension, metric, metadata
        #[serde(default)]
        options: CollectionOptions,
        /// Return the existing collection instead of failing with `AlreadyExists`
        #[serde(default)]
        get_or_create: bool,
    },

    /// Look up a collection
    GetCollection {
        /// Collection name
        name: String,
    },

    /// Delete a collection; `NotFound` if absent
    DeleteCollection {
        /// Collection name
        name: String,
    },

    /// Delete a collection if present; returns whether it was
    DeleteCollectionIfExists {
        /// Collection name
        name: String,
    },

    /// Summaries of every collection, creation order
    ListCollections,

    /// Check if a collection exists
    CollectionExists {
        /// Collection name
        name: String,
    },

    // ==================== Records ====================
    /// Insert or replace records (columnar, all-or-nothing)
    ///
    /// An empty id asks the server to generate one.
    Upsert {
        /// Target collection
        collection: String,
        /// Record ids
        ids: Vec<String>,
        /// One vector per id
        vectors: Vec<Vec<f32>>,
        /// One metadata map per id
        #[serde(default, skip_serializing_if = "Option::is_none")]
        metadatas: Option<Vec<Option<Metadata>>>,
        /// One document per id
        #[serde(default, skip_serializing_if = "Option::is_none")]
        documents: Option<Vec<Option<String>>>,
    },

    /// Nearest-neighbor query; one ranked list per query vector
    Query {
        /// Target collection
        collection: String,
        /// Query vectors
        query_vectors: Vec<Vec<f32>>,
        /// Results per query vector
        k: usize,
        /// Metadata equality filter
        #[serde(default, rename = "where", skip_serializing_if = "Option::is_none")]
        filter: Option<MetadataFilter>,
    },

    /// Fetch records by id
    GetRecords {
        /// Target collection
        collection: String,
        /// Record ids
        ids: Vec<String>,
    },

    /// Delete records by id
    DeleteRecords {
        /// Target collection
        collection: String,
        /// Record ids
        ids: Vec<String>,
    },

    /// Number of records in a collection
    Count {
        /// Target collection
        collection: String,
    },
}

impl Command {
    /// Operation name, as used in logs and on the wire
    pub fn name(&self) -> &'static str {
        match self {
            Command::Heartbeat => "heartbeat",
            Command::Version => "version",
            Command::Info => "info",
            Command::CreateCollection { .. } => "create_collection",
            Command::GetCollection { .. } => "get_collection",
            Command::DeleteCollection { .. } => "delete_collection",
            Command::DeleteCollectionIfExists { .. } => "delete_collection_if_exists",
            Command::ListCollections => "list_collections",
            Command::CollectionExists { .. } => "collection_exists",
            Command::Upsert { .. } => "upsert",
            Command::Query { .. } => "query",
            Command::GetRecords { .. } => "get_records",
            Command::DeleteRecords { .. } => "delete_records",
            Command::Count { .. } => "count",
        }
    }

    /// Check if the command mutates state
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Command::CreateCollection { .. }
                | Command::DeleteCollection { .. }
                | Command::DeleteCollectionIfExists { .. }
                | Command::Upsert { .. }
                | Command::DeleteRecords { .. }
        )
    }

    /// Build a columnar `Upsert` from records
    pub fn upsert_records(collection: impl Into<String>, records: Vec<Record>) -> Self {
        let has_metadata = records.iter().any(|r| r.metadata.is_some());
        let has_documents = records.iter().any(|r| r.document.is_some());

        let mut ids = Vec::with_capacity(records.len());
        let mut vectors = Vec::with_capacity(records.len());
        let mut metadatas = Vec::with_capacity(records.len());
        let mut documents = Vec::with_capacity(records.len());
        for record in records {
            ids.push(record.id);
            vectors.push(record.vector);
            metadatas.push(record.metadata);
            documents.push(record.document);
        }

        Command::Upsert {
            collection: collection.into(),
            ids,
            vectors,
            metadatas: has_metadata.then_some(metadatas),
            documents: has_documents.then_some(documents),
        }
    }
}
