//! WAL entry types
//!
//! Every state-changing operation on the registry or a collection is recorded
//! as one entry before it becomes visible. Replaying the entries in order
//! rebuilds the exact registry, including the frozen dimension of each
//! collection and the insertion order of its records.

use quiver_core::{DistanceMetric, Metadata, Record};
use serde::{Deserialize, Serialize};

/// WAL entry types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WalEntry {
    /// Collection created
    CreateCollection {
        /// Collection name
        name: String,
        /// Dimension given at creation, if any
        dimension: Option<usize>,
        /// Distance metric
        metric: DistanceMetric,
        /// Collection-level metadata
        metadata: Option<Metadata>,
        /// Creation timestamp (microseconds since epoch)
        created_at: i64,
    },

    /// Collection and all of its records removed
    DropCollection {
        /// Collection name
        name: String,
    },

    /// Batch of records inserted or replaced, all-or-nothing
    Upsert {
        /// Owning collection
        collection: String,
        /// Records in application order
        records: Vec<Record>,
    },

    /// Records removed; ids that were absent at apply time are skipped
    DeleteRecords {
        /// Owning collection
        collection: String,
        /// Record ids
        ids: Vec<String>,
    },
}

impl WalEntry {
    /// Name of the collection this entry touches
    pub fn collection(&self) -> &str {
        match self {
            WalEntry::CreateCollection { name, .. } => name,
            WalEntry::DropCollection { name } => name,
            WalEntry::Upsert { collection, .. } => collection,
            WalEntry::DeleteRecords { collection, .. } => collection,
        }
    }

    /// Check if entry changes the registry rather than records
    pub fn is_registry_change(&self) -> bool {
        matches!(
            self,
            WalEntry::CreateCollection { .. } | WalEntry::DropCollection { .. }
        )
    }

    /// Short name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            WalEntry::CreateCollection { .. } => "create_collection",
            WalEntry::DropCollection { .. } => "drop_collection",
            WalEntry::Upsert { .. } => "upsert",
            WalEntry::DeleteRecords { .. } => "delete_records",
        }
    }
}
