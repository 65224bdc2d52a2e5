//! Vector Store Comprehensive Test Suite
//!
//! Tests organized by functionality:
//! - collections: Collection management (create, get, delete, list)
//! - records: Upsert, get, delete, count
//! - search: Ranking, metrics, filters
//! - durability: Persistence across restarts via WAL replay
//! - concurrency: Thread safety
//! - edge_cases: Validation and boundary conditions

use quiver::prelude::*;
use std::path::Path;
use tempfile::TempDir;

mod collections;
mod concurrency;
mod durability;
mod edge_cases;
mod records;

/// Open a WAL-backed database that fsyncs every append.
pub fn create_persistent_db(path: &Path) -> Quiver {
    Quiver::open(
        DatabaseOptions::new()
            .data_dir(path)
            .durability(DurabilityMode::Strict),
    )
    .unwrap()
}

/// Run `test` against an in-memory database and a durable one.
pub fn test_across_modes<F>(test: F)
where
    F: Fn(Quiver),
{
    test(Quiver::ephemeral());

    let temp_dir = TempDir::new().unwrap();
    test(create_persistent_db(temp_dir.path()));
}

/// Create a collection with a fixed dimension and metric.
pub fn create(db: &Quiver, name: &str, dimension: usize, metric: DistanceMetric) {
    db.create_collection(
        name,
        CollectionOptions::new().dimension(dimension).metric(metric),
    )
    .unwrap();
}

/// Metadata map from pairs.
pub fn meta<const N: usize>(pairs: [(&str, MetadataValue); N]) -> Metadata {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}
